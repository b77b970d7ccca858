use anyhow::Result;

use super::api_client;

pub(crate) async fn run_whoami(api_url: &str) -> Result<()> {
    let user = api_client(api_url)?.current_user().await;
    let report = serde_json::json!({
        "signed_in": user.is_some(),
        "is_superuser": user.is_some_and(|u| u.is_superuser),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
