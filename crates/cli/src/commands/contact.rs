use anyhow::{Result, bail};
use folio_core::ContactMessage;
use folio_query::{ContactForm, SubmitStatus};

use super::api_client;

pub(crate) async fn run_contact(
    api_url: &str,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<()> {
    let client = api_client(api_url)?;
    let mut form = ContactForm::new(ContactMessage { name, email, subject, message });
    match form.submit(&client).await {
        SubmitStatus::Sent(msg) => println!("{msg}"),
        SubmitStatus::Failed(msg) => bail!("{msg}"),
        SubmitStatus::Idle | SubmitStatus::Submitting => {},
    }
    Ok(())
}
