use anyhow::Result;
use folio_query::{InfiniteProjects, ProjectsQueries, QueryConfig};

use super::{FilterArgs, api_client};

fn queries(api_url: &str) -> Result<ProjectsQueries> {
    Ok(ProjectsQueries::new(api_client(api_url)?, QueryConfig::from_env()))
}

pub(crate) async fn run_list(api_url: &str, args: &FilterArgs, page: u32) -> Result<()> {
    let filters = args.to_filters();
    let page = queries(api_url)?.list(&filters, page).await?;
    println!("{}", serde_json::to_string_pretty(&*page)?);
    Ok(())
}

pub(crate) async fn run_all(api_url: &str, args: &FilterArgs) -> Result<()> {
    let mut infinite = InfiniteProjects::new(queries(api_url)?, args.to_filters());
    while infinite.fetch_next_page().await? {
        tracing::info!(
            loaded = infinite.items().count(),
            total = infinite.total_count().unwrap_or_default(),
            "loaded page {}",
            infinite.pages().len()
        );
    }
    let items: Vec<_> = infinite.items().collect();
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

pub(crate) async fn run_get(api_url: &str, slug: &str) -> Result<()> {
    match queries(api_url)?.detail(slug).await {
        Ok(project) => println!("{}", serde_json::to_string_pretty(&*project)?),
        Err(e) if e.is_not_found() => println!("Project not found: {slug}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
