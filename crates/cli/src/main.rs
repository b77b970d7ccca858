use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_client::API_URL_ENV;
use folio_core::DEFAULT_API_URL;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::FilterArgs;

#[derive(Parser)]
#[command(name = "folio", version)]
#[command(about = "Browse portfolio projects and send contact messages", long_about = None)]
struct Cli {
    /// Base URL of the portfolio API
    #[arg(long, global = true, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the project catalogue
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Convert between filter selections and URL query strings (offline)
    #[command(subcommand)]
    Filters(FiltersCommand),
    /// Send a contact-form message
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Report whether the current session is privileged
    Whoami,
}

#[derive(Subcommand)]
enum ProjectsCommand {
    /// One page of projects matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Every project matching the filters, loading pages until exhausted
    All {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// A single project by slug
    Get { slug: String },
}

#[derive(Subcommand)]
enum FiltersCommand {
    /// Print the canonical query string for a selection
    Encode {
        #[command(flatten)]
        filters: FilterArgs,
        /// Existing query string whose unrelated parameters are kept
        #[arg(long)]
        into: Option<String>,
    },
    /// Print the selection encoded in a query string as JSON
    Decode { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Projects(ProjectsCommand::List { filters, page }) => {
            commands::projects::run_list(&cli.api_url, &filters, page).await?;
        },
        Commands::Projects(ProjectsCommand::All { filters }) => {
            commands::projects::run_all(&cli.api_url, &filters).await?;
        },
        Commands::Projects(ProjectsCommand::Get { slug }) => {
            commands::projects::run_get(&cli.api_url, &slug).await?;
        },
        Commands::Filters(FiltersCommand::Encode { filters, into }) => {
            commands::filters::run_encode(&filters, into.as_deref())?;
        },
        Commands::Filters(FiltersCommand::Decode { query }) => {
            commands::filters::run_decode(&query)?;
        },
        Commands::Contact { name, email, subject, message } => {
            commands::contact::run_contact(&cli.api_url, name, email, subject, message).await?;
        },
        Commands::Whoami => {
            commands::users::run_whoami(&cli.api_url).await?;
        },
    }

    Ok(())
}
