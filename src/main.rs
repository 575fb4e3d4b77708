use clap::Parser;
use kbacklog::cli::commands::{Cli, Commands, UserAction};
use kbacklog::config::Config;
use kbacklog::domain::values::window::{parse_date, StatsWindow};
use kbacklog::infrastructure::http::{self, AppState};
use kbacklog::KnowledgeBacklog;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let backlog = match KnowledgeBacklog::open(&config.db_path) {
        Ok(backlog) => backlog,
        Err(e) => {
            eprintln!("Error initializing kbacklog: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(backlog, config, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` filters, `LOG_FORMAT=json` switches to structured output.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kbacklog=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    let json = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_command(
    backlog: KnowledgeBacklog,
    mut config: Config,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if !config.seed_users.is_empty() {
                let added = backlog.seed_users(config.seed_users.clone()).await?;
                tracing::info!(added, "seeded authorized users");
            }
            if config.admin_users.is_empty() {
                tracing::warn!("KB_ADMIN_USERS is empty; admin routes will reject every caller");
            }
            let listener = tokio::net::TcpListener::bind(config.bind).await?;
            let state = Arc::new(AppState { backlog, config });
            http::serve(listener, state).await?;
        }
        Commands::Stats { from, to } => {
            let start = from.as_deref().map(parse_date).transpose()?;
            let end = to.as_deref().map(parse_date).transpose()?;
            let report = backlog.stats_report(StatsWindow::new(start, end)).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Articles => {
            let articles = backlog.articles().await?;
            println!("{}", serde_json::to_string_pretty(&articles)?);
        }
        Commands::Tags => {
            for tag in backlog.tags().await? {
                println!("{}\t{}", tag.id, tag.name);
            }
        }
        Commands::Users { action } => match action {
            UserAction::List => {
                for user in backlog.users().await? {
                    println!("{}\t{}", user.username, user.added_at.to_rfc3339());
                }
            }
            UserAction::Add { username } => {
                let user = backlog.add_user(&username).await?;
                println!("Authorized {}", user.username);
            }
            UserAction::Remove { username } => {
                if backlog.remove_user(&username).await? {
                    println!("Removed {username}");
                } else {
                    return Err(format!("User not found in authorized list: {username}").into());
                }
            }
        },
        Commands::Clear { yes } => {
            if !yes {
                return Err("Refusing to clear the database without --yes".into());
            }
            let report = backlog.clear_database().await?;
            println!(
                "Cleared {} articles, {} tags, {} links",
                report.articles, report.tags, report.links
            );
        }
    }
    Ok(())
}
