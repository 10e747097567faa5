use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_api::client::{MemoClient, DEFAULT_URL};
use memo_api::config::{ServerConfig, ServerOverrides};
use memo_api::models::MemoRequest;
use memo_api::{api, db};

#[derive(Parser)]
#[command(name = "memo")]
#[command(about = "Memo management REST API")]
struct Cli {
    /// Base URL of a running server (client commands only)
    #[arg(long, global = true, env = "MEMO_API_URL", default_value = DEFAULT_URL)]
    url: String,

    /// API key: sent as a bearer token by client commands, required by `serve`
    #[arg(long, global = true, env = "MEMO_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List all memos
    List,
    /// Show a single memo
    Get { id: i64 },
    /// Create a memo
    Create { username: String, contents: String },
    /// Overwrite author and contents of a memo
    Update {
        id: i64,
        username: String,
        contents: String,
    },
    /// Delete a memo
    Delete { id: i64 },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "memo_api=debug,tower_http=debug".into()),
    );

    // stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = match &config.db_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };
    db.migrate().context("Failed to migrate database")?;

    if config.security.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    }

    let app = api::create_router_with_security(db, config.security.clone());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Memo API listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = MemoClient::new(cli.url, cli.api_key.clone());

    match cli.command {
        Some(Commands::Serve { host, port, db }) => {
            let config = ServerConfig::from_env().with_overrides(ServerOverrides {
                host,
                port,
                db_path: db,
                api_key: cli.api_key,
            });
            serve(config).await?;
        }
        None => {
            let config = ServerConfig::from_env().with_overrides(ServerOverrides {
                api_key: cli.api_key,
                ..Default::default()
            });
            serve(config).await?;
        }
        Some(Commands::List) => print_json(&client.list_memos().await?)?,
        Some(Commands::Get { id }) => print_json(&client.get_memo(id).await?)?,
        Some(Commands::Create { username, contents }) => {
            let memo = client
                .create_memo(&MemoRequest::new(username, contents))
                .await?;
            print_json(&memo)?;
        }
        Some(Commands::Update {
            id,
            username,
            contents,
        }) => {
            let id = client
                .update_memo(id, &MemoRequest::new(username, contents))
                .await?;
            println!("{}", id);
        }
        Some(Commands::Delete { id }) => {
            let id = client.delete_memo(id).await?;
            println!("{}", id);
        }
    }

    Ok(())
}
