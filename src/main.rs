use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantcare::{api, db};

#[derive(Parser)]
#[command(name = "plantcare")]
#[command(about = "Household plant inventory and care log services")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the plant registry service
    Plants {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "5001")]
        port: u16,

        /// Path to the SQLite database (defaults to the platform data dir)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Serve the care log service
    Care {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "5002")]
        port: u16,

        /// Path to the SQLite database (defaults to the platform data dir)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "plantcare=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(app: axum::Router, port: u16, service: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tracing::info!("{service} listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plants { port, db: path } => {
            let store = match path {
                Some(path) => db::PlantStore::open(path)?,
                None => db::PlantStore::open_default()?,
            };
            store.migrate()?;

            serve(api::plants_router(store), port, "plant registry").await?;
        }
        Commands::Care { port, db: path } => {
            let store = match path {
                Some(path) => db::CareStore::open(path)?,
                None => db::CareStore::open_default()?,
            };
            store.migrate()?;

            serve(api::care_router(store), port, "care log").await?;
        }
    }

    Ok(())
}
