use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use manila_services::{api, config::WeatherConfig, db, weather::WeatherService};

const DEFAULT_HOST: &str = "127.0.0.1";
const WEATHER_PORT: u16 = 5001;
const CRUD_PORT: u16 = 5000;

#[derive(Parser)]
#[command(name = "manila")]
#[command(about = "City weather aggregator and company CRUD API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the weather page and JSON API
    Weather {
        /// Port for HTTP
        #[arg(short, long, default_value_t = WEATHER_PORT)]
        port: u16,

        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
    },
    /// Serve the token-guarded CRUD API
    Crud {
        /// Port for HTTP
        #[arg(short, long, default_value_t = CRUD_PORT)]
        port: u16,

        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// SQLite database file (overrides DB_PATH)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "manila_services=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve_weather(host: &str, port: u16) -> anyhow::Result<()> {
    let service = WeatherService::new(WeatherConfig::from_env());
    let app = api::create_weather_router(service);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Weather service listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_crud(host: &str, port: u16, db_path: Option<PathBuf>) -> anyhow::Result<()> {
    let db = match db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_crud_router(db);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("CRUD service listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Weather { port, host }) => {
            tracing::info!("Starting weather service on port {}", port);
            serve_weather(&host, port).await?;
        }
        Some(Commands::Crud { port, host, db }) => {
            tracing::info!("Starting CRUD service on port {}", port);
            serve_crud(&host, port, db).await?;
        }
        None => {
            // Default: both services on their default ports
            tracing::info!("Starting weather and CRUD services");
            tokio::try_join!(
                serve_weather(DEFAULT_HOST, WEATHER_PORT),
                serve_crud(DEFAULT_HOST, CRUD_PORT, None),
            )?;
        }
    }

    Ok(())
}
