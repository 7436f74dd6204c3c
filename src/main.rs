mod terminal;

use clap::{Parser, Subcommand};
use daily_diary::{ClientConfig, DiaryApi, ReqwestBackend};
use tracing::info;

#[derive(Parser)]
#[command(name = "daily_diary", version, about = "Terminal client for the daily diary service")]
struct Cli {
    /// API root, e.g. http://localhost:8080/api. Overrides DIARY_API_BASE.
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Open the journal and write entries (default)
    Journal,
    /// Check that the diary service answers
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the journal view
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_diary=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base) = cli.api_base {
        config = config.with_api_base(base);
    }
    info!("Using diary API at {}", config.api_base);

    let backend = ReqwestBackend::new(&config);

    match cli.command.unwrap_or(Command::Journal) {
        Command::Ping => {
            let pong = DiaryApi::new(backend).ping().await?;
            println!("{pong}");
        }
        Command::Journal => {
            terminal::run(daily_diary::controller(backend)).await?;
        }
    }
    Ok(())
}
