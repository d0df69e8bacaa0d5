use clap::Parser;

mod client;
mod logging;
mod serve;

use client::ClientArgs;
use logging::{init_logging, LogFormat};
use serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "News publishing service over gRPC", long_about = None)]
pub struct Cli {
    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, env = "NEWS_LOG_LEVEL", default_value = "info")]
    log_level: String,
    #[arg(long, global = true, env = "NEWS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the gRPC server
    Serve(ServeArgs),
    /// Talk to a running server
    Client(ClientArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Client(args) => client::run(args).await,
    }
}
