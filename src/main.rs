use clap::Parser;
use ghx::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ghx", version, about = "Search GitHub users and browse their repositories")]
struct Args {
    /// Username query to search for on start
    query: Option<String>,

    /// GitHub API base URL (overrides GHX_BASE_URL and the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Where to write the log file
    #[arg(long, default_value = "ghx.log", value_name = "PATH")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so logs go to a file.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::GhxConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
        },
    );

    log::info!("ghx starting up against {}", resolved.base_url);

    ghx::tui::run(resolved, args.query)
}
