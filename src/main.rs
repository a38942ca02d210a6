use clap::Parser;
use poikatsu::core::config::{self, CliOverrides};
use poikatsu::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "poikatsu", about = "Points loyalty demo in the terminal")]
struct Args {
    /// Starting balance (overrides config and POIKATSU_SEED_BALANCE)
    #[arg(long)]
    balance: Option<i64>,

    /// Log service links instead of opening a browser
    #[arg(long)]
    no_open_links: bool,

    /// Config file to use instead of ~/.poikatsu/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "POIKATSU_LOG", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,

    /// Where to write the log
    #[arg(long, default_value = "poikatsu.log")]
    log_file: PathBuf,
}

fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Initialize file logger - the terminal itself belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .map_err(std::io::Error::other)?;

    let cli = CliOverrides {
        balance: args.balance,
        open_links: args.no_open_links.then_some(false),
    };
    let resolved = config::resolve(&file_config, &cli).map_err(std::io::Error::other)?;

    log::info!(
        "Poikatsu starting up with balance {} ({} history entries)",
        resolved.seed.balance,
        resolved.seed.history.len()
    );

    tui::run(resolved)
}
