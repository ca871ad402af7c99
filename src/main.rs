use clap::Parser;
use lira::core::config::{CliOverrides, LiraConfig, load_config, resolve};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lira", about = "Terminal reader for structured books")]
struct Args {
    /// Directory holding one sub-directory per book
    books_dir: Option<PathBuf>,

    /// Width of the navigation panel in columns
    #[arg(long)]
    nav_width: Option<u16>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The logger isn't up yet, so config problems go to stderr as well.
    let file_config = load_config().unwrap_or_else(|e| {
        eprintln!("lira: {e}; using defaults");
        LiraConfig::default()
    });
    let config = resolve(
        &file_config,
        &CliOverrides {
            books_dir: args.books_dir,
            nav_width: args.nav_width,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - writes to lira.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("lira.log") {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!("Lira starting up with books from {}", config.books_dir.display());
    log::debug!("Resolved config: {:?}", config);

    lira::tui::run(config)
}
