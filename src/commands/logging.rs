use clap::Args;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    // Configuration file (TOML, YAML or JSON; extension optional)
    #[arg(short, long, default_value = "assets/config")]
    pub config: PathBuf,

    // Send log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    // Log every scan attempt
    #[arg(short, long)]
    pub verbose: bool,
}

/// Installs the global tracing subscriber for one CLI run.
pub fn init(args: &CommonArgs) -> std::io::Result<()> {
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .compact()
                .with_ansi(false)
                .with_max_level(level)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .compact()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
