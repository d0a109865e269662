use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vshell::ShellConfig;

/// Shell emulator over a virtual filesystem
#[derive(Parser, Debug)]
#[command(name = "vshell", version)]
#[command(about = "Shell emulator with script playback and an interactive prompt")]
struct Args {
    /// Virtual filesystem location shown in the prompt
    #[arg(long = "vfs", value_name = "PATH")]
    vfs_path: Option<String>,

    /// Script to run instead of the interactive prompt
    #[arg(long, short, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Print a trace line for every script line
    #[arg(long, short)]
    debug: bool,

    /// TOML config file; flags override its values
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not load or save interactive history
    #[arg(long)]
    no_history: bool,
}

impl Args {
    fn into_config(self) -> Result<ShellConfig> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => ShellConfig::default(),
        };
        if let Some(vfs_path) = self.vfs_path {
            config.vfs_path = vfs_path;
        }
        if self.script.is_some() {
            config.script = self.script;
        }
        config.debug |= self.debug;
        if self.no_history {
            config.history = false;
        }
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // diagnostics go to stderr so they never mix with the transcript
    let default_filter = if args.debug { "vshell=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = args.into_config()?;
    let mut stdout = io::stdout();
    let outcome = vshell::run(&config, &mut stdout)?;
    tracing::info!(?outcome, "session ended");
    Ok(())
}
