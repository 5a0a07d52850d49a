use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rasterlab::{Command, Session, SessionConfig};

#[derive(Parser)]
#[command(name = "rasterlab")]
#[command(about = "In-memory raster image editor driven by text commands")]
struct Cli {
    /// YAML session configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a script file, one command per line
    Run {
        /// Script path
        script: PathBuf,
    },
    /// Read commands from standard input until `quit`
    Shell,
    /// Execute a single command, e.g. `rasterlab exec load koala.ppm koala`
    Exec {
        /// Command tokens
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut session = Session::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Run { script } => {
            let report = session.run_script_to(&script, &mut out)?;
            out.flush()?;
            if !report.is_success() && !session.config().continue_on_error {
                anyhow::bail!("script {} stopped after a failed command", script.display());
            }
        }
        Commands::Shell => {
            let stdin = io::stdin();
            session.interact(stdin.lock(), &mut out)?;
        }
        Commands::Exec { tokens } => {
            let command = Command::parse(&tokens.join(" "))?;
            session.execute_to(&command, &mut out)?;
            if session.config().report_status && !matches!(command, Command::Run { .. }) {
                writeln!(out, "Image {} operation successful.", command)?;
            }
        }
    }

    Ok(())
}
