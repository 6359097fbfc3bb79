use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use nodescope_config::{
    locate, ConfigFile, PlatformSearchRoots, SearchRoots, TelemetryConfig, DEFAULT_FILE_NAME,
};
use nodescope_telemetry::log_selection;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the directories probed for the configuration file, in order
    SearchPaths,
    /// Print the directory holding the configuration file
    Locate(ConfigArgs),
    /// Load and validate the configuration
    Check(CheckArgs),
    /// Map a raw queue or message type name to its display label
    Label(LabelArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Configuration file name, relative path or absolute path
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    pub config: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Print the normalized configuration as YAML
    #[arg(long)]
    pub print: bool,
}

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct LabelTarget {
    /// Raw queue name
    #[arg(long)]
    pub queue: Option<String>,
    /// Raw message type name
    #[arg(long)]
    pub message_type: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LabelArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    #[command(flatten)]
    pub target: LabelTarget,
}

pub fn run_command<R, W>(cli: Cli, roots: &R, out: &mut W) -> anyhow::Result<()>
where
    R: SearchRoots + ?Sized,
    W: Write,
{
    match cli.command {
        Commands::SearchPaths => {
            for directory in roots.directories() {
                writeln!(out, "{}", directory.display())?;
            }
        }
        Commands::Locate(args) => {
            let directory = locate(&args.config, roots)?;
            writeln!(out, "{}", directory.display())?;
        }
        Commands::Check(args) => {
            let directory = locate(&args.config.config, roots)?;
            let file = ConfigFile::new(directory, &args.config.config);
            let config = TelemetryConfig::from_source(&file)?;
            config.queue_labels()?;
            config.message_type_labels()?;
            log_selection(&config);

            if args.print {
                let yaml = serde_yaml::to_string(&config).context("serializing configuration")?;
                write!(out, "{yaml}")?;
            } else {
                writeln!(out, "{}: ok", file.path().display())?;
            }
        }
        Commands::Label(args) => {
            let config = TelemetryConfig::load_from(&args.config.config, roots)?;
            let (mapper, raw) = match (&args.target.queue, &args.target.message_type) {
                (Some(queue), _) => (config.queue_labels()?, queue),
                (None, Some(message_type)) => (config.message_type_labels()?, message_type),
                (None, None) => anyhow::bail!("either --queue or --message-type is required"),
            };
            writeln!(out, "{}", mapper.map_or_raw(raw))?;
        }
    }
    Ok(())
}

/// Runs `cli` against the platform search roots, writing to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    run_command(cli, &PlatformSearchRoots::default(), &mut stdout.lock())
}
