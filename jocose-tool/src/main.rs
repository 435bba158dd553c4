mod config;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jocose_core::{Config, pipeline};
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, load_config, resolve};

#[derive(Parser)]
#[command(name = "jox")]
#[command(about = "Extract label-filtered excerpts with context from conversation trees", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/jocose/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Select matching messages plus context and write them out
    Extract {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output JSONL file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report what an extraction would select, without writing
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Input JSONL file, one message per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Language code messages must carry
    #[arg(long)]
    lang: Option<String>,

    /// Rating label to filter on
    #[arg(long)]
    label: Option<String>,

    /// Minimum label value (inclusive)
    #[arg(long)]
    threshold: Option<f64>,
}

impl FilterArgs {
    fn into_overrides(self, output: Option<PathBuf>) -> Overrides {
        Overrides {
            input: self.input,
            output,
            lang: self.lang,
            label: self.label,
            threshold: self.threshold,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Extract { filter, output } => {
            let config = resolve(filter.into_overrides(output), file);
            let summary = pipeline::run(&config)?;

            print_found(&config, summary.matched);
            println!(
                "Wrote {} lines (matches + parents/children) to: {}",
                summary.written,
                config.output_path.display()
            );
        }
        Command::Stats { filter } => {
            let config = resolve(filter.into_overrides(None), file);
            let summary = pipeline::dry_run(&config)?;

            println!("Loaded {} messages ({} roots).", summary.loaded, summary.roots);
            print_found(&config, summary.matched);
            println!(
                "Would write {} lines (matches + parents/children).",
                summary.written
            );
        }
    }

    Ok(())
}

fn print_found(config: &Config, matched: usize) {
    println!(
        "Found {} {} messages with {} >= {}.",
        matched, config.filter.language, config.filter.label, config.filter.threshold
    );
}
