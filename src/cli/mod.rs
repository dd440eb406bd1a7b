//! Command-line interface for sting
//!
//! Flags may also come from `STING_*` environment variables or a `.sting`
//! config file in the current or home directory.

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use snakecharmer::{ConfigBinder, FlagSet};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ENV_PREFIX: &str = "STING";
const CONFIG_NAME: &str = ".sting";

/// Print your favorite color and a magic number, wherever they were configured
#[derive(Parser)]
#[command(name = "sting")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Your favorite color
    #[arg(short = 'c', long, default_value = "blue")]
    favorite_color: String,

    /// The magic number
    #[arg(short, long, default_value_t = 7)]
    number: i64,

    /// Config file to load instead of searching for .sting.{json,toml,yaml,yml,dotenv,env,ini}
    #[arg(long, value_name = "PATH")]
    conf: Option<PathBuf>,

    /// Print the resolved flags and where each value came from as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let command = Cli::command();
    let matches = command.clone().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    // Logging is already configured and the config path already chosen, so
    // neither may be overridden by the sources they select.
    let mut flags = FlagSet::from_clap(&command, &matches);
    flags.remove("verbose");
    flags.remove("conf");

    let binder = ConfigBinder::new(ENV_PREFIX, CONFIG_NAME);
    binder.bind(&mut flags, cli.conf.as_deref()).context("Failed to load sting configuration")?;

    if flags.get::<bool>("json").unwrap_or(cli.json) {
        println!("{}", serde_json::to_string_pretty(&flags)?);
        return Ok(());
    }

    let color = flags.value("favorite-color").unwrap_or(&cli.favorite_color);
    let number = flags.get::<i64>("number").unwrap_or(cli.number);
    println!("Your favorite color is: {}", color);
    println!("The magic number is: {}", number);

    Ok(())
}
