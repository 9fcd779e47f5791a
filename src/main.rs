//! CLI for Podium
//!
//! Subcommands:
//! - `config`: show the effective settings, or write the defaults to a file
//! - `tokenize`: show the tokens a poll or word cloud extracts from text
//! - `replay`: count a saved chat log and print the results

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use podium::config::{Settings, load_config};
use podium::presentation::{Replay, language_tokenizer, parse_export, word_tokenizer};
use podium::tokenizer::Tokenize;
use podium::utils::logging;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config/default.json";

#[derive(Parser)]
#[command(name = "podium", version, about = "Live presentation broadcast and aggregation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration as JSON
    Config {
        /// Write the default configuration to config/default.json
        #[arg(short, long)]
        write: bool,
        /// Overwrite an existing configuration file
        #[arg(short, long, requires = "write")]
        force: bool,
    },
    /// Print the tokens extracted from some text
    Tokenize {
        #[arg(value_enum)]
        tokenizer: TokenizerKind,
        text: String,
    },
    /// Replay a saved chat log through the language poll and word cloud
    Replay { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum TokenizerKind {
    /// Language poll keywords
    Poll,
    /// Word cloud words
    Words,
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            std::process::exit(2);
        }
    };
    logging::init(&settings.log.level);

    let result = match cli.command {
        Command::Config { write, force } => run_config(&settings, write, force),
        Command::Tokenize { tokenizer, text } => run_tokenize(&settings, tokenizer, &text),
        Command::Replay { file } => run_replay(&settings, &file),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run_config(settings: &Settings, write: bool, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !write {
        println!("{}", serde_json::to_string_pretty(settings)?);
        return Ok(());
    }

    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() && !force {
        return Err(format!("{DEFAULT_CONFIG_PATH} already exists, use --force to overwrite").into());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, serde_json::to_string_pretty(&Settings::default())?)?;
    info!("Wrote default configuration to {DEFAULT_CONFIG_PATH}");
    Ok(())
}

fn run_tokenize(
    settings: &Settings,
    kind: TokenizerKind,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = match kind {
        TokenizerKind::Poll => language_tokenizer(&settings.language_poll)?.tokenize(text),
        TokenizerKind::Words => word_tokenizer(&settings.word_cloud)?.tokenize(text),
    };
    println!("{}", serde_json::to_string(&tokens)?);
    Ok(())
}

fn run_replay(settings: &Settings, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(file)?;
    let lines = parse_export(&contents)?;
    info!("Replaying {} chat lines from {}", lines.len(), file.display());

    let mut replay = Replay::new(settings)?;
    replay.feed_all(&lines)?;
    println!("{}", serde_json::to_string_pretty(&replay.finish())?);
    Ok(())
}
