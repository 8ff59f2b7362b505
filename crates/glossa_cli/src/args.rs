//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Render a message identifier from the configured catalogs
//! - `category`: Print the plural category of a number in a locale
//! - `rules`: Print the compiled plural rules of a template

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use glossa_i18n::ArgValue;

#[derive(Debug, Parser)]
#[command(name = "glossa", author, version, about, long_about = None)]
pub struct Arguments {
    /// Path to glossa.toml (default: ./glossa.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Message identifier (`domain:key` or `key`)
    pub identifier: String,

    /// Locale to translate into (overrides config file)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Parameter as `name=value`; numeric values become numbers
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, ArgValue)>,

    /// Catalog directory (overrides config file, repeatable)
    #[arg(short, long = "dir")]
    pub dirs: Vec<PathBuf>,

    /// Placeholder convention: `percent` or `colon` (overrides config file)
    #[arg(short, long)]
    pub wrapper: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a message identifier
    Translate(TranslateArgs),
    /// Print the plural category index of a number
    Category {
        locale: String,
        #[arg(allow_negative_numbers = true)]
        number: i64,
    },
    /// Print compiled plural rules in evaluation order
    Rules { template: String },
}

/// Parse `name=value`. Values that read as integers or decimals are numeric.
pub fn parse_param(s: &str) -> Result<(String, ArgValue), String> {
    let Some((name, value)) = s.split_once('=') else {
        return Err(format!("expected `name=value`, got `{s}`"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("parameter name is empty".to_string());
    }
    let value = if let Ok(i) = value.parse::<i64>() {
        ArgValue::Int(i)
    } else if let Ok(f) = value.parse::<f64>() {
        ArgValue::Float(f)
    } else {
        ArgValue::Str(value.to_string())
    };
    Ok((name.to_string(), value))
}
