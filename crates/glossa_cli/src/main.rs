//! glossa CLI
//!
//! Commands:
//! - `glossa translate <ID> [-l LOCALE] [-p name=value]... [-d DIR]... [-w STYLE]`
//! - `glossa category <LOCALE> <NUMBER>`
//! - `glossa rules <TEMPLATE>`

mod args;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use glossa_i18n::{category_count, normalize_locale, plural_category, RuleSet};

use crate::args::{Arguments, Command, TranslateArgs};
use crate::config::GlossaConfig;

fn main() -> Result<()> {
    let args = Arguments::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match args.command {
        Command::Translate(cmd) => translate(args.config.as_deref(), cmd),
        Command::Category { locale, number } => {
            let locale = normalize_locale(&locale);
            println!(
                "{} (of {})",
                plural_category(number, &locale),
                category_count(&locale)
            );
            Ok(())
        }
        Command::Rules { template } => {
            for rule in RuleSet::compile(&template).rules() {
                println!("{rule}");
            }
            Ok(())
        }
    }
}

fn translate(config_path: Option<&std::path::Path>, cmd: TranslateArgs) -> Result<()> {
    let mut config = GlossaConfig::load_or_default(config_path)?;
    if !cmd.dirs.is_empty() {
        config.catalog.dirs = cmd.dirs;
    }
    if let Some(wrapper) = cmd.wrapper {
        config.translator.wrapper = wrapper;
    }
    debug!(?config, "resolved configuration");

    let translator = config.translator()?;
    let params: Vec<(&str, _)> = cmd
        .params
        .iter()
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect();
    println!(
        "{}",
        translator.translate(&cmd.identifier, &params, cmd.locale.as_deref())
    );
    Ok(())
}
