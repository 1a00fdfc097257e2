use super::print::{print_config, print_deck, print_messages};
use super::prompt::TerminalPrompt;
use super::setup::{Cli, Commands, ExportArgs, NoteArgs};
use clap::Parser;
use directories::{BaseDirs, ProjectDirs};
use mochify::api::{configure, MochifyApi};
use mochify::commands::config::ConfigAction;
use mochify::commands::export::Destination;
use mochify::commands::ExportOutcome;
use mochify::config::{ExportConfig, ResolvedConfig};
use mochify::error::{MochifyError, Result};
use mochify::model::DeckNaming;
use mochify::source::fs::FileSource;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CONFIG_DIR_ENV: &str = "MOCHIFY_CONFIG_DIR";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir)?;
    tracing::debug!(config_dir = %config_dir.display(), "using config dir");

    match cli.command {
        Commands::Export(args) => handle_export(&config_dir, args),
        Commands::Preview(args) => handle_preview(&config_dir, args),
        Commands::Config { key, value } => handle_config(&config_dir, key, value),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mochify=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `--config-dir`, then `$MOCHIFY_CONFIG_DIR`, then the platform config dir.
fn resolve_config_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "mochify", "mochify")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| MochifyError::Config("Could not determine config dir".into()))
}

fn home_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Loads settings, saving the home directory as the default location on first use.
fn load_settings(config_dir: &Path, home: &Path) -> Result<ExportConfig> {
    let mut config = ExportConfig::load(config_dir)?;
    if config.default_save_location.is_none() {
        config.default_save_location = Some(home.to_path_buf());
        if let Err(e) = config.save(config_dir) {
            tracing::warn!(error = %e, "could not save default save location");
        }
    }
    Ok(config)
}

/// Settings for one run: saved config plus command-line overrides, never persisted.
fn build_api(config_dir: &Path, args: &NoteArgs) -> Result<MochifyApi<FileSource>> {
    let home = home_dir();
    let mut config = load_settings(config_dir, &home)?;

    if let Some(tag) = &args.tag {
        config.set("card-tag", tag).map_err(MochifyError::Config)?;
    }
    if args.deck_from_front_matter {
        config.deck_naming = DeckNaming::FrontMatter;
    }
    let resolved = ResolvedConfig::resolve(&config, &home)?;

    let source = match &args.vault {
        Some(vault) => FileSource::with_vault(&args.note, vault),
        None => FileSource::new(&args.note),
    };
    Ok(MochifyApi::new(source, resolved, config_dir))
}

fn handle_export(config_dir: &Path, args: ExportArgs) -> Result<()> {
    let api = build_api(config_dir, &args.note)?;
    let destination = match args.out {
        Some(dir) => Destination::Dir(dir),
        None => Destination::Configured,
    };

    let result = api.export(destination, &mut TerminalPrompt::new())?;
    print_messages(&result.messages);

    if let Some(ExportOutcome::Failed) = result.outcome {
        return Err(MochifyError::Api(
            "export failed, run with --verbose for details".into(),
        ));
    }
    Ok(())
}

fn handle_preview(config_dir: &Path, args: NoteArgs) -> Result<()> {
    let api = build_api(config_dir, &args)?;
    let result = api.preview()?;
    let deck_name = result.deck_name.as_deref().unwrap_or_default();
    print_deck(deck_name, &result.cards, &result.media);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = configure(config_dir, action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
