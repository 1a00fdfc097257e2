use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "mochify", bin_name = "mochify", version = get_version())]
#[command(about = "Export tagged flashcards from markdown notes as Mochi decks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding config.json (defaults to the per-user config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a note's cards as <deck>.mochi
    Export(ExportArgs),

    /// List the cards a note would export, without writing anything
    Preview(NoteArgs),

    /// Show or change settings
    Config {
        /// Setting to show or change
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Markdown note to read cards from
    pub note: PathBuf,

    /// Collection root searched for embedded files (defaults to the note's directory)
    #[arg(long, value_name = "DIR")]
    pub vault: Option<PathBuf>,

    /// Card tag for this run, without '#'
    #[arg(long)]
    pub tag: Option<String>,

    /// Name the deck from the note's `deck` front matter field
    #[arg(long)]
    pub deck_from_front_matter: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub note: NoteArgs,

    /// Write the archive into this directory without asking
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}
