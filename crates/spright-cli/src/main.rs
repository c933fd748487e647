//! Spright CLI
//!
//! Command-line host for spright configuration files: inspects subjects and properties and
//! applies property edits as minimal patches, the way an editor's property panel would.

mod commands;
mod selector;

use clap::{Parser, Subcommand, ValueEnum};
use selector::SubjectSelector;
use spright_core::InputType;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "spright")]
#[command(about = "Inspect and edit spright sprite-sheet configuration files")]
#[command(version = spright_core::VERSION)]
#[command(
    long_about = "Reads and edits spright configuration files through the same model the editor \
uses. Every edit is written back as a single minimal patch, printed as JSON.\n\
\n\
Subjects are addressed as sheet:N, input:N or sprite:I.J (zero-based).\n\
\n\
Examples:\n  \
spright outline sheet.conf\n  \
spright get sheet.conf input:0 grid\n  \
spright set sheet.conf input:0 grid 32 32\n  \
spright input-type sheet.conf input:0 atlas\n  \
spright sprite-id sheet.conf sprite:0.1 walk"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Options file (JSON)
    #[arg(short, long, global = true, help = "Path to a JSON options file")]
    options: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the structural outline
    Outline {
        /// Configuration file
        file: PathBuf,
    },

    /// List all subjects with their selectors and lines
    Subjects {
        /// Configuration file
        file: PathBuf,
    },

    /// Print direct, inherited and effective parameters of a property
    Get {
        /// Configuration file
        file: PathBuf,
        /// Subject selector
        subject: SubjectSelector,
        /// Property name
        property: String,
    },

    /// Set a direct property
    Set {
        /// Configuration file
        file: PathBuf,
        /// Subject selector
        subject: SubjectSelector,
        /// Property name
        property: String,
        /// Property parameters
        parameters: Vec<String>,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a direct property
    Remove {
        /// Configuration file
        file: PathBuf,
        /// Subject selector
        subject: SubjectSelector,
        /// Property name
        property: String,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove everything below a subject
    Clear {
        /// Configuration file
        file: PathBuf,
        /// Subject selector
        subject: SubjectSelector,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a subject and everything below it
    Delete {
        /// Configuration file
        file: PathBuf,
        /// Subject selector
        subject: SubjectSelector,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print or change the layout type of an input
    InputType {
        /// Configuration file
        file: PathBuf,
        /// Input selector
        subject: SubjectSelector,
        /// New type
        #[arg(value_enum)]
        new_type: Option<InputTypeArg>,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print or change the id of a sprite
    SpriteId {
        /// Configuration file
        file: PathBuf,
        /// Sprite selector
        subject: SubjectSelector,
        /// New id
        id: Option<String>,
        /// Print the patch without writing the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the patch that turns one file into another
    Diff {
        /// Current file
        current: PathBuf,
        /// Proposed file
        proposed: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputTypeArg {
    Sprite,
    Atlas,
    Grid,
    GridVertical,
    GridCells,
    GridCellsVertical,
}

impl From<InputTypeArg> for InputType {
    fn from(arg: InputTypeArg) -> Self {
        match arg {
            InputTypeArg::Sprite => InputType::Sprite,
            InputTypeArg::Atlas => InputType::Atlas,
            InputTypeArg::Grid => InputType::Grid,
            InputTypeArg::GridVertical => InputType::GridVertical,
            InputTypeArg::GridCells => InputType::GridCells,
            InputTypeArg::GridCellsVertical => InputType::GridCellsVertical,
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default = match verbose {
        0 => "spright=info",
        1 => "spright=debug",
        _ => "spright=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
