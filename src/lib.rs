//! LabelPlus: reader and writer for translation label files.
//!
//! A label file records, for each image of a comic or scan, a list of text
//! labels positioned by percentage coordinates. This crate parses the
//! line-oriented text format into a [`doc::Document`], lets callers edit it
//! through a [`doc::LabelStore`], and writes it back, expanding `=N`
//! back-references on the way out.
//!
//! # Modules
//!
//! - [`doc`]: Document model and the editing store with change notifications
//! - [`format`]: Line classifier, parser, reference resolver, and writer
//! - [`summary`]: Document statistics for reporting
//! - [`error`]: Error types for labelplus operations

pub mod doc;
pub mod error;
pub mod format;
pub mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use error::LabelPlusError;

use doc::LabelStore;
use format::{OpenCcCommand, SaveOptions, TextTransform};

/// The labelplus CLI application.
#[derive(Parser)]
#[command(name = "labelplus")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create a new label file for a set of images.
    New(NewArgs),
    /// Parse a label file and print a summary.
    Check(CheckArgs),
    /// Rewrite a label file canonically, expanding `=N` references.
    Fmt(FmtArgs),
    /// Write a label file as JSON.
    Export(ExportArgs),
}

/// Arguments for the new subcommand.
#[derive(clap::Args)]
struct NewArgs {
    /// Output label file.
    output: PathBuf,

    /// Image file name to add (repeatable).
    #[arg(long = "image", required = true)]
    images: Vec<String>,

    /// Group name (repeatable). Defaults to the standard two groups.
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Comment for the header block.
    #[arg(long)]
    comment: Option<String>,

    #[command(flatten)]
    save: SaveArgs,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    /// Label file to check.
    input: PathBuf,

    /// Output format for the summary ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the fmt subcommand.
#[derive(clap::Args)]
struct FmtArgs {
    /// Label file to rewrite.
    input: PathBuf,

    /// Write to this path instead of rewriting the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    save: SaveArgs,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Label file to export.
    input: PathBuf,

    /// Output JSON file.
    #[arg(short, long)]
    output: PathBuf,
}

/// Options shared by commands that write label files.
#[derive(clap::Args)]
struct SaveArgs {
    /// Do not write a UTF-8 byte-order mark.
    #[arg(long)]
    no_bom: bool,

    /// OpenCC executable used for script conversion.
    #[arg(long, env = "LABELPLUS_OPENCC", default_value = "opencc")]
    opencc: PathBuf,

    /// OpenCC profile (e.g. 's2twp.json'). Conversion is off when unset.
    #[arg(long, env = "LABELPLUS_OPENCC_CONFIG")]
    opencc_config: Option<String>,
}

impl SaveArgs {
    fn converter(&self) -> Option<OpenCcCommand> {
        self.opencc_config
            .as_ref()
            .map(|config| OpenCcCommand::new(&self.opencc, config))
    }
}

/// Run the labelplus CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelPlusError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::New(args)) => run_new(args),
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Fmt(args)) => run_fmt(args),
        Some(Commands::Export(args)) => run_export(args),
        None => {
            println!("labelplus {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Reader and writer for LabelPlus label files.");
            println!();
            println!("Run 'labelplus --help' for usage information.");
            Ok(())
        }
    }
}

fn run_new(args: NewArgs) -> Result<(), LabelPlusError> {
    let groups = if args.groups.is_empty() {
        format::defaults::default_groups()
    } else {
        args.groups
    };

    let mut store = LabelStore::detached(groups);
    if let Some(comment) = args.comment {
        store.set_comment(comment);
    }
    for image in &args.images {
        store.add_file(image)?;
    }

    let converter = args.save.converter();
    save_with(&mut store, &args.output, &args.save, converter.as_ref())?;
    println!(
        "Created {} with {} file(s)",
        args.output.display(),
        args.images.len()
    );
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), LabelPlusError> {
    let doc = format::read_label_file(&args.input)?;
    let summary = summary::summarize(&doc);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&summary).map_err(|source| {
                LabelPlusError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{json}");
        }
        "text" => print!("{summary}"),
        other => {
            return Err(LabelPlusError::UnsupportedFormat(format!(
                "'{other}' (supported: text, json)"
            )));
        }
    }
    Ok(())
}

fn run_fmt(args: FmtArgs) -> Result<(), LabelPlusError> {
    let mut store = LabelStore::detached(Vec::new());
    store.load(&args.input)?;

    let output = args.output.as_ref().unwrap_or(&args.input);
    let converter = args.save.converter();
    save_with(&mut store, output, &args.save, converter.as_ref())?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<(), LabelPlusError> {
    let doc = format::read_label_file(&args.input)?;
    format::json::write_json(&args.output, &doc)?;
    println!("Exported {} to {}", args.input.display(), args.output.display());
    Ok(())
}

fn save_with(
    store: &mut LabelStore,
    path: &std::path::Path,
    args: &SaveArgs,
    converter: Option<&OpenCcCommand>,
) -> Result<(), LabelPlusError> {
    let opts = SaveOptions {
        byte_order_mark: !args.no_bom,
        transform: converter.map(|c| c as &dyn TextTransform),
    };
    store.save(path, &opts)
}
