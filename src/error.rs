use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelplus operations.
///
/// Only whole-document operations (load, save, export) surface this type.
/// Per-item edits on a [`LabelStore`](crate::doc::LabelStore) report
/// [`StoreError`] instead.
#[derive(Debug, Error)]
pub enum LabelPlusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse label file {path}: {source}")]
    LabelFileParse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    ReferenceCycle(#[from] ReferenceCycleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Structural problems in a label file.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing header blocks")]
    MissingHeaderBlocks,

    #[error("unsupported version: major version {found} is newer than {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid version component '{0}'")]
    InvalidVersion(String),

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("document has no file sections")]
    NoFileSections,
}

/// A [`FormatError`] annotated with where the parser was when it failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line} (state={state}, file='{file}'): {kind}")]
pub struct ParseError {
    /// 1-based line number of the line being processed.
    pub line: usize,
    /// Name of the parser state at that line.
    pub state: &'static str,
    /// The file section being read, empty before the first file marker.
    pub file: String,
    #[source]
    pub kind: FormatError,
}

/// Reference resolution did not reach a fixed point.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("reference cycle in '{file}': no fixed point after {passes} passes")]
pub struct ReferenceCycleError {
    pub file: String,
    pub passes: usize,
}

/// Negative result of a per-item store operation. Nothing was mutated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("file '{0}' not found")]
    FileNotFound(String),

    #[error("file '{0}' already exists")]
    DuplicateFile(String),

    #[error("label index {index} out of range for '{file}' ({len} label(s))")]
    IndexOutOfRange {
        file: String,
        index: usize,
        len: usize,
    },
}

/// Failure of an optional text transform. Never escapes a save.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: PathBuf,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("transform produced invalid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
