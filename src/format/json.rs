//! JSON form of a label document.
//!
//! Useful for inspecting a document or handing it to tools that do not speak
//! the label file grammar. References are written as they stand.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::doc::Document;
use crate::error::LabelPlusError;

/// Writes a document to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_json(path: &Path, doc: &Document) -> Result<(), LabelPlusError> {
    let file = File::create(path).map_err(LabelPlusError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, doc).map_err(|source| LabelPlusError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn to_json_string(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

pub fn from_json_str(json: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(json)
}
