//! Reading and writing label files on disk.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::convert::{apply_transform, TextTransform};
use super::parser::parse_label_str;
use super::writer::to_label_string;
use crate::doc::Document;
use crate::error::LabelPlusError;

/// Options for [`write_label_file`].
#[derive(Clone, Copy)]
pub struct SaveOptions<'a> {
    /// Prefix the file with a UTF-8 byte-order mark.
    pub byte_order_mark: bool,
    /// Applied to the rendered text; failures are ignored.
    pub transform: Option<&'a dyn TextTransform>,
}

impl Default for SaveOptions<'_> {
    fn default() -> Self {
        Self {
            byte_order_mark: true,
            transform: None,
        }
    }
}

impl std::fmt::Debug for SaveOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveOptions")
            .field("byte_order_mark", &self.byte_order_mark)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Reads a label file.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD rather than rejected.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid label file.
pub fn read_label_file(path: &Path) -> Result<Document, LabelPlusError> {
    let bytes = fs::read(path).map_err(LabelPlusError::Io)?;
    let text = String::from_utf8_lossy(&bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(path = %path.display(), "label file is not valid UTF-8, replacing bad bytes");
    }
    let doc = parse_label_str(&text).map_err(|source| LabelPlusError::LabelFileParse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        files = doc.files.len(),
        labels = doc.label_count(),
        "read label file"
    );
    Ok(doc)
}

/// Writes a label file, resolving references in `doc` first.
///
/// # Errors
/// Returns an error on a reference cycle or if the file cannot be written.
/// Nothing is written when resolution fails.
pub fn write_label_file(
    path: &Path,
    doc: &mut Document,
    opts: &SaveOptions<'_>,
) -> Result<(), LabelPlusError> {
    let text = to_label_string(doc)?;
    let text = apply_transform(text, opts.transform);

    let file = File::create(path).map_err(LabelPlusError::Io)?;
    let mut writer = BufWriter::new(file);
    if opts.byte_order_mark {
        writer
            .write_all("\u{feff}".as_bytes())
            .map_err(LabelPlusError::Io)?;
    }
    writer
        .write_all(text.as_bytes())
        .map_err(LabelPlusError::Io)?;
    writer.flush().map_err(LabelPlusError::Io)?;

    debug!(
        path = %path.display(),
        files = doc.files.len(),
        labels = doc.label_count(),
        "wrote label file"
    );
    Ok(())
}
