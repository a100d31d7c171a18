//! Rendering documents back to label file text.

use super::defaults::NEWLINE;
use super::header::write_header_block;
use super::resolve::resolve_references;
use crate::doc::Document;
use crate::error::ReferenceCycleError;

const FILE_MARKER_OPEN: &str = ">>>>>>>>[";
const FILE_MARKER_CLOSE: &str = "]<<<<<<<<";
const LABEL_MARKER_RULE: &str = "----------------";

/// Renders a document exactly as it stands, without resolving references.
pub fn render_label_str(doc: &Document) -> String {
    let mut out = String::new();
    write_header_block(doc, &mut out);
    out.push_str(NEWLINE);

    for file in &doc.files {
        out.push_str(NEWLINE);
        out.push_str(FILE_MARKER_OPEN);
        out.push_str(&file.name);
        out.push_str(FILE_MARKER_CLOSE);
        out.push_str(NEWLINE);

        for (index, label) in file.labels.iter().enumerate() {
            out.push_str(&format!(
                "{LABEL_MARKER_RULE}[{}]{LABEL_MARKER_RULE}[{:.3},{:.3},{}]{NEWLINE}",
                index + 1,
                label.x,
                label.y,
                label.category
            ));
            out.push_str(&label.text);
            out.push_str(NEWLINE);
            out.push_str(NEWLINE);
        }
    }

    out
}

/// Resolves references in place, then renders the document.
///
/// Resolution rewrites label texts in `doc` and is not undone. On a cycle
/// `doc` is left as it was.
pub fn to_label_string(doc: &mut Document) -> Result<String, ReferenceCycleError> {
    resolve_references(doc)?;
    Ok(render_label_str(doc))
}
