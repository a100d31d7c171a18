//! The header block: version, group list, and comment.
//!
//! ```text
//! 1,0
//! -
//! group one
//! group two
//! -
//! comment
//! ```

use super::defaults::{
    default_groups, DEFAULT_COMMENT, DEFAULT_VERSION, HEADER_BLOCK_SEPARATOR, NEWLINE,
    SUPPORTED_MAJOR_VERSION,
};
use crate::doc::{Document, HeaderVersion};
use crate::error::FormatError;

/// Applies the header text found before the first file marker to `doc`.
///
/// Blank text is a legacy document without a header and gets the defaults.
/// Groups are appended to whatever `doc` already holds.
pub(crate) fn read_header_block(text: &str, doc: &mut Document) -> Result<(), FormatError> {
    let text = text.trim();
    if text.is_empty() {
        doc.version = DEFAULT_VERSION;
        doc.groups = default_groups();
        doc.comment = DEFAULT_COMMENT.to_string();
        return Ok(());
    }

    let blocks: Vec<&str> = text.split(HEADER_BLOCK_SEPARATOR).collect();
    if blocks.len() < 3 {
        return Err(FormatError::MissingHeaderBlocks);
    }

    let version = parse_version(blocks[0])?;
    if version.major > SUPPORTED_MAJOR_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: version.major,
            supported: SUPPORTED_MAJOR_VERSION,
        });
    }
    doc.version = version;

    doc.groups.extend(
        blocks[1]
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string),
    );

    // Blocks between the group list and the last one are reserved.
    doc.comment = blocks[blocks.len() - 1].trim().to_string();

    Ok(())
}

/// Reads `major,minor`. Missing components take the default; extra ones are
/// ignored.
fn parse_version(block: &str) -> Result<HeaderVersion, FormatError> {
    let mut tokens = block.split(',').map(str::trim);
    let major = parse_component(tokens.next(), DEFAULT_VERSION.major)?;
    let minor = parse_component(tokens.next(), DEFAULT_VERSION.minor)?;
    Ok(HeaderVersion { major, minor })
}

fn parse_component(token: Option<&str>, default: u32) -> Result<u32, FormatError> {
    match token {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| FormatError::InvalidVersion(raw.to_string())),
    }
}

/// Renders the header block, terminated by a newline.
pub(crate) fn write_header_block(doc: &Document, out: &mut String) {
    out.push_str(&format!(
        "{},{}{NEWLINE}{HEADER_BLOCK_SEPARATOR}{NEWLINE}",
        doc.version.major, doc.version.minor
    ));
    for group in &doc.groups {
        out.push_str(group);
        out.push_str(NEWLINE);
    }
    out.push(HEADER_BLOCK_SEPARATOR);
    out.push_str(NEWLINE);
    out.push_str(&doc.comment);
    out.push_str(NEWLINE);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_doc() -> Document {
        Document::with_groups(Vec::<String>::new())
    }

    #[test]
    fn reads_full_header() {
        let mut doc = empty_doc();
        read_header_block(
            "\r\n1,0\r\n-\r\ninside\r\noutside\r\n-\r\nmy comment\r\nsecond line\r\n",
            &mut doc,
        )
        .expect("header should parse");

        assert_eq!(doc.version, HeaderVersion::new(1, 0));
        assert_eq!(doc.groups, vec!["inside", "outside"]);
        assert_eq!(doc.comment, "my comment\r\nsecond line");
    }

    #[test]
    fn blank_header_uses_defaults() {
        let mut doc = empty_doc();
        doc.comment = "stale".into();
        read_header_block(" \r\n \r\n", &mut doc).expect("blank header is legacy");

        assert_eq!(doc.version, DEFAULT_VERSION);
        assert_eq!(doc.groups, default_groups());
        assert_eq!(doc.comment, DEFAULT_COMMENT);
    }

    #[test]
    fn too_few_blocks_is_an_error() {
        let mut doc = empty_doc();
        let err = read_header_block("1,0\r\n-\r\ngroups only", &mut doc).unwrap_err();
        assert_eq!(err, FormatError::MissingHeaderBlocks);
    }

    #[test]
    fn newer_major_version_is_rejected() {
        let mut doc = empty_doc();
        let err = read_header_block("2,0\r\n-\r\n-\r\n", &mut doc).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsupportedVersion {
                found: 2,
                supported: SUPPORTED_MAJOR_VERSION
            }
        );
    }

    #[test]
    fn newer_minor_version_is_accepted() {
        let mut doc = empty_doc();
        read_header_block("1,7\r\n-\r\n-\r\n", &mut doc).unwrap();
        assert_eq!(doc.version, HeaderVersion::new(1, 7));
        assert!(doc.groups.is_empty());
        assert_eq!(doc.comment, "");
    }

    #[test]
    fn missing_minor_takes_default() {
        let mut doc = empty_doc();
        read_header_block("1\r\n-\r\na\r\n-\r\nc", &mut doc).unwrap();
        assert_eq!(doc.version, HeaderVersion::new(1, DEFAULT_VERSION.minor));
    }

    #[test]
    fn non_numeric_version_is_an_error() {
        let mut doc = empty_doc();
        let err = read_header_block("one,0\r\n-\r\n-\r\n", &mut doc).unwrap_err();
        assert_eq!(err, FormatError::InvalidVersion("one".into()));
    }

    #[test]
    fn groups_accumulate_onto_existing_list() {
        let mut doc = Document::with_groups(["existing"]);
        read_header_block("1,0\r\n-\r\nnew\r\n-\r\n", &mut doc).unwrap();
        assert_eq!(doc.groups, vec!["existing", "new"]);
    }

    #[test]
    fn comment_is_the_last_block() {
        let mut doc = empty_doc();
        read_header_block("1,0\r\n-\r\ng\r\n-\r\nreserved\r\n-\r\nlast", &mut doc).unwrap();
        assert_eq!(doc.groups, vec!["g"]);
        assert_eq!(doc.comment, "last");
    }

    #[test]
    fn writes_header_layout() {
        let mut doc = Document::with_groups(["a", "b"]);
        doc.comment = "note".into();
        let mut out = String::new();
        write_header_block(&doc, &mut out);
        assert_eq!(out, "1,0\r\n-\r\na\r\nb\r\n-\r\nnote\r\n");
    }

    #[test]
    fn written_header_reads_back() {
        let mut doc = Document::with_groups(["g1", "g2"]);
        doc.version = HeaderVersion::new(1, 3);
        doc.comment = "line one\r\nline two".into();
        let mut out = String::new();
        write_header_block(&doc, &mut out);

        let mut restored = empty_doc();
        read_header_block(&out, &mut restored).unwrap();
        assert_eq!(restored.version, doc.version);
        assert_eq!(restored.groups, doc.groups);
        assert_eq!(restored.comment, doc.comment);
    }
}
