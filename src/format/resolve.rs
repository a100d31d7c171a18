//! Back-references between labels of the same file.
//!
//! A label whose whole text is `=N` (or `＝N`, with ASCII or full-width
//! digits) is replaced by the text of label `N` in the same file. Chains
//! resolve over repeated passes until nothing changes.

use crate::doc::{Document, LabelItem};
use crate::error::ReferenceCycleError;

/// Parses a reference text into a 0-based label index.
///
/// The digits may be surrounded by ASCII whitespace and carry a leading `+`.
/// Returns `None` for anything else that is not `=` or `＝` followed by
/// digits, or for `=0`.
pub fn parse_reference(text: &str) -> Option<usize> {
    let digits = text
        .strip_prefix('=')
        .or_else(|| text.strip_prefix('＝'))?
        .trim_matches(|c: char| c.is_ascii_whitespace());
    let digits = digits.strip_prefix('+').unwrap_or(digits);

    if digits.is_empty() {
        return None;
    }

    let ascii: String = digits
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
            '0'..='9' => Some(c),
            _ => None,
        })
        .collect::<Option<String>>()?;

    ascii.parse::<usize>().ok()?.checked_sub(1)
}

/// Resolves references in every file of the document, in place.
///
/// Files are resolved independently; a reference never crosses files.
/// Returns `true` if any label text changed.
///
/// # Errors
/// Returns [`ReferenceCycleError`] for the first file whose references do not
/// settle. The document is left untouched in that case.
pub fn resolve_references(doc: &mut Document) -> Result<bool, ReferenceCycleError> {
    let mut resolved = Vec::with_capacity(doc.files.len());
    for file in &doc.files {
        let mut labels = file.labels.clone();
        resolve_labels(&mut labels).map_err(|passes| ReferenceCycleError {
            file: file.name.clone(),
            passes,
        })?;
        resolved.push(labels);
    }

    let mut changed = false;
    for (file, labels) in doc.files.iter_mut().zip(resolved) {
        if file.labels != labels {
            file.labels = labels;
            changed = true;
        }
    }
    Ok(changed)
}

/// Runs substitution passes over one file's labels until a pass makes no
/// replacement. Gives up after `len + 1` passes, returning the pass count.
fn resolve_labels(labels: &mut [LabelItem]) -> Result<(), usize> {
    let max_passes = labels.len() + 1;

    for _ in 0..max_passes {
        let mut changed = false;
        for i in 0..labels.len() {
            let Some(target) = parse_reference(&labels[i].text) else {
                continue;
            };
            if target == i || target >= labels.len() {
                continue;
            }
            labels[i].text = labels[target].text.clone();
            changed = true;
        }
        if !changed {
            return Ok(());
        }
    }

    Err(max_passes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(texts: &[&str]) -> Vec<LabelItem> {
        texts.iter().map(|t| LabelItem::new(0.0, 0.0, t)).collect()
    }

    fn texts(labels: &[LabelItem]) -> Vec<&str> {
        labels.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn parses_ascii_and_full_width_references() {
        assert_eq!(parse_reference("=1"), Some(0));
        assert_eq!(parse_reference("=12"), Some(11));
        assert_eq!(parse_reference("＝２"), Some(1));
        assert_eq!(parse_reference("=２"), Some(1));
        assert_eq!(parse_reference("＝1０"), Some(9));
    }

    #[test]
    fn rejects_non_references() {
        assert_eq!(parse_reference("hello"), None);
        assert_eq!(parse_reference("="), None);
        assert_eq!(parse_reference("=0"), None);
        assert_eq!(parse_reference("=1a"), None);
        assert_eq!(parse_reference("a=1"), None);
        assert_eq!(parse_reference("=-1"), None);
        assert_eq!(parse_reference("=99999999999999999999999999"), None);
        assert_eq!(parse_reference("=+"), None);
        assert_eq!(parse_reference("=1 2"), None);
    }

    #[test]
    fn reference_digits_allow_padding_and_plus_sign() {
        assert_eq!(parse_reference("= 2"), Some(1));
        assert_eq!(parse_reference("=2 "), Some(1));
        assert_eq!(parse_reference("=\t+3\r\n"), Some(2));
        assert_eq!(parse_reference("＝ ２"), Some(1));
    }

    #[test]
    fn chain_resolves_transitively() {
        let mut items = labels(&["hello", "=1", "=2"]);
        resolve_labels(&mut items).unwrap();
        assert_eq!(texts(&items), vec!["hello", "hello", "hello"]);
    }

    #[test]
    fn backward_chain_resolves_over_several_passes() {
        let mut items = labels(&["=2", "=3", "=4", "end"]);
        resolve_labels(&mut items).unwrap();
        assert_eq!(texts(&items), vec!["end", "end", "end", "end"]);
    }

    #[test]
    fn full_width_reference_matches_ascii() {
        let mut ascii = labels(&["a", "b", "=2"]);
        let mut wide = labels(&["a", "b", "＝２"]);
        resolve_labels(&mut ascii).unwrap();
        resolve_labels(&mut wide).unwrap();
        assert_eq!(ascii, wide);
    }

    #[test]
    fn out_of_range_reference_is_left_alone() {
        let mut items = labels(&["a", "=99"]);
        resolve_labels(&mut items).unwrap();
        assert_eq!(texts(&items), vec!["a", "=99"]);
    }

    #[test]
    fn self_reference_is_left_alone() {
        let mut items = labels(&["=1", "b"]);
        resolve_labels(&mut items).unwrap();
        assert_eq!(texts(&items), vec!["=1", "b"]);
    }

    #[test]
    fn mutual_reference_is_a_cycle() {
        let mut items = labels(&["=2", "=1"]);
        assert_eq!(resolve_labels(&mut items), Err(3));
    }

    #[test]
    fn references_stay_within_a_file() {
        let mut doc = Document::default();
        doc.push_file("a.png");
        doc.push_file("b.png");
        doc.files[0].labels = labels(&["first"]);
        doc.files[1].labels = labels(&["=1", "=5"]);

        assert!(!resolve_references(&mut doc).unwrap());
        assert_eq!(texts(&doc.files[1].labels), vec!["=1", "=5"]);
    }

    #[test]
    fn resolution_reports_whether_text_changed() {
        let mut doc = Document::default();
        doc.push_file("a.png");
        doc.files[0].labels = labels(&["x", "=1"]);

        assert!(resolve_references(&mut doc).unwrap());
        assert_eq!(texts(&doc.files[0].labels), vec!["x", "x"]);
        assert!(!resolve_references(&mut doc).unwrap());
    }

    #[test]
    fn cycle_in_later_file_leaves_earlier_files_unresolved() {
        let mut doc = Document::default();
        doc.push_file("a.png");
        doc.push_file("loop.png");
        doc.files[0].labels = labels(&["x", "=1"]);
        doc.files[1].labels = labels(&["=2", "=1"]);
        let before = doc.clone();

        let err = resolve_references(&mut doc).unwrap_err();
        assert_eq!(err.file, "loop.png");
        assert_eq!(doc, before);
    }

    #[test]
    fn cycle_error_names_the_file() {
        let mut doc = Document::default();
        doc.push_file("loop.png");
        doc.files[0].labels = labels(&["=2", "=1"]);

        let err = resolve_references(&mut doc).unwrap_err();
        assert_eq!(err.file, "loop.png");
        assert_eq!(err.passes, 3);
    }

    #[test]
    fn empty_file_resolves_immediately() {
        let mut items: Vec<LabelItem> = Vec::new();
        assert_eq!(resolve_labels(&mut items), Ok(()));
    }
}
