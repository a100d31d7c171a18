#![allow(dead_code)]

use labelplus::doc::{Document, FileEntry, HeaderVersion, LabelItem};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Coordinates are written with three decimals.
pub const EPS_COORD: f64 = 5e-4 + 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// One line of label text: no surrounding whitespace and nothing that could
/// read as a marker or a reference.
pub fn arb_text_line() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9,.!? ]{0,15}[a-zA-Z0-9.!?]"
}

pub fn arb_label_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_text_line(), 1..4).prop_map(|lines| lines.join("\r\n"))
}

pub fn arb_group() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,10}[a-zA-Z0-9]"
}

pub fn arb_comment() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_text_line(), 0..3).prop_map(|lines| lines.join("\r\n"))
}

pub fn arb_label() -> impl Strategy<Value = LabelItem> {
    (0.0f64..100.0, 0.0f64..100.0, 1u32..10, arb_label_text())
        .prop_map(|(x, y, category, text)| LabelItem::with_category(x, y, text, category))
}

pub fn arb_version() -> impl Strategy<Value = HeaderVersion> {
    (0u32..=1, 0u32..100).prop_map(|(major, minor)| HeaderVersion::new(major, minor))
}

/// A document with between 1 and `max_files` files, each holding up to
/// `max_labels` labels. No label text is a reference.
pub fn arb_document(max_files: usize, max_labels: usize) -> impl Strategy<Value = Document> {
    let files = prop::collection::btree_set("[a-z0-9_]{1,10}\\.png", 1..=max_files).prop_flat_map(
        move |names| {
            let n = names.len();
            (
                Just(names.into_iter().collect::<Vec<_>>()),
                prop::collection::vec(prop::collection::vec(arb_label(), 0..=max_labels), n),
            )
        },
    );

    (
        arb_version(),
        prop::collection::vec(arb_group(), 0..4),
        arb_comment(),
        files,
    )
        .prop_map(|(version, groups, comment, (names, labels))| Document {
            version,
            groups,
            comment,
            files: names
                .into_iter()
                .zip(labels)
                .map(|(name, labels)| FileEntry { name, labels })
                .collect(),
        })
}

/// Compares two documents, allowing for three-decimal coordinate rounding.
pub fn assert_documents_equivalent(left: &Document, right: &Document) -> Result<(), String> {
    if left.version != right.version {
        return Err(format!("version {:?} != {:?}", left.version, right.version));
    }
    if left.groups != right.groups {
        return Err(format!("groups {:?} != {:?}", left.groups, right.groups));
    }
    if left.comment != right.comment {
        return Err(format!("comment {:?} != {:?}", left.comment, right.comment));
    }
    if left.file_names() != right.file_names() {
        return Err(format!(
            "files {:?} != {:?}",
            left.file_names(),
            right.file_names()
        ));
    }

    for (lf, rf) in left.files.iter().zip(&right.files) {
        if lf.labels.len() != rf.labels.len() {
            return Err(format!(
                "{}: {} label(s) != {}",
                lf.name,
                lf.labels.len(),
                rf.labels.len()
            ));
        }
        for (i, (l, r)) in lf.labels.iter().zip(&rf.labels).enumerate() {
            if (l.x - r.x).abs() > EPS_COORD || (l.y - r.y).abs() > EPS_COORD {
                return Err(format!(
                    "{}[{}]: position ({}, {}) != ({}, {})",
                    lf.name, i, l.x, l.y, r.x, r.y
                ));
            }
            if l.category != r.category || l.text != r.text {
                return Err(format!("{}[{}]: {:?} != {:?}", lf.name, i, l, r));
            }
        }
    }

    Ok(())
}
