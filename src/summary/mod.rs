//! Document summaries for the `check` command.

mod report;

pub use report::{CategoryCount, DocumentSummary, FileSummary, ReferenceStats};

use std::collections::BTreeMap;

use crate::doc::Document;
use crate::format::parse_reference;

/// Counts files, labels, categories, and back-references in a document.
pub fn summarize(doc: &Document) -> DocumentSummary {
    let mut by_category: BTreeMap<u32, usize> = BTreeMap::new();
    let mut references = ReferenceStats::default();

    for file in &doc.files {
        for (index, label) in file.labels.iter().enumerate() {
            *by_category.entry(label.category).or_default() += 1;

            if let Some(target) = parse_reference(&label.text) {
                references.total += 1;
                if target == index || target >= file.labels.len() {
                    references.dangling += 1;
                }
            }
        }
    }

    let categories = by_category
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category,
            group: (category as usize)
                .checked_sub(1)
                .and_then(|i| doc.groups.get(i))
                .cloned(),
            count,
        })
        .collect();

    DocumentSummary {
        version: format!("{}.{}", doc.version.major, doc.version.minor),
        groups: doc.groups.clone(),
        file_count: doc.files.len(),
        label_count: doc.label_count(),
        files: doc
            .files
            .iter()
            .map(|f| FileSummary {
                name: f.name.clone(),
                labels: f.labels.len(),
            })
            .collect(),
        categories,
        references,
    }
}
