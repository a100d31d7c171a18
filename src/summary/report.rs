//! Summary report types and terminal formatting.

use std::fmt;

use serde::Serialize;

/// Overview of a label document.
#[derive(Clone, Debug, Serialize)]
pub struct DocumentSummary {
    /// Header version as `major.minor`.
    pub version: String,
    pub groups: Vec<String>,
    pub file_count: usize,
    pub label_count: usize,
    /// Per-file label counts in document order.
    pub files: Vec<FileSummary>,
    /// Label counts per category, ascending by category.
    pub categories: Vec<CategoryCount>,
    pub references: ReferenceStats,
}

#[derive(Clone, Debug, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub labels: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct CategoryCount {
    pub category: u32,
    /// Group name for this category, if the header defines one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub count: usize,
}

/// `=N` back-references found before resolution.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReferenceStats {
    /// Labels whose text is a reference.
    pub total: usize,
    /// References pointing at themselves or past the end of their file.
    pub dangling: usize,
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Label file version {}", self.version)?;
        writeln!(f)?;
        writeln!(f, "  Files:   {:>6}", self.file_count)?;
        writeln!(f, "  Labels:  {:>6}", self.label_count)?;
        writeln!(f, "  Groups:  {:>6}", self.groups.len())?;

        if !self.categories.is_empty() {
            writeln!(f)?;
            writeln!(f, "Labels by category:")?;
            for entry in &self.categories {
                let name = entry.group.as_deref().unwrap_or("(undefined)");
                writeln!(f, "  {:>3} {:<20} {:>6}", entry.category, name, entry.count)?;
            }
        }

        if self.references.total > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "References: {} ({} dangling)",
                self.references.total, self.references.dangling
            )?;
        }

        if !self.files.is_empty() {
            writeln!(f)?;
            writeln!(f, "Files:")?;
            for file in &self.files {
                writeln!(f, "  {:>6}  {}", file.labels, file.name)?;
            }
        }

        Ok(())
    }
}
