//! Core document model for LabelPlus label files.
//!
//! A document is a header (format version, group names, comment) followed by
//! an ordered list of image files, each owning an ordered list of positioned
//! text labels. The parser builds it, the serializer renders it, and a
//! [`LabelStore`](super::LabelStore) edits it in between.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::format::defaults::{DEFAULT_COMMENT, DEFAULT_VERSION};

/// A complete label document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version declared in the header block.
    #[serde(default)]
    pub version: HeaderVersion,

    /// Group display names, in header order. Not deduplicated.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Free-form, possibly multi-line user comment.
    #[serde(default)]
    pub comment: String,

    /// Image files in document order. Names are unique.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: HeaderVersion::default(),
            groups: Vec::new(),
            comment: DEFAULT_COMMENT.to_string(),
            files: Vec::new(),
        }
    }
}

impl Document {
    /// Creates an empty document with the default header and the given groups.
    pub fn with_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Returns the file names in document order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    /// Looks up a file section by name.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Looks up a file section by name for editing.
    pub fn file_mut(&mut self, name: &str) -> Option<&mut FileEntry> {
        self.files.iter_mut().find(|f| f.name == name)
    }

    /// Total number of labels across all files.
    pub fn label_count(&self) -> usize {
        self.files.iter().map(|f| f.labels.len()).sum()
    }

    /// Appends an empty file section, keeping document order.
    ///
    /// Returns `false` (and changes nothing) if the name is already present.
    pub fn push_file(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.file(&name).is_some() {
            return false;
        }
        self.files.push(FileEntry::new(name));
        true
    }

    /// Inserts an empty file section so that the file list ends up sorted by
    /// name (ordinal comparison).
    ///
    /// A list still in document order from parsing is sorted once first;
    /// after that each insert is a binary search. A duplicate name is rejected
    /// before any reordering.
    pub fn insert_file_sorted(&mut self, name: impl Into<String>) -> Result<(), StoreError> {
        let name = name.into();
        if self.file(&name).is_some() {
            return Err(StoreError::DuplicateFile(name));
        }
        if !self.files.windows(2).all(|w| w[0].name <= w[1].name) {
            self.files.sort_by(|a, b| a.name.cmp(&b.name));
        }

        match self.files.binary_search_by(|f| f.name.as_str().cmp(&name)) {
            Ok(_) => Err(StoreError::DuplicateFile(name)),
            Err(pos) => {
                self.files.insert(pos, FileEntry::new(name));
                Ok(())
            }
        }
    }

    /// Removes a file section and returns it.
    pub fn remove_file(&mut self, name: &str) -> Option<FileEntry> {
        let pos = self.files.iter().position(|f| f.name == name)?;
        Some(self.files.remove(pos))
    }
}

/// Format version of a label file (`major,minor` in the header block).
///
/// A major bump means older readers may lose information; a minor bump adds
/// features that older readers can safely ignore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeaderVersion {
    pub major: u32,
    pub minor: u32,
}

impl HeaderVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for HeaderVersion {
    fn default() -> Self {
        DEFAULT_VERSION
    }
}

/// One image file and its labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Image file name as written in the file marker.
    pub name: String,

    /// Labels in display order; position `i` is rendered as `[i + 1]`.
    #[serde(default)]
    pub labels: Vec<LabelItem>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
        }
    }
}

/// A positioned text label on an image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelItem {
    /// Horizontal position as a percentage of image width.
    pub x: f64,

    /// Vertical position as a percentage of image height.
    pub y: f64,

    /// 1-based group index into [`Document::groups`].
    pub category: u32,

    /// Label text, may span lines.
    pub text: String,
}

impl LabelItem {
    /// Creates a label in the default category. The text is trimmed.
    pub fn new(x: f64, y: f64, text: impl AsRef<str>) -> Self {
        Self::with_category(x, y, text, 1)
    }

    /// Creates a label with an explicit category. The text is trimmed.
    pub fn with_category(x: f64, y: f64, text: impl AsRef<str>, category: u32) -> Self {
        Self {
            x,
            y,
            category,
            text: text.as_ref().trim().to_string(),
        }
    }
}
