//! Single-owner editing surface over a [`Document`].

use std::path::Path;

use super::model::{Document, FileEntry, LabelItem};
use super::notify::{ChangeKind, ChangeSink, NullSink};
use crate::error::{LabelPlusError, StoreError};
use crate::format::io::{read_label_file, write_label_file, SaveOptions};
use crate::format::resolve_references;

/// Owns a document and reports every successful edit to a [`ChangeSink`].
///
/// Per-item operations check their preconditions up front and return a
/// [`StoreError`] without touching the document when they fail. Load and save
/// surface [`LabelPlusError`].
#[derive(Debug)]
pub struct LabelStore<S: ChangeSink = NullSink> {
    doc: Document,
    sink: S,
}

impl LabelStore<NullSink> {
    /// Creates a store with no change subscriber.
    pub fn detached(groups: Vec<String>) -> Self {
        Self::new(groups, NullSink)
    }
}

impl<S: ChangeSink> LabelStore<S> {
    /// Creates an empty document with the given groups.
    pub fn new(groups: Vec<String>, sink: S) -> Self {
        let mut store = Self {
            doc: Document::with_groups(groups),
            sink,
        };
        store.notify_replaced();
        store
    }

    /// Wraps an existing document.
    pub fn from_document(doc: Document, sink: S) -> Self {
        Self { doc, sink }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Discards the current document and starts an empty one.
    pub fn reset(&mut self, groups: Vec<String>) {
        self.doc = Document::with_groups(groups);
        self.notify_replaced();
    }

    /// Replaces the document with the contents of a label file.
    ///
    /// On failure the current document is left as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), LabelPlusError> {
        self.doc = read_label_file(path)?;
        self.notify_replaced();
        Ok(())
    }

    /// Writes the document to a label file.
    ///
    /// References are resolved in place first, so `=N` texts are replaced by
    /// the text they point at. If that changes any text the sink hears
    /// [`ChangeKind::LabelItemTextChanged`], even when the write then fails.
    /// A reference cycle leaves the document unchanged.
    pub fn save(&mut self, path: &Path, opts: &SaveOptions<'_>) -> Result<(), LabelPlusError> {
        if resolve_references(&mut self.doc)? {
            self.sink.notify(ChangeKind::LabelItemTextChanged);
        }
        write_label_file(path, &mut self.doc, opts)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.doc.file_names()
    }

    pub fn labels(&self, file: &str) -> Option<&[LabelItem]> {
        self.doc.file(file).map(|f| f.labels.as_slice())
    }

    pub fn label(&self, file: &str, index: usize) -> Option<&LabelItem> {
        self.labels(file)?.get(index)
    }

    pub fn groups(&self) -> &[String] {
        &self.doc.groups
    }

    pub fn comment(&self) -> &str {
        &self.doc.comment
    }

    /// Adds an empty file section. The file list is kept sorted by name.
    pub fn add_file(&mut self, name: &str) -> Result<(), StoreError> {
        self.doc.insert_file_sorted(name)?;
        self.sink.notify(ChangeKind::FileListChanged);
        Ok(())
    }

    pub fn remove_file(&mut self, name: &str) -> Result<(), StoreError> {
        self.doc
            .remove_file(name)
            .ok_or_else(|| StoreError::FileNotFound(name.to_string()))?;
        self.sink.notify(ChangeKind::FileListChanged);
        Ok(())
    }

    /// Removes every label of a file, keeping the file itself.
    pub fn clear_labels(&mut self, file: &str) -> Result<(), StoreError> {
        self.entry_mut(file)?.labels.clear();
        self.sink.notify(ChangeKind::LabelItemListChanged);
        Ok(())
    }

    /// Appends a label, or inserts it before `index` when given.
    ///
    /// `index` may equal the current label count (same as appending).
    pub fn add_label(
        &mut self,
        file: &str,
        item: LabelItem,
        index: Option<usize>,
    ) -> Result<(), StoreError> {
        let entry = self.entry_mut(file)?;
        match index {
            None => entry.labels.push(item),
            Some(index) if index <= entry.labels.len() => entry.labels.insert(index, item),
            Some(index) => {
                return Err(StoreError::IndexOutOfRange {
                    file: file.to_string(),
                    index,
                    len: entry.labels.len(),
                })
            }
        }
        self.sink.notify(ChangeKind::LabelItemListChanged);
        Ok(())
    }

    pub fn remove_label(&mut self, file: &str, index: usize) -> Result<LabelItem, StoreError> {
        let entry = self.entry_mut(file)?;
        check_index(file, index, entry.labels.len())?;
        let removed = entry.labels.remove(index);
        self.sink.notify(ChangeKind::LabelItemListChanged);
        Ok(removed)
    }

    /// Replaces a label's text as given (no trimming).
    pub fn set_label_text(
        &mut self,
        file: &str,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.label_mut(file, index)?.text = text.into();
        self.sink.notify(ChangeKind::LabelItemTextChanged);
        Ok(())
    }

    pub fn set_label_category(
        &mut self,
        file: &str,
        index: usize,
        category: u32,
    ) -> Result<(), StoreError> {
        self.label_mut(file, index)?.category = category;
        self.sink.notify(ChangeKind::LabelItemListChanged);
        Ok(())
    }

    pub fn set_groups(&mut self, groups: Vec<String>) {
        self.doc.groups = groups;
        self.sink.notify(ChangeKind::GroupListChanged);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.doc.comment = comment.into();
        self.sink.notify(ChangeKind::GroupListChanged);
    }

    fn entry_mut(&mut self, file: &str) -> Result<&mut FileEntry, StoreError> {
        self.doc
            .file_mut(file)
            .ok_or_else(|| StoreError::FileNotFound(file.to_string()))
    }

    fn label_mut(&mut self, file: &str, index: usize) -> Result<&mut LabelItem, StoreError> {
        let entry = self.entry_mut(file)?;
        check_index(file, index, entry.labels.len())?;
        Ok(&mut entry.labels[index])
    }

    fn notify_replaced(&mut self) {
        self.sink.notify(ChangeKind::FileListChanged);
        self.sink.notify(ChangeKind::LabelItemListChanged);
        self.sink.notify(ChangeKind::GroupListChanged);
    }
}

fn check_index(file: &str, index: usize, len: usize) -> Result<(), StoreError> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::IndexOutOfRange {
            file: file.to_string(),
            index,
            len,
        })
    }
}
