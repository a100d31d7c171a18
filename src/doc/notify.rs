//! Change notifications emitted by [`LabelStore`](super::LabelStore).

/// What part of the document a mutation touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Files were added, removed, or the whole document was replaced.
    FileListChanged,
    /// Labels were added, removed, reordered, or recategorised.
    LabelItemListChanged,
    /// A single label's text was edited.
    LabelItemTextChanged,
    /// Header metadata (groups or comment) changed.
    GroupListChanged,
}

/// Receiver of change notifications.
///
/// Called synchronously, once per change kind, after the mutation has been
/// applied.
pub trait ChangeSink {
    fn notify(&mut self, kind: ChangeKind);
}

impl<F> ChangeSink for F
where
    F: FnMut(ChangeKind),
{
    fn notify(&mut self, kind: ChangeKind) {
        self(kind)
    }
}

/// A sink that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ChangeSink for NullSink {
    fn notify(&mut self, _kind: ChangeKind) {}
}

/// A sink that records notifications in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<ChangeKind>,
}

impl RecordingSink {
    /// Returns the recorded events and clears the log.
    pub fn take(&mut self) -> Vec<ChangeKind> {
        std::mem::take(&mut self.events)
    }
}

impl ChangeSink for RecordingSink {
    fn notify(&mut self, kind: ChangeKind) {
        self.events.push(kind);
    }
}
