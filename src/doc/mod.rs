//! In-memory document model for LabelPlus label files.
//!
//! [`Document`] is plain data: the parser produces it and the serializer
//! consumes it. [`LabelStore`] wraps a document for interactive editing and
//! reports each successful change to a [`ChangeSink`].
//!
//! # Example
//!
//! ```
//! use labelplus::doc::{ChangeKind, LabelItem, LabelStore, RecordingSink};
//!
//! let mut store = LabelStore::new(vec!["inside".into()], RecordingSink::default());
//! store.add_file("page01.png").unwrap();
//! store
//!     .add_label("page01.png", LabelItem::new(12.5, 40.0, "Hello"), None)
//!     .unwrap();
//!
//! assert_eq!(store.sink().events.last(), Some(&ChangeKind::LabelItemListChanged));
//! ```

mod model;
mod notify;
mod store;

pub use model::{Document, FileEntry, HeaderVersion, LabelItem};
pub use notify::{ChangeKind, ChangeSink, NullSink, RecordingSink};
pub use store::LabelStore;
