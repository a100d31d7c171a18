//! The LabelPlus label file format.
//!
//! A label file is UTF-8 text (a byte-order mark is tolerated) made of a
//! header block followed by one section per image:
//!
//! ```text
//! 1,0
//! -
//! inside
//! outside
//! -
//! free-form comment
//!
//!
//! >>>>>>>>[page01.png]<<<<<<<<
//! ----------------[1]----------------[12.500,40.000,1]
//! label text
//!
//! ```
//!
//! - [`classify`]: maps one line to its structural role.
//! - [`parse_label_str`]: the three-state parser.
//! - [`resolve_references`]: expands `=N` back-references.
//! - [`render_label_str`] / [`to_label_string`]: the writer.
//! - [`io`]: file reading and writing, with optional script conversion.

pub mod classify;
pub mod convert;
pub mod defaults;
mod header;
pub mod io;
pub mod json;
mod parser;
mod resolve;
mod writer;

pub use classify::{classify_line, LabelMarker, LineKind};
pub use convert::{OpenCcCommand, TextTransform};
pub use io::{read_label_file, write_label_file, SaveOptions};
pub use parser::parse_label_str;
#[cfg(feature = "fuzzing")]
pub use parser::fuzz_parse_label_str;
pub use resolve::{parse_reference, resolve_references};
pub use writer::{render_label_str, to_label_string};
