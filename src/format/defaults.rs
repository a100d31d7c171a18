//! Constants of the label file format.

use crate::doc::HeaderVersion;

/// Highest major version this reader understands.
pub const SUPPORTED_MAJOR_VERSION: u32 = 1;

/// Version written into new documents and assumed for headerless files.
pub const DEFAULT_VERSION: HeaderVersion = HeaderVersion {
    major: SUPPORTED_MAJOR_VERSION,
    minor: 0,
};

/// Groups assigned to legacy documents that carry no header block.
pub const DEFAULT_GROUPS: [&str; 2] = ["框内", "框外"];

pub const DEFAULT_COMMENT: &str = "Default Comment\r\nYou can edit me";

/// Line terminator used by the writer.
pub const NEWLINE: &str = "\r\n";

/// Separator line between header blocks.
pub const HEADER_BLOCK_SEPARATOR: char = '-';

pub fn default_groups() -> Vec<String> {
    DEFAULT_GROUPS.iter().map(|g| g.to_string()).collect()
}
