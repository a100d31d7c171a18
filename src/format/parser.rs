//! Line-driven parser for label files.
//!
//! The parser is a three-state automaton fed one classified line at a time:
//!
//! | state   | file marker            | label marker          | plain text        |
//! |---------|------------------------|-----------------------|-------------------|
//! | Start   | read header, open file | append to header text | append to header  |
//! | InFile  | open file              | begin label           | dropped           |
//! | InLabel | commit, open file      | commit, begin label   | append to label   |
//!
//! A file marker naming a file that already exists sends the parser back to
//! `Start`, which discards everything up to the next file marker.

use tracing::debug;

use super::classify::{classify_line, LabelMarker, LineKind};
use super::defaults::NEWLINE;
use super::header::read_header_block;
use crate::doc::{Document, LabelItem};
use crate::error::{FormatError, ParseError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseState {
    Start,
    InFile,
    InLabel,
}

impl ParseState {
    fn name(self) -> &'static str {
        match self {
            ParseState::Start => "start",
            ParseState::InFile => "file",
            ParseState::InLabel => "label",
        }
    }
}

/// A label whose marker has been read and whose text is still being collected.
struct PendingLabel<'a> {
    marker: LabelMarker<'a>,
    text: String,
}

impl<'a> PendingLabel<'a> {
    fn new(marker: LabelMarker<'a>) -> Self {
        Self {
            marker,
            text: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        // Blank lines before the first text line are skipped.
        if self.text.is_empty() {
            self.text.push_str(line);
        } else {
            self.text.push_str(NEWLINE);
            self.text.push_str(line);
        }
    }
}

struct Parser<'a> {
    doc: Document,
    state: ParseState,
    header_read: bool,
    header_text: String,
    current_file: &'a str,
    pending: Option<PendingLabel<'a>>,
}

impl<'a> Parser<'a> {
    fn new() -> Self {
        Self {
            doc: Document::with_groups(Vec::<String>::new()),
            state: ParseState::Start,
            header_read: false,
            header_text: String::new(),
            current_file: "",
            pending: None,
        }
    }

    fn feed(&mut self, raw: &'a str) -> Result<(), FormatError> {
        match (self.state, classify_line(raw)) {
            (ParseState::Start, LineKind::FileMarker(name)) => {
                if !self.header_read {
                    read_header_block(&self.header_text, &mut self.doc)?;
                    self.header_read = true;
                }
                self.header_text.clear();
                self.open_file(name);
            }
            (ParseState::Start, _) => {
                // Label markers are kept as header text too. After the header
                // has been read, Start only skips a duplicate section.
                if !self.header_read {
                    self.header_text.push_str(NEWLINE);
                    self.header_text.push_str(raw.trim());
                }
            }
            (ParseState::InFile, LineKind::FileMarker(name)) => self.open_file(name),
            (ParseState::InFile, LineKind::LabelMarker(marker)) => {
                self.pending = Some(PendingLabel::new(marker));
                self.state = ParseState::InLabel;
            }
            (ParseState::InFile, LineKind::Plain(_)) => {}
            (ParseState::InLabel, LineKind::FileMarker(name)) => {
                self.commit_label()?;
                self.open_file(name);
            }
            (ParseState::InLabel, LineKind::LabelMarker(marker)) => {
                self.commit_label()?;
                self.pending = Some(PendingLabel::new(marker));
            }
            (ParseState::InLabel, LineKind::Plain(text)) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.push_line(text);
                }
            }
        }
        Ok(())
    }

    fn open_file(&mut self, name: &'a str) {
        self.current_file = name;
        if self.doc.push_file(name) {
            self.state = ParseState::InFile;
        } else {
            debug!(file = name, "duplicate file marker, skipping section");
            self.state = ParseState::Start;
        }
    }

    fn commit_label(&mut self) -> Result<(), FormatError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };

        let values = pending.marker.values();
        let (x, y, category) = match values.as_slice() {
            [_, x, y] => (*x, *y, 1),
            [_, x, y, category] => (*x, *y, parse_number::<u32>(category, "category")?),
            _ => {
                debug!(
                    file = self.current_file,
                    fields = values.len(),
                    "dropping label with malformed marker"
                );
                return Ok(());
            }
        };

        let item = LabelItem::with_category(
            parse_number::<f64>(x, "x coordinate")?,
            parse_number::<f64>(y, "y coordinate")?,
            &pending.text,
            category,
        );

        if let Some(file) = self.doc.file_mut(self.current_file) {
            file.labels.push(item);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Document, FormatError> {
        match self.state {
            ParseState::InLabel => self.commit_label()?,
            ParseState::Start if !self.header_read => return Err(FormatError::NoFileSections),
            _ => {}
        }
        Ok(self.doc)
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, FormatError> {
    raw.parse::<T>().map_err(|_| FormatError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parses the full text of a label file.
///
/// A leading byte-order mark is ignored.
///
/// # Errors
/// Returns a [`ParseError`] carrying the 1-based line number and parser
/// state when the header is malformed, the version is unsupported, a label
/// marker holds an unreadable number, or no file marker is present.
pub fn parse_label_str(input: &str) -> Result<Document, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut parser = Parser::new();
    let mut line_num = 0;

    for raw in split_lines(input) {
        line_num += 1;
        let state = parser.state;
        let file = parser.current_file;
        parser.feed(raw).map_err(|kind| ParseError {
            line: line_num,
            state: state.name(),
            file: file.to_string(),
            kind,
        })?;
    }

    let state = parser.state;
    let file = parser.current_file;
    parser.finish().map_err(|kind| ParseError {
        line: line_num,
        state: state.name(),
        file: file.to_string(),
        kind,
    })
}

/// Splits on `\r\n`, `\n`, or a lone `\r`. A terminator at the very end does
/// not start an extra empty line.
fn split_lines<'a>(input: &'a str) -> impl Iterator<Item = &'a str> {
    let mut rest = input;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(pos) = rest.find(|c: char| c == '\r' || c == '\n') else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..pos];
        let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + terminator..];
        Some(line)
    })
}

/// Fuzz-only entrypoint for whole-document parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_str(input: &str) -> Result<(), ParseError> {
    parse_label_str(input).map(|_| ())
}
