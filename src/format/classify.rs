//! Line classification for the label file grammar.
//!
//! Every line of a label file is one of three things: a file marker that
//! opens an image section, a label marker that opens a label, or plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^>+\[(?P<name>.*)\]<+$").expect("file marker regex is valid"));

static LABEL_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-+\[(?P<index>.*)\]-+(\[(?P<x>[\d.]*),(?P<y>[\d.]*)(,(?P<category>\d*))?\])?$",
    )
    .expect("label marker regex is valid")
});

/// The structural role of one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `>>>>[name]<<<<`
    FileMarker(&'a str),
    /// `----[n]----[x,y,category]`
    LabelMarker(LabelMarker<'a>),
    /// Anything else, trimmed.
    Plain(&'a str),
}

/// Captures of a label marker line. Empty captures are `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelMarker<'a> {
    /// The `[n]` token. Only its presence matters to the parser.
    pub index: Option<&'a str>,
    pub x: Option<&'a str>,
    pub y: Option<&'a str>,
    pub category: Option<&'a str>,
}

impl<'a> LabelMarker<'a> {
    /// The captured tokens in marker order with absent ones left out.
    ///
    /// The parser decides how to read a marker purely from how many tokens
    /// this returns, so a marker with an empty index shifts the remaining
    /// tokens left.
    pub fn values(&self) -> Vec<&'a str> {
        [self.index, self.x, self.y, self.category]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Classifies a raw line. Surrounding whitespace is ignored.
///
/// File markers take precedence over label markers.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if let Some(caps) = FILE_MARKER.captures(line) {
        let name = caps.name("name").map_or("", |m| m.as_str());
        return LineKind::FileMarker(name);
    }

    if let Some(caps) = LABEL_MARKER.captures(line) {
        let capture = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
        };
        return LineKind::LabelMarker(LabelMarker {
            index: capture("index"),
            x: capture("x"),
            y: capture("y"),
            category: capture("category"),
        });
    }

    LineKind::Plain(line)
}

/// Fuzz-only entrypoint for line classification.
#[cfg(feature = "fuzzing")]
pub fn fuzz_classify_line(input: &str) -> usize {
    match classify_line(input) {
        LineKind::FileMarker(name) => name.len(),
        LineKind::LabelMarker(marker) => marker.values().len(),
        LineKind::Plain(text) => text.len(),
    }
}
