//! Line-indexed document model
//!
//! A [`Document`] is the text of a project file split into lines, remembering
//! which terminator it used so it can be written back unchanged. Edits locate
//! an [`Anchor`] line and splice new lines relative to it. Every insertion is
//! guarded by a whole-document containment check, which is what makes
//! re-running a patch a no-op.

use std::fmt;

use regex::Regex;
use tracing::debug;

/// Locates the line an edit is relative to
#[derive(Debug, Clone)]
pub enum Anchor {
    /// Line contains this substring
    Literal(String),
    /// Line matches this regex
    Pattern(Regex),
}

impl Anchor {
    /// Anchor on a line containing `text`
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Anchor on a line matching `pattern`
    pub fn pattern(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    /// Check a single line against the anchor
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Literal(text) => line.contains(text.as_str()),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

impl From<&str> for Anchor {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<Regex> for Anchor {
    fn from(re: Regex) -> Self {
        Self::Pattern(re)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "'{}'", text),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// What an insertion did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This many lines were added
    Inserted(usize),
    /// Every line was already in the document
    AlreadyPresent,
    /// The anchor matched no line, document untouched
    AnchorNotFound,
    /// Nothing was requested
    Nothing,
}

impl InsertOutcome {
    /// Whether the document changed
    pub fn changed(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

/// Text split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    terminator: &'static str,
}

impl Document {
    /// Split `text` on its line terminator (`\r\n` when present, `\n` otherwise)
    pub fn parse(text: &str) -> Self {
        let terminator = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            lines: text.split(terminator).map(str::to_string).collect(),
            terminator,
        }
    }

    /// The document's lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line terminator used when joining
    pub fn terminator(&self) -> &'static str {
        self.terminator
    }

    /// Index of the first line matching `anchor`
    pub fn find(&self, anchor: &Anchor) -> Option<usize> {
        self.lines.iter().position(|line| anchor.matches(line))
    }

    /// Whether `needle` occurs anywhere in the document. Multi-line needles
    /// use `\n` regardless of the document's terminator.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.join("\n").contains(needle)
    }

    /// Insert `line` before the line at `index`, clamped to the document end
    pub fn insert_at(&mut self, index: usize, line: impl Into<String>) {
        let index = index.min(self.lines.len());
        self.lines.insert(index, line.into());
    }

    /// Insert every line of `new_lines` the document does not contain yet,
    /// at `offset` lines after the first line matching `anchor`.
    ///
    /// Offset `1` lands directly after the anchor, `0` directly before it.
    /// Inserted lines keep their relative order.
    pub fn insert_lines<S: AsRef<str>>(
        &mut self,
        anchor: &Anchor,
        offset: isize,
        new_lines: &[S],
    ) -> InsertOutcome {
        if new_lines.is_empty() {
            return InsertOutcome::Nothing;
        }

        let Some(index) = self.find(anchor) else {
            debug!(anchor = %anchor, "anchor not found, skipping insertion");
            return InsertOutcome::AnchorNotFound;
        };

        let mut cursor = (index as isize + offset).clamp(0, self.lines.len() as isize) as usize;
        let mut inserted = 0;
        for line in new_lines {
            let line = line.as_ref();
            if self.contains(line) {
                continue;
            }
            self.insert_at(cursor, line);
            cursor += 1;
            inserted += 1;
        }

        if inserted == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted(inserted)
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str(self.terminator)?;
            }
            if self.terminator == "\n" {
                f.write_str(line)?;
            } else {
                // inserted blocks carry `\n`
                f.write_str(&line.replace('\n', self.terminator))?;
            }
        }
        Ok(())
    }
}

/// Insert `new_lines` at `offset` lines after the first line matching
/// `anchor`, skipping lines already present. Returns `text` untouched when
/// the anchor is missing or nothing needed adding.
pub fn insert_lines<S: AsRef<str>>(
    text: &str,
    anchor: &Anchor,
    offset: isize,
    new_lines: &[S],
) -> String {
    let mut doc = Document::parse(text);
    if doc.insert_lines(anchor, offset, new_lines).changed() {
        doc.to_string()
    } else {
        text.to_string()
    }
}
