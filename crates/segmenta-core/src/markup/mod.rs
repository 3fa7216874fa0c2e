//! Inline markup model for segment source and target text
//!
//! Segment text arrives as rich-text markup in which inline tags are
//! self-closing placeholder elements carrying a `data-ref` attribute:
//!
//! ```text
//! Click <img data-ref="1" src="..."/>Save<img data-ref="2" src="..."/> &amp; exit
//! ```
//!
//! A [`Markup`] is the flat sequence of pieces making up such a string. Each
//! piece is either one text unit (a grapheme, or a whole character entity)
//! or one [`Tag`]. Caret positions are piece offsets, so a tag occupies
//! exactly one position. Serialization writes every piece back verbatim.

mod tag_index;

pub use tag_index::TagIndex;

use crate::error::{MarkupError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<[A-Za-z][\w:-]*\s[^<>]*?\bdata-ref="(\d+)"[^<>]*?/>"#)
            .expect("tag placeholder pattern is valid")
    })
}

fn entity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("entity pattern is valid"))
}

/// Inline tag placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Identifier shared between the source and target copies of the tag
    pub id: u32,
    /// Placeholder element exactly as it appears in the markup
    pub markup: String,
}

impl Tag {
    pub fn new(id: u32, markup: impl Into<String>) -> Self {
        Self {
            id,
            markup: markup.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Tag(Tag),
}

impl Piece {
    fn as_str(&self) -> &str {
        match self {
            Piece::Text(text) => text,
            Piece::Tag(tag) => &tag.markup,
        }
    }
}

/// Parsed segment text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pieces: Vec<Piece>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse markup, splitting out `data-ref` placeholders as tags
    pub fn parse(markup: &str) -> Self {
        let mut pieces = Vec::new();
        let mut last = 0;

        for caps in tag_regex().captures_iter(markup) {
            let (Some(whole), Some(id)) = (
                caps.get(0),
                caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()),
            ) else {
                continue;
            };
            push_text_units(&mut pieces, &markup[last..whole.start()]);
            pieces.push(Piece::Tag(Tag::new(id, whole.as_str())));
            last = whole.end();
        }
        push_text_units(&mut pieces, &markup[last..]);

        Self { pieces }
    }

    /// Number of caret positions (text units plus tags)
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Tag ids in document order
    pub fn tag_ids(&self) -> Vec<u32> {
        self.tags().map(|tag| tag.id).collect()
    }

    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Tag(tag) => Some(tag),
            Piece::Text(_) => None,
        })
    }

    pub fn contains_tag(&self, id: u32) -> bool {
        self.tag_position(id).is_some()
    }

    /// Caret position of the first occurrence of tag `id`
    pub fn tag_position(&self, id: u32) -> Option<usize> {
        self.pieces
            .iter()
            .position(|piece| matches!(piece, Piece::Tag(tag) if tag.id == id))
    }

    /// True when some tag id occurs more than once
    pub fn has_duplicate_tags(&self) -> bool {
        let mut seen = HashSet::new();
        self.tags().any(|tag| !seen.insert(tag.id))
    }

    pub fn insert_tag_at(&mut self, position: usize, tag: Tag) -> Result<()> {
        self.check_position(position)?;
        self.pieces.insert(position, Piece::Tag(tag));
        Ok(())
    }

    /// Insert plain text at `position`, escaping markup-significant
    /// characters. Returns the number of positions inserted.
    pub fn insert_text_at(&mut self, position: usize, text: &str) -> Result<usize> {
        self.check_position(position)?;
        let mut units = Vec::new();
        push_text_units(&mut units, &escape_text(text));
        let count = units.len();
        self.pieces.splice(position..position, units);
        Ok(count)
    }

    /// Remove the characters or tags in `range`
    pub fn remove_range(&mut self, range: std::ops::Range<usize>) -> Result<()> {
        self.check_position(range.end)?;
        if range.start > range.end {
            return Err(MarkupError::OutOfRange {
                position: range.start,
                len: range.end,
            }
            .into());
        }
        self.pieces.drain(range);
        Ok(())
    }

    /// Remove every occurrence of tag `id`. Returns the position of the first
    /// removed occurrence.
    pub fn remove_tag(&mut self, id: u32) -> Option<usize> {
        let first = self.tag_position(id)?;
        self.pieces
            .retain(|piece| !matches!(piece, Piece::Tag(tag) if tag.id == id));
        Some(first)
    }

    /// Remove all tags, returning how many were removed
    pub fn remove_all_tags(&mut self) -> usize {
        let before = self.pieces.len();
        self.pieces.retain(|piece| matches!(piece, Piece::Text(_)));
        before - self.pieces.len()
    }

    /// Keep only the first occurrence of each tag whose id is in `allowed`.
    /// Returns the number of tags removed.
    pub fn retain_tags(&mut self, allowed: &HashSet<u32>) -> usize {
        let before = self.pieces.len();
        let mut seen = HashSet::new();
        self.pieces.retain(|piece| match piece {
            Piece::Tag(tag) => allowed.contains(&tag.id) && seen.insert(tag.id),
            Piece::Text(_) => true,
        });
        before - self.pieces.len()
    }

    /// Text content with tags left out
    pub fn plain_text(&self) -> String {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Text(text) => Some(text.as_str()),
                Piece::Tag(_) => None,
            })
            .collect()
    }

    /// Number of text units (tags excluded)
    pub fn text_len(&self) -> usize {
        self.pieces
            .iter()
            .filter(|piece| matches!(piece, Piece::Text(_)))
            .count()
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position > self.pieces.len() {
            return Err(MarkupError::OutOfRange {
                position,
                len: self.pieces.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            f.write_str(piece.as_str())?;
        }
        Ok(())
    }
}

impl From<&str> for Markup {
    fn from(markup: &str) -> Self {
        Self::parse(markup)
    }
}

/// Split raw markup text into entities and graphemes
fn push_text_units(pieces: &mut Vec<Piece>, text: &str) {
    let mut last = 0;
    for entity in entity_regex().find_iter(text) {
        pieces.extend(
            text[last..entity.start()]
                .graphemes(true)
                .map(|g| Piece::Text(g.to_string())),
        );
        pieces.push(Piece::Text(entity.as_str().to_string()));
        last = entity.end();
    }
    pieces.extend(
        text[last..]
            .graphemes(true)
            .map(|g| Piece::Text(g.to_string())),
    );
}

/// Escape characters that would otherwise be read as markup
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}
