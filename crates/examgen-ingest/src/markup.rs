//! Inline style markup (`<bold>…</bold>`, `<code>…</code>`, …).
//!
//! The text is tokenized once into opening and closing tags. Tags of the same
//! name (case-insensitive) are paired with a stack, so `<code>a<code>b</code>
//! c</code>` matches the outer pair. The first opening tag of a span that has
//! its partner inside the span splits it into before, inner and after; the
//! inner and after parts are split the same way. Unpaired tags are plain text.

use std::collections::HashMap;
use std::ops::Range;

use examgen_model::{ParseError, Style, TextSegment};

/// Parse a raw text field into a segment tree.
///
/// One leaf is returned as a simple segment; several are wrapped in a
/// compound. Nesting depth is bounded only by memory.
pub fn text_segment(raw: &str) -> Result<TextSegment, ParseError> {
    let tags = tokenize(raw);
    let partners = pair_tags(&tags);

    let mut leaves = Vec::new();
    let mut styles: Vec<Style> = Vec::new();
    let mut work = vec![Work::Split {
        tags: 0..tags.len(),
        bytes: 0..raw.len(),
    }];
    while let Some(item) = work.pop() {
        let (span, bytes) = match item {
            Work::Leave => {
                styles.pop();
                continue;
            }
            Work::Split { tags, bytes } => (tags, bytes),
        };
        let found = span.clone().find_map(|open| match partners[open] {
            Some(close) if close < span.end => Some((open, close)),
            _ => None,
        });
        let Some((open_index, close_index)) = found else {
            leaves.push(leaf(&raw[bytes], &styles));
            continue;
        };
        let (open, close) = (&tags[open_index], &tags[close_index]);
        let style: Style = open.name.parse().map_err(|_| ParseError::UnknownStyle {
            name: open.name.to_string(),
            position: open.start,
        })?;

        leaves.push(leaf(&raw[bytes.start..open.start], &styles));
        work.push(Work::Split {
            tags: close_index + 1..span.end,
            bytes: close.end..bytes.end,
        });
        work.push(Work::Leave);
        work.push(Work::Split {
            tags: open_index + 1..close_index,
            bytes: open.end..close.start,
        });
        styles.push(style);
    }

    if leaves.len() == 1 {
        if let Some(leaf) = leaves.pop() {
            return Ok(leaf);
        }
    }
    Ok(TextSegment::compound(leaves))
}

enum Work {
    /// Split a span of tags and the bytes they cover.
    Split {
        tags: Range<usize>,
        bytes: Range<usize>,
    },
    /// Leave the innermost enclosing tag.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Open,
    Close,
}

/// A `<name>` or `</name>` tag, as byte offsets into the raw text.
#[derive(Debug)]
struct Tag<'a> {
    kind: TagKind,
    name: &'a str,
    start: usize,
    end: usize,
}

/// Leaf styles run innermost first; text outside every tag inherits.
fn leaf(text: &str, enclosing: &[Style]) -> TextSegment {
    if enclosing.is_empty() {
        TextSegment::plain(text)
    } else {
        TextSegment::simple(text, enclosing.iter().rev().copied().collect())
    }
}

fn tokenize(raw: &str) -> Vec<Tag<'_>> {
    let mut tags = Vec::new();
    let mut cursor = 0;
    while let Some(relative) = raw[cursor..].find('<') {
        let start = cursor + relative;
        let rest = &raw[start + 1..];
        let (kind, name_from) = match rest.strip_prefix('/') {
            Some(_) => (TagKind::Close, start + 2),
            None => (TagKind::Open, start + 1),
        };
        let name_len = tag_name_len(&raw[name_from..]);
        if name_len > 0 && raw[name_from + name_len..].starts_with('>') {
            let end = name_from + name_len + 1;
            tags.push(Tag {
                kind,
                name: &raw[name_from..name_from + name_len],
                start,
                end,
            });
            cursor = end;
        } else {
            cursor = start + 1;
        }
    }
    tags
}

fn tag_name_len(text: &str) -> usize {
    text.bytes()
        .take_while(|b| b.is_ascii_alphabetic() || *b == b'_')
        .count()
}

/// Index of the closing partner of every opening tag, if it has one.
fn pair_tags(tags: &[Tag<'_>]) -> Vec<Option<usize>> {
    let mut partners = vec![None; tags.len()];
    let mut pending: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, tag) in tags.iter().enumerate() {
        let key = tag.name.to_ascii_lowercase();
        match tag.kind {
            TagKind::Open => pending.entry(key).or_default().push(index),
            TagKind::Close => {
                if let Some(open) = pending.get_mut(&key).and_then(Vec::pop) {
                    partners[open] = Some(index);
                }
            }
        }
    }
    partners
}
