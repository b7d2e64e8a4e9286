//! Styled text trees produced by the markup parser.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formatting applied to a text segment.
///
/// The tag name used in markup is the lower-case variant name
/// (`<bold>`, `<inline_code>`, `<new_line>`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    /// Bold text.
    Bold,
    /// Italic text.
    Italic,
    /// A code block, formatted by the target notation.
    Code,
    /// Inline code, formatted by the target notation.
    InlineCode,
    /// Passed through to the target notation untouched.
    Custom,
    /// No styling; the notation's default escaping applies.
    Inherit,
    /// A line break is emitted before the text.
    NewLine,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Style::Bold,
        Style::Italic,
        Style::Code,
        Style::InlineCode,
        Style::Custom,
        Style::Inherit,
        Style::NewLine,
    ];

    /// Tag name as written in markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Bold => "bold",
            Style::Italic => "italic",
            Style::Code => "code",
            Style::InlineCode => "inline_code",
            Style::Custom => "custom",
            Style::Inherit => "inherit",
            Style::NewLine => "new_line",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = String;

    /// Parse a tag name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| format!("unknown style: {s}"))
    }
}

/// A piece of text with formatting, or an ordered run of such pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSegment {
    Simple { text: String, styles: Vec<Style> },
    Compound(Vec<TextSegment>),
}

impl TextSegment {
    pub fn simple(text: impl Into<String>, styles: Vec<Style>) -> Self {
        TextSegment::Simple {
            text: text.into(),
            styles,
        }
    }

    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::simple(text, vec![Style::Inherit])
    }

    pub fn compound(segments: Vec<TextSegment>) -> Self {
        TextSegment::Compound(segments)
    }

    /// Plain text. A compound joins the trimmed text of its children.
    pub fn text(&self) -> String {
        match self {
            TextSegment::Simple { text, .. } => text.clone(),
            TextSegment::Compound(segments) => segments
                .iter()
                .map(|segment| segment.text().trim().to_string())
                .collect(),
        }
    }

    /// A compound always reports `[NewLine]`.
    pub fn styles(&self) -> &[Style] {
        match self {
            TextSegment::Simple { styles, .. } => styles,
            TextSegment::Compound(_) => &[Style::NewLine],
        }
    }

    /// Direct children of a compound; empty for a simple segment.
    pub fn segments(&self) -> &[TextSegment] {
        match self {
            TextSegment::Simple { .. } => &[],
            TextSegment::Compound(segments) => segments,
        }
    }

    /// Every simple segment in document order.
    pub fn leaves(&self) -> Vec<(&str, &[Style])> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(&'a str, &'a [Style])>) {
        match self {
            TextSegment::Simple { text, styles } => out.push((text.as_str(), styles.as_slice())),
            TextSegment::Compound(segments) => {
                for segment in segments {
                    segment.collect_leaves(out);
                }
            }
        }
    }

    /// True when any leaf carries `style`.
    pub fn has_style(&self, style: Style) -> bool {
        self.leaves()
            .iter()
            .any(|(_, styles)| styles.contains(&style))
    }
}

impl fmt::Display for TextSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSegment::Simple { text, .. } => f.write_str(text),
            TextSegment::Compound(segments) => {
                for segment in segments {
                    let separator = if segment.styles().contains(&Style::NewLine) {
                        "\n"
                    } else {
                        " "
                    };
                    write!(f, "{segment}{separator}")?;
                }
                Ok(())
            }
        }
    }
}
