//! Style tables and the shared text-segment walk.

use examgen_model::{RenderError, Style, TextSegment};

/// A notation's mapping from [`Style`] to escaping and wrapping markup.
///
/// Both methods match every style; adding a style fails the build until
/// each table handles it.
pub trait StyleTable {
    /// Notation name used in errors.
    fn notation(&self) -> &'static str;

    /// Markup emitted before a segment carrying [`Style::NewLine`].
    fn line_break(&self) -> &'static str;

    /// Escape raw text for the segment's leading style.
    fn escape(&self, style: Style, text: &str) -> Result<String, RenderError>;

    /// Wrap already-rendered text in the markup for `style`.
    fn wrap(&self, style: Style, inner: String) -> Result<String, RenderError>;

    /// Reject style combinations the notation cannot nest.
    fn check_styles(&self, _styles: &[Style]) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Render a segment tree: compounds concatenate their children.
pub fn render_segment<T: StyleTable + ?Sized>(
    table: &T,
    segment: &TextSegment,
) -> Result<String, RenderError> {
    match segment {
        TextSegment::Simple { text, styles } => render_simple(table, text, styles),
        TextSegment::Compound(children) => {
            let mut out = String::new();
            for child in children {
                out.push_str(&render_segment(table, child)?);
            }
            Ok(out)
        }
    }
}

/// Escape once using the first style that is not a line break, then wrap
/// with every style in list order.
fn render_simple<T: StyleTable + ?Sized>(
    table: &T,
    text: &str,
    styles: &[Style],
) -> Result<String, RenderError> {
    table.check_styles(styles)?;
    let leading = styles
        .iter()
        .copied()
        .find(|style| *style != Style::NewLine)
        .unwrap_or(Style::Inherit);
    let mut rendered = table.escape(leading, text)?;
    for style in styles {
        rendered = table.wrap(*style, rendered)?;
    }
    if styles.contains(&Style::NewLine) {
        rendered.insert_str(0, table.line_break());
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Leaves text untouched except for bold.
    struct Plain;

    impl StyleTable for Plain {
        fn notation(&self) -> &'static str {
            "plain"
        }

        fn line_break(&self) -> &'static str {
            ""
        }

        fn escape(&self, _style: Style, text: &str) -> Result<String, RenderError> {
            Ok(text.to_string())
        }

        fn wrap(&self, style: Style, inner: String) -> Result<String, RenderError> {
            match style {
                Style::Bold => Ok(format!("*{inner}*")),
                Style::Code => Err(RenderError::UnsupportedStyle {
                    notation: self.notation(),
                    style,
                }),
                Style::Italic
                | Style::InlineCode
                | Style::Custom
                | Style::Inherit
                | Style::NewLine => Ok(inner),
            }
        }
    }

    #[test]
    fn identity_table_concatenates_leaf_text() {
        let segment = TextSegment::compound(vec![
            TextSegment::plain("Is "),
            TextSegment::simple("this", vec![Style::NewLine]),
            TextSegment::compound(vec![TextSegment::plain(" ok"), TextSegment::plain("?")]),
        ]);
        assert_eq!(render_segment(&Plain, &segment).expect("render"), "Is this ok?");
    }

    #[test]
    fn styles_wrap_in_list_order() {
        let segment = TextSegment::simple("x", vec![Style::Italic, Style::Bold, Style::Bold]);
        assert_eq!(render_segment(&Plain, &segment).expect("render"), "**x**");
    }

    #[test]
    fn unmapped_style_fails() {
        let segment = TextSegment::simple("fn main() {}", vec![Style::Code]);
        assert_eq!(
            render_segment(&Plain, &segment),
            Err(RenderError::UnsupportedStyle {
                notation: "plain",
                style: Style::Code,
            })
        );
    }
}
