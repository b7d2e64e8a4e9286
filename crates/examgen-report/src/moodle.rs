//! Moodle question-bank XML.
//!
//! Each variant becomes a `category` followed by its questions. Compound
//! questions become a `description` carrying the shared statement, and their
//! children are graded questions named `Q<n>.<m>`. Question text is HTML
//! inside `<text>` elements.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use examgen_model::{
    ClosedEnded, Examination, OpenEnded, Parameter, Question, RenderError, Style, TextSegment,
    TrueFalse,
};

use crate::notation::Notation;
use crate::style::{StyleTable, render_segment};

/// HTML style table for Moodle question text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodleStyles;

impl StyleTable for MoodleStyles {
    fn notation(&self) -> &'static str {
        Notation::MoodleXml.slug()
    }

    fn line_break(&self) -> &'static str {
        "<br/>"
    }

    fn escape(&self, style: Style, text: &str) -> Result<String, RenderError> {
        check_xml_chars(text)?;
        Ok(match style {
            Style::Custom => text.to_string(),
            Style::Bold
            | Style::Italic
            | Style::Code
            | Style::InlineCode
            | Style::Inherit
            | Style::NewLine => escape_html(text),
        })
    }

    fn wrap(&self, style: Style, inner: String) -> Result<String, RenderError> {
        Ok(match style {
            Style::Bold => format!("<strong>{inner}</strong>"),
            Style::Italic => format!("<em>{inner}</em>"),
            Style::Code => format!("<pre><code>{inner}</code></pre>"),
            Style::InlineCode => format!("<code>{inner}</code>"),
            Style::Custom | Style::Inherit | Style::NewLine => inner,
        })
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// XML 1.0 allows no control characters other than tab, newline and
/// carriage return.
fn check_xml_chars(text: &str) -> Result<(), RenderError> {
    match text
        .chars()
        .find(|c| matches!(*c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}'))
    {
        Some(c) => Err(RenderError::UnrepresentableText {
            notation: Notation::MoodleXml.slug(),
            reason: format!("control character U+{:04X} is not allowed in XML", c as u32),
        }),
        None => Ok(()),
    }
}

/// Render a whole examination as a Moodle quiz file.
pub fn render_moodle(exam: &Examination, print_solutions: bool) -> Result<String, RenderError> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    let renderer = MoodleRenderer {
        styles: MoodleStyles,
        print_solutions,
    };
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(RenderError::xml)?;
    xml.write_event(Event::Start(BytesStart::new("quiz")))
        .map_err(RenderError::xml)?;

    write_category(&mut xml, &category_path(exam))?;
    let instructions = exam.instructions();
    if !instructions.is_empty() {
        let mut html = String::from("<ul>");
        for instruction in instructions {
            html.push_str(&format!("<li>{}</li>", renderer.text(instruction)?));
        }
        html.push_str("</ul>");
        let mut node = question_start("description");
        node.push_attribute(("id", "instructions"));
        xml.write_event(Event::Start(node)).map_err(RenderError::xml)?;
        write_name(&mut xml, "Instructions")?;
        write_html(&mut xml, "questiontext", &html)?;
        write_end(&mut xml, "question")?;
    }

    for (index, question) in exam.questions().iter().enumerate() {
        renderer.question(&mut xml, question, &format!("Q{}", index + 1))?;
    }

    write_end(&mut xml, "quiz")?;
    String::from_utf8(xml.into_inner()).map_err(RenderError::xml)
}

/// Category path: `$course$/<course>/<title>/<section>`, absent parts skipped.
fn category_path(exam: &Examination) -> String {
    let mut parts = vec!["$course$".to_string()];
    let course = exam
        .text(Parameter::CourseId)
        .or_else(|| exam.text(Parameter::Course));
    parts.extend(course.map(str::to_string));
    parts.extend(exam.text(Parameter::Title).map(str::to_string));
    parts.extend(exam.section().map(|section| section.name.clone()));
    parts
        .into_iter()
        .map(|part| part.replace('/', "-"))
        .collect::<Vec<_>>()
        .join("/")
}

struct MoodleRenderer {
    styles: MoodleStyles,
    print_solutions: bool,
}

impl MoodleRenderer {
    fn text(&self, segment: &TextSegment) -> Result<String, RenderError> {
        render_segment(&self.styles, segment)
    }

    fn question<W: Write>(
        &self,
        xml: &mut Writer<W>,
        question: &Question,
        name: &str,
    ) -> Result<(), RenderError> {
        match question {
            Question::OpenEnded(q) => self.essay(xml, q, name),
            Question::ClosedEnded(q) => self.multichoice(xml, q, name),
            Question::TrueFalse(q) => self.true_false(xml, q, name),
            Question::Compound(q) => {
                xml.write_event(Event::Start(question_start("description")))
                    .map_err(RenderError::xml)?;
                write_name(xml, name)?;
                write_html(xml, "questiontext", &self.text(q.statement())?)?;
                write_end(xml, "question")?;
                for (index, child) in q.children().iter().enumerate() {
                    self.question(xml, child, &format!("{name}.{}", index + 1))?;
                }
                Ok(())
            }
        }
    }

    fn essay<W: Write>(
        &self,
        xml: &mut Writer<W>,
        question: &OpenEnded,
        name: &str,
    ) -> Result<(), RenderError> {
        xml.write_event(Event::Start(question_start("essay")))
            .map_err(RenderError::xml)?;
        write_name(xml, name)?;
        write_html(xml, "questiontext", &self.text(question.statement())?)?;
        write_element(xml, "defaultgrade", &question.points().to_string())?;
        write_element(xml, "responseformat", "editor")?;
        write_element(
            xml,
            "responsefieldlines",
            &response_lines(question.expected_answer_length()).to_string(),
        )?;
        if self.print_solutions {
            write_html(xml, "graderinfo", &self.text(question.model_answer())?)?;
        }
        write_end(xml, "question")
    }

    fn multichoice<W: Write>(
        &self,
        xml: &mut Writer<W>,
        question: &ClosedEnded,
        name: &str,
    ) -> Result<(), RenderError> {
        let correct = question.correct_count();
        xml.write_event(Event::Start(question_start("multichoice")))
            .map_err(RenderError::xml)?;
        write_name(xml, name)?;
        write_html(xml, "questiontext", &self.text(question.statement())?)?;
        write_element(xml, "defaultgrade", &question.points().to_string())?;
        write_element(xml, "single", if correct <= 1 { "true" } else { "false" })?;
        write_element(xml, "shuffleanswers", "false")?;
        write_element(xml, "answernumbering", "ABCD")?;
        let share = fraction(correct);
        for option in question.options() {
            let value = if self.print_solutions && option.is_correct() {
                share.as_str()
            } else {
                "0"
            };
            let mut answer = BytesStart::new("answer");
            answer.push_attribute(("fraction", value));
            answer.push_attribute(("format", "html"));
            xml.write_event(Event::Start(answer)).map_err(RenderError::xml)?;
            write_element(xml, "text", &self.text(option.statement())?)?;
            write_end(xml, "answer")?;
        }
        write_end(xml, "question")
    }

    fn true_false<W: Write>(
        &self,
        xml: &mut Writer<W>,
        question: &TrueFalse,
        name: &str,
    ) -> Result<(), RenderError> {
        xml.write_event(Event::Start(question_start("truefalse")))
            .map_err(RenderError::xml)?;
        write_name(xml, name)?;
        write_html(xml, "questiontext", &self.text(question.statement())?)?;
        write_element(xml, "defaultgrade", &question.points().to_string())?;
        for (label, value) in [("true", true), ("false", false)] {
            let fraction = if self.print_solutions && question.answer() == value {
                "100"
            } else {
                "0"
            };
            let mut answer = BytesStart::new("answer");
            answer.push_attribute(("fraction", fraction));
            answer.push_attribute(("format", "moodle_auto_format"));
            xml.write_event(Event::Start(answer)).map_err(RenderError::xml)?;
            write_element(xml, "text", label)?;
            write_end(xml, "answer")?;
        }
        write_end(xml, "question")
    }
}

/// Percentage credited to each of `correct` answers.
fn fraction(correct: usize) -> String {
    if correct == 0 {
        return "0".to_string();
    }
    let share = format!("{:.5}", 100.0 / correct as f64);
    share.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Editor height for an expected answer length such as `3in` or `4cm`.
fn response_lines(length: &str) -> u32 {
    let trimmed = length.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let lines = match (number.parse::<f64>(), unit.trim()) {
        (Ok(value), "in") => value * 5.0,
        (Ok(value), "cm") => value * 2.0,
        _ => 10.0,
    };
    (lines.round() as u32).clamp(5, 40)
}

fn question_start(kind: &str) -> BytesStart<'_> {
    let mut node = BytesStart::new("question");
    node.push_attribute(("type", kind));
    node
}

fn write_category<W: Write>(xml: &mut Writer<W>, path: &str) -> Result<(), RenderError> {
    xml.write_event(Event::Start(question_start("category")))
        .map_err(RenderError::xml)?;
    xml.write_event(Event::Start(BytesStart::new("category")))
        .map_err(RenderError::xml)?;
    write_element(xml, "text", path)?;
    write_end(xml, "category")?;
    write_end(xml, "question")
}

fn write_name<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<(), RenderError> {
    xml.write_event(Event::Start(BytesStart::new("name")))
        .map_err(RenderError::xml)?;
    write_element(xml, "text", name)?;
    write_end(xml, "name")
}

/// `<wrapper format="html"><text>html</text></wrapper>`
fn write_html<W: Write>(xml: &mut Writer<W>, wrapper: &str, html: &str) -> Result<(), RenderError> {
    let mut node = BytesStart::new(wrapper);
    node.push_attribute(("format", "html"));
    xml.write_event(Event::Start(node)).map_err(RenderError::xml)?;
    write_element(xml, "text", html)?;
    write_end(xml, wrapper)
}

fn write_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<(), RenderError> {
    check_xml_chars(text)?;
    xml.write_event(Event::Start(BytesStart::new(name)))
        .map_err(RenderError::xml)?;
    xml.write_event(Event::Text(BytesText::new(text)))
        .map_err(RenderError::xml)?;
    write_end(xml, name)
}

fn write_end<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<(), RenderError> {
    xml.write_event(Event::End(BytesEnd::new(name)))
        .map_err(RenderError::xml)
}
