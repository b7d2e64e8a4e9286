//! Conversion of a decoded specification tree into an [`Examination`].
//!
//! The tree is a `serde_json::Value` regardless of the file encoding. Each
//! text field may carry inline markup and is parsed with
//! [`text_segment`](crate::markup::text_segment).

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use examgen_model::{
    AnswerOption, ClosedEnded, CompoundQuestion, ConfigurationError, Examination, OpenEnded,
    Parameter, ParameterValue, Question, QuestionKind, Section, TextSegment, TrueFalse,
};

use crate::error::{IngestError, Result};
use crate::markup::text_segment;

/// Build an examination from one decoded specification document.
pub fn parse_specification(document: &Value) -> Result<Examination> {
    let object = document.as_object().ok_or_else(|| {
        ConfigurationError::InvalidDocument("expected a mapping with parameters and questions".into())
    })?;
    let parameters = match object.get("parameters") {
        Some(value) => parse_parameters(value)?,
        None => BTreeMap::new(),
    };
    let questions = match object.get("questions") {
        Some(value) => parse_questions(value, "questions")?,
        None => {
            return Err(ConfigurationError::MissingField {
                path: "document".to_string(),
                field: "questions",
            }
            .into());
        }
    };
    debug!(
        parameter_count = parameters.len(),
        question_count = questions.len(),
        "parsed specification"
    );
    Ok(Examination::new(parameters, questions))
}

fn parse_parameters(value: &Value) -> Result<BTreeMap<Parameter, ParameterValue>> {
    let mut parameters = BTreeMap::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                insert_parameter(&mut parameters, key, value)?;
            }
        }
        // List of single-key mappings.
        Value::Array(entries) => {
            for entry in entries {
                let map = entry.as_object().ok_or_else(|| {
                    ConfigurationError::InvalidDocument(
                        "parameter list entries must be mappings".into(),
                    )
                })?;
                for (key, value) in map {
                    insert_parameter(&mut parameters, key, value)?;
                }
            }
        }
        _ => {
            return Err(ConfigurationError::InvalidDocument(
                "parameters must be a mapping or a list of mappings".into(),
            )
            .into());
        }
    }
    Ok(parameters)
}

fn insert_parameter(
    parameters: &mut BTreeMap<Parameter, ParameterValue>,
    key: &str,
    value: &Value,
) -> Result<()> {
    let parameter: Parameter = key.parse()?;
    let parsed = match parameter {
        Parameter::Sections => ParameterValue::Sections(parse_sections(value)?),
        Parameter::Instructions => ParameterValue::Segments(parse_instructions(value)?),
        _ => ParameterValue::Text(parameter_text(parameter, value)?),
    };
    parameters.insert(parameter, parsed);
    Ok(())
}

fn parse_sections(value: &Value) -> Result<Vec<Section>> {
    let entries = value.as_array().ok_or(ConfigurationError::InvalidParameter {
        parameter: Parameter::Sections,
        reason: "expected a list of sections".into(),
    })?;
    entries.iter().map(parse_section).collect()
}

fn parse_section(value: &Value) -> Result<Section> {
    let bad = |reason: &str| ConfigurationError::InvalidParameter {
        parameter: Parameter::Sections,
        reason: reason.to_string(),
    };
    if let Some(name) = scalar_text(value) {
        return Ok(Section::new(name));
    }
    let map = value
        .as_object()
        .ok_or_else(|| bad("a section must be a name or a mapping"))?;
    let name = lookup(map, "name")
        .and_then(scalar_text)
        .ok_or_else(|| bad("a section needs a name"))?;
    let mut section = Section::new(name);
    if let Some(ta) = lookup(map, "ta").and_then(scalar_text) {
        section = section.with_teaching_assistant(ta);
    }
    if let Some(students) = lookup(map, "students") {
        let count = students
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| bad("students must be a non-negative integer"))?;
        section = section.with_student_count(count);
    }
    Ok(section)
}

/// Case-insensitive key lookup.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn parse_instructions(value: &Value) -> Result<Vec<TextSegment>> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let raw = scalar_text(item).ok_or(ConfigurationError::InvalidParameter {
                parameter: Parameter::Instructions,
                reason: "instructions must be text".into(),
            })?;
            text_segment(&raw).map_err(|source| IngestError::Markup {
                path: format!("parameters.INSTRUCTIONS[{index}]"),
                source,
            })
        })
        .collect()
}

fn parameter_text(parameter: Parameter, value: &Value) -> Result<String> {
    if let Some(text) = scalar_text(value) {
        return Ok(text);
    }
    if let Value::Array(items) = value {
        let parts: Option<Vec<String>> = items.iter().map(scalar_text).collect();
        if let Some(parts) = parts {
            return Ok(parts.join(", "));
        }
    }
    Err(ConfigurationError::InvalidParameter {
        parameter,
        reason: "expected text or a list of text".into(),
    }
    .into())
}

/// Strings, numbers and booleans as text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn parse_questions(value: &Value, path: &str) -> Result<Vec<Question>> {
    let nodes = value.as_array().ok_or_else(|| ConfigurationError::InvalidField {
        path: parent_path(path),
        field: field_name(path),
        expected: "a list of questions",
    })?;
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| parse_question(node, &format!("{path}[{index}]")))
        .collect()
}

fn parent_path(path: &str) -> String {
    match path.rsplit_once('.') {
        Some((parent, _)) => parent.to_string(),
        None => "document".to_string(),
    }
}

fn field_name(path: &str) -> &'static str {
    if path.ends_with("children") {
        "children"
    } else {
        "questions"
    }
}

fn parse_question(node: &Value, path: &str) -> Result<Question> {
    let map = node.as_object().ok_or_else(|| ConfigurationError::InvalidDocument(format!(
        "{path} must be a mapping"
    )))?;
    let tag = map
        .get("type")
        .ok_or_else(|| missing(path, "type"))?
        .as_str()
        .ok_or_else(|| invalid(path, "type", "a string"))?;
    let kind: QuestionKind = tag
        .parse()
        .map_err(|_| ConfigurationError::UnknownQuestionType {
            path: path.to_string(),
            found: tag.to_string(),
        })?;

    let statement = text_field(map, path, "statement")?;
    let question: Question = match kind {
        QuestionKind::OpenEnded => OpenEnded::new(
            statement,
            text_field(map, path, "answer")?,
            points_field(map, path)?,
            scalar_field(map, path, "length")?,
        )
        .into(),
        QuestionKind::ClosedEnded => {
            let points = points_field(map, path)?;
            let options = map
                .get("options")
                .ok_or_else(|| missing(path, "options"))?
                .as_array()
                .ok_or_else(|| invalid(path, "options", "a list of options"))?
                .iter()
                .enumerate()
                .map(|(index, option)| parse_option(option, &format!("{path}.options[{index}]")))
                .collect::<Result<Vec<_>>>()?;
            ClosedEnded::new(statement, points, options).into()
        }
        QuestionKind::TrueFalse => {
            let answer = map
                .get("answer")
                .ok_or_else(|| missing(path, "answer"))?
                .as_bool()
                .ok_or_else(|| invalid(path, "answer", "a boolean"))?;
            TrueFalse::new(statement, answer, points_field(map, path)?).into()
        }
        QuestionKind::Compound => {
            let children_path = format!("{path}.children");
            let children = parse_questions(
                map.get("children").ok_or_else(|| missing(path, "children"))?,
                &children_path,
            )?;
            let points = if map.contains_key("points") {
                points_field(map, path)?
            } else {
                children.iter().map(Question::points).sum()
            };
            CompoundQuestion::new(statement, points, children).into()
        }
    };
    Ok(question)
}

fn parse_option(node: &Value, path: &str) -> Result<AnswerOption> {
    let map = node.as_object().ok_or_else(|| ConfigurationError::InvalidDocument(format!(
        "{path} must be a mapping"
    )))?;
    let correct = map
        .get("correct")
        .ok_or_else(|| missing(path, "correct"))?
        .as_bool()
        .ok_or_else(|| invalid(path, "correct", "a boolean"))?;
    Ok(AnswerOption::new(correct, text_field(map, path, "statement")?))
}

fn text_field(map: &Map<String, Value>, path: &str, field: &'static str) -> Result<TextSegment> {
    let raw = scalar_field(map, path, field)?;
    text_segment(&raw).map_err(|source| IngestError::Markup {
        path: format!("{path}.{field}"),
        source,
    })
}

fn scalar_field(map: &Map<String, Value>, path: &str, field: &'static str) -> Result<String> {
    let value = map.get(field).ok_or_else(|| missing(path, field))?;
    scalar_text(value).ok_or_else(|| invalid(path, field, "text").into())
}

fn points_field(map: &Map<String, Value>, path: &str) -> Result<u32> {
    map.get("points")
        .ok_or_else(|| missing(path, "points"))?
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| invalid(path, "points", "a non-negative integer").into())
}

fn missing(path: &str, field: &'static str) -> ConfigurationError {
    ConfigurationError::MissingField {
        path: path.to_string(),
        field,
    }
}

fn invalid(path: &str, field: &'static str, expected: &'static str) -> ConfigurationError {
    ConfigurationError::InvalidField {
        path: path.to_string(),
        field,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use examgen_model::Style;

    use super::*;

    fn document() -> Value {
        json!({
            "parameters": [
                {"COURSE": "Operating Systems"},
                {"course_id": "CSC 360"},
                {"INSTRUCTORS": ["Ada", "Grace"]},
                {"TIME_LIMIT": 50},
                {"SECTIONS": [{"name": "A01", "TA": "Linus", "students": 42}, "A02"]},
                {"INSTRUCTIONS": ["Write in <bold>pen</bold>.", "No notes."]}
            ],
            "questions": [
                {"type": "open-ended", "statement": "Define a <italic>process</italic>.",
                 "answer": "A program in execution.", "points": 4, "length": "2in"},
                {"type": "closed-ended", "statement": "Pick one", "points": 2,
                 "options": [{"correct": true, "statement": "fork"},
                             {"correct": false, "statement": "spoon"}]},
                {"type": "true-false", "statement": "Threads share a heap.", "answer": true, "points": 1},
                {"type": "compound", "statement": "Scheduling",
                 "children": [
                    {"type": "true-false", "statement": "RR is preemptive.", "answer": true, "points": 2},
                    {"type": "open-ended", "statement": "Why?", "answer": "Quantum.", "points": 3, "length": 3}
                 ]}
            ]
        })
    }

    #[test]
    fn parses_a_complete_document() {
        let exam = parse_specification(&document()).expect("parse");
        assert_eq!(exam.text(Parameter::Course), Some("Operating Systems"));
        assert_eq!(exam.text(Parameter::CourseId), Some("CSC 360"));
        assert_eq!(exam.text(Parameter::Instructors), Some("Ada, Grace"));
        assert_eq!(exam.text(Parameter::TimeLimit), Some("50"));
        let sections = exam.sections().expect("sections");
        assert_eq!(
            sections[0],
            Section::new("A01").with_teaching_assistant("Linus").with_student_count(42)
        );
        assert_eq!(sections[1], Section::new("A02"));
        assert_eq!(exam.instructions().len(), 2);
        assert!(exam.instructions()[0].has_style(Style::Bold));
        assert_eq!(exam.questions().len(), 4);
        assert_eq!(exam.total_points(), 4 + 2 + 1 + 5);
    }

    #[test]
    fn compound_points_default_to_children_sum() {
        let exam = parse_specification(&document()).expect("parse");
        assert_eq!(exam.questions()[3].points(), 5);

        let explicit = json!({"questions": [
            {"type": "compound", "statement": "S", "points": 10, "children": [
                {"type": "true-false", "statement": "T", "answer": false, "points": 1}
            ]}
        ]});
        let exam = parse_specification(&explicit).expect("parse");
        assert_eq!(exam.questions()[0].points(), 10);
    }

    #[test]
    fn parameters_may_be_a_mapping() {
        let doc = json!({"parameters": {"title": "Midterm"}, "questions": []});
        let exam = parse_specification(&doc).expect("parse");
        assert_eq!(exam.text(Parameter::Title), Some("Midterm"));
    }

    #[test]
    fn unknown_question_type_names_the_path() {
        let doc = json!({"questions": [
            {"type": "compound", "statement": "S", "children": [
                {"type": "essay", "statement": "E"}
            ]}
        ]});
        let err = parse_specification(&doc).expect_err("unknown type");
        assert!(matches!(
            err,
            IngestError::Configuration(ConfigurationError::UnknownQuestionType { ref path, ref found })
                if path == "questions[0].children[0]" && found == "essay"
        ));
    }

    #[test]
    fn missing_fields_are_reported() {
        let doc = json!({"questions": [{"type": "true-false", "statement": "S", "points": 1}]});
        let err = parse_specification(&doc).expect_err("missing answer");
        assert_eq!(
            err.to_string(),
            "missing field 'answer' at questions[0]"
        );

        let doc = json!({"parameters": {}});
        assert!(parse_specification(&doc).is_err());
    }

    #[test]
    fn negative_points_are_rejected() {
        let doc = json!({"questions": [{"type": "true-false", "statement": "S", "answer": true, "points": -1}]});
        let err = parse_specification(&doc).expect_err("negative points");
        assert_eq!(
            err.to_string(),
            "field 'points' at questions[0] must be a non-negative integer"
        );
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let doc = json!({"parameters": {"ROOM": "ECS 123"}, "questions": []});
        let err = parse_specification(&doc).expect_err("unknown parameter");
        assert_eq!(err.to_string(), "unknown parameter 'ROOM'");
    }

    #[test]
    fn markup_errors_carry_the_field_path() {
        let doc = json!({"questions": [
            {"type": "true-false", "statement": "<blink>x</blink>", "answer": true, "points": 1}
        ]});
        let err = parse_specification(&doc).expect_err("bad markup");
        assert_eq!(
            err.to_string(),
            "questions[0].statement: unknown style tag <blink> at byte 0"
        );
    }
}
