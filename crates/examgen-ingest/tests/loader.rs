//! Tests for specification file loading.

use std::fs;
use std::path::{Path, PathBuf};

use examgen_ingest::{IngestError, load_documents, parse_specification};
use examgen_model::{Parameter, QuestionKind};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write file");
    path
}

const TOML_SPEC: &str = r#"
[[examinations]]
questions = [
    { type = "true-false", statement = "A <inline_code>Box</inline_code> owns its value.", answer = true, points = 1 },
]

[examinations.parameters]
TITLE = "Quiz 1"
SECTIONS = [{ name = "B01" }, { name = "B02", TA = "Ferris" }]

[[examinations]]
questions = []

[examinations.parameters]
TITLE = "Quiz 2"
SECTIONS = ["B03"]
"#;

#[test]
fn loads_toml_examinations() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "quizzes.toml", TOML_SPEC);

    let documents = load_documents(&path).expect("load");
    assert_eq!(documents.len(), 2);

    let first = parse_specification(&documents[0]).expect("parse first");
    assert_eq!(first.text(Parameter::Title), Some("Quiz 1"));
    assert_eq!(first.questions()[0].kind(), QuestionKind::TrueFalse);
    let sections = first.sections().expect("sections");
    assert_eq!(sections[1].teaching_assistant.as_deref(), Some("Ferris"));

    let second = parse_specification(&documents[1]).expect("parse second");
    assert_eq!(second.sections().expect("sections")[0].name, "B03");
}

#[test]
fn loads_json_document_list() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(
        dir.path(),
        "exams.json",
        r#"[{"questions": []}, {"questions": [{"type": "riddle"}]}]"#,
    );
    let documents = load_documents(&path).expect("load");
    assert_eq!(documents.len(), 2);
    assert!(parse_specification(&documents[0]).is_ok());
    assert!(parse_specification(&documents[1]).is_err());
}

#[test]
fn reports_missing_and_malformed_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(matches!(
        load_documents(&dir.path().join("absent.json")),
        Err(IngestError::FileNotFound { .. })
    ));

    let broken = write(dir.path(), "broken.json", "{ not json");
    assert!(matches!(
        load_documents(&broken),
        Err(IngestError::Json { .. })
    ));

    let xml = write(dir.path(), "exam.xml", "<questions/>");
    assert!(matches!(
        load_documents(&xml),
        Err(IngestError::UnsupportedFormat { .. })
    ));

    let yaml = write(dir.path(), "broken.yaml", "parameters: [unclosed");
    assert!(matches!(
        load_documents(&yaml),
        Err(IngestError::Yaml { .. })
    ));
}

const YAML_STREAM: &str = r#"
parameters:
  - COURSE: Operating Systems
  - TITLE: Midterm
  - SECTIONS:
      - name: A01
        TA: Kim
      - A02
  - INSTRUCTIONS:
      - Answer <bold>every</bold> question.
questions:
  - type: open-ended
    statement: Define a <italic>race condition</italic>.
    answer: Two threads touch shared state without ordering.
    points: 3
    length: 2in
  - type: closed-ended
    statement: Which call creates a process?
    points: 2
    options:
      - correct: true
        statement: <inline_code>fork</inline_code>
      - correct: false
        statement: <inline_code>exec</inline_code>
---
parameters:
  - TITLE: Quiz
  - SECTIONS: [B01]
questions:
  - type: true-false
    statement: Threads share an address space.
    answer: true
    points: 1
"#;

#[test]
fn loads_yaml_stream_one_examination_per_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "exams.yml", YAML_STREAM);

    let documents = load_documents(&path).expect("load");
    assert_eq!(documents.len(), 2);

    let midterm = parse_specification(&documents[0]).expect("parse midterm");
    assert_eq!(midterm.text(Parameter::Course), Some("Operating Systems"));
    assert_eq!(midterm.questions().len(), 2);
    assert_eq!(midterm.questions()[1].kind(), QuestionKind::ClosedEnded);
    let sections = midterm.sections().expect("sections");
    assert_eq!(sections[0].teaching_assistant.as_deref(), Some("Kim"));
    assert_eq!(sections[1].name, "A02");

    let quiz = parse_specification(&documents[1]).expect("parse quiz");
    assert_eq!(quiz.text(Parameter::Title), Some("Quiz"));
    assert_eq!(quiz.total_points(), 1);
}
