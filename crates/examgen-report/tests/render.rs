//! Integration tests for examination rendering.

use proptest::prelude::*;
use serde_json::json;

use examgen_ingest::parse_specification;
use examgen_model::Examination;
use examgen_report::{Notation, check_distinct_stems, render, render_twin, write_variant};

fn master() -> Examination {
    let document = json!({
        "parameters": [
            {"COURSE": "Data Structures & Algorithms"},
            {"COURSE_ID": "CSC 225"},
            {"TITLE": "Midterm 1"},
            {"DATE": "October 3"},
            {"TIME_LIMIT": "50 minutes"},
            {"SECTIONS": [{"name": "A01", "TA": "Sam"}, {"name": "A02"}]},
            {"INSTRUCTIONS": ["Answer <bold>all</bold> questions."]}
        ],
        "questions": [
            {"type": "closed-ended", "statement": "Worst case of quicksort?", "points": 2,
             "options": [
                {"correct": false, "statement": "<inline_code>O(n log n)</inline_code>"},
                {"correct": true, "statement": "<inline_code>O(n^2)</inline_code>"},
                {"correct": false, "statement": "<inline_code>O(n)</inline_code>"}
             ]},
            {"type": "true-false", "statement": "A heap is a complete binary tree.", "answer": true, "points": 1},
            {"type": "open-ended", "statement": "Explain amortized analysis.",
             "answer": "Average cost per operation over a sequence.", "points": 4, "length": "2in"},
            {"type": "compound", "statement": "Hashing", "children": [
                {"type": "true-false", "statement": "Chaining tolerates load > 1.", "answer": true, "points": 1},
                {"type": "open-ended", "statement": "Define a collision.", "answer": "Two keys, one slot.",
                 "points": 2, "length": "1in"}
            ]}
        ]
    });
    parse_specification(&document).expect("parse specification")
}

#[test]
fn latex_twins_differ_only_in_solutions() {
    let variants = master().variants(11, 4).expect("variants");
    for variant in &variants {
        let twin = render_twin(variant, Notation::LatexMidterm).expect("render");
        assert!(twin.examination.starts_with("\\documentclass[10pt,addpoints]{exam}"));
        assert!(twin.solutions.starts_with("\\documentclass[10pt,addpoints,answers]{exam}"));
        assert!(!twin.examination.contains("\\item*"));
        assert!(!twin.examination.contains("\\begin{solution}"));
        assert!(twin.solutions.contains("\\item* \\lstinline!O(n^2)!"));
        assert!(!twin.solutions.contains("\\makeemptybox"));
        assert_eq!(
            twin.examination.matches("\\question[").count(),
            twin.solutions.matches("\\question[").count()
        );
        assert!(twin.examination.contains("Data Structures \\& Algorithms"));
    }
}

#[test]
fn absent_parameters_are_omitted() {
    let exam = parse_specification(&json!({
        "parameters": {"SECTIONS": ["B01"]},
        "questions": [{"type": "true-false", "statement": "S", "answer": true, "points": 1}]
    }))
    .expect("parse");
    let variant = exam.variants(0, 1).expect("variants").remove(0);
    let tex = render(&variant, Notation::LatexMidterm, false).expect("render");
    assert!(!tex.contains("\\course"));
    assert!(!tex.contains("\\examtitle"));
    assert!(!tex.contains("Instructions"));
    assert!(!tex.contains("% course information"));
    assert!(tex.contains("\\newcommand{\\examsection}{B01}"));
}

#[test]
fn quiz_layout_is_compact() {
    let variant = master().variants(3, 2).expect("variants").remove(0);
    let tex = render(&variant, Notation::LatexQuiz, false).expect("render");
    assert!(tex.contains("\\usepackage[margin=0.5in]{geometry}"));
    assert!(!tex.contains("% student information"));
    assert!(tex.contains("Name:"));
}

#[test]
fn moodle_names_compound_children() {
    let exam = master();
    let xml = render(&exam, Notation::MoodleXml, true).expect("render");
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<text>Q4.1</text>"));
    assert!(xml.contains("<text>Q4.2</text>"));
    assert!(xml.contains("<graderinfo format=\"html\">"));
    assert!(xml.contains("&lt;strong&gt;all&lt;/strong&gt;"));

    let learner = render(&exam, Notation::MoodleXml, false).expect("render");
    assert!(!learner.contains("graderinfo"));
    assert!(!learner.contains("fraction=\"100\""));
}

#[test]
fn writes_twin_files_per_section() {
    let dir = tempfile::tempdir().expect("temp dir");
    let variants = master().variants(5, 3).expect("variants");
    for variant in &variants {
        let twin = render_twin(variant, Notation::MoodleXml).expect("render");
        write_variant(dir.path(), variant, &twin).expect("write");
    }
    for section in ["A01", "A02"] {
        for half in ["examinations", "solutions"] {
            let path = dir
                .path()
                .join("moodle-xml")
                .join(half)
                .join(format!("{section}.xml"));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
}

fn sectioned(names: &[&str]) -> Examination {
    parse_specification(&json!({
        "parameters": {"SECTIONS": names},
        "questions": [{"type": "true-false", "statement": "S", "answer": true, "points": 1}]
    }))
    .expect("parse")
}

#[test]
fn colliding_section_names_are_rejected() {
    let variants = sectioned(&["Lab 1", "Lab_1", "A01"])
        .variants(0, 1)
        .expect("variants");
    let err = check_distinct_stems(&variants).expect_err("collision");
    let message = err.to_string();
    assert!(message.contains("Lab 1"), "{message}");
    assert!(message.contains("Lab_1"), "{message}");
}

#[test]
fn unicode_section_names_keep_their_letters() {
    let dir = tempfile::tempdir().expect("temp dir");
    let variants = sectioned(&["Sección A", "Sección B"])
        .variants(0, 1)
        .expect("variants");
    check_distinct_stems(&variants).expect("distinct stems");
    for variant in &variants {
        let twin = render_twin(variant, Notation::LatexQuiz).expect("render");
        write_variant(dir.path(), variant, &twin).expect("write");
    }
    let examinations = dir.path().join("latex-quiz/examinations");
    assert!(examinations.join("Sección_A.tex").is_file());
    assert!(examinations.join("Sección_B.tex").is_file());
}

proptest! {
    #[test]
    fn rendering_is_deterministic(seed in any::<i64>()) {
        let exam = master();
        let first = exam.variants(seed, 4).expect("variants");
        let second = exam.variants(seed, 4).expect("variants");
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(
                render_twin(a, Notation::LatexQuiz).expect("render"),
                render_twin(b, Notation::LatexQuiz).expect("render")
            );
        }
    }
}
