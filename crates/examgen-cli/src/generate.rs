//! Generation pipeline: decode documents, build variants, render, write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{error, info, info_span, trace};

use examgen_ingest::{load_documents, parse_specification};
use examgen_model::{Examination, Parameter};
use examgen_report::{
    Notation, RenderedTwin, check_distinct_stems, document_output_dir, render_twin, write_variant,
};

use crate::logging::redact_value;
use crate::typeset::typeset;
use crate::types::{DocumentSummary, GenerateResult, NotationOutput, VariantSummary};

/// Options of one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub notations: Vec<Notation>,
    pub seed: i64,
    /// Questions per variant; every question of the document when `None`.
    pub limit: Option<usize>,
    pub typeset: bool,
    pub dry_run: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            notations: vec![Notation::LatexMidterm],
            seed: 0,
            limit: None,
            typeset: false,
            dry_run: false,
        }
    }
}

/// Default output directory: `<stem>-output` next to the input file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "examgen".to_string());
    input.with_file_name(format!("{stem}-output"))
}

/// Generate every document of `input`.
///
/// A file that cannot be loaded fails the run. A document that fails is
/// recorded in [`GenerateResult::errors`] and the remaining documents are
/// still generated.
pub fn run_generate(input: &Path, options: &GenerateOptions) -> Result<GenerateResult> {
    let documents = load_documents(input).with_context(|| format!("load {}", input.display()))?;
    info!(
        input = %input.display(),
        documents = documents.len(),
        seed = options.seed,
        "loaded specification"
    );

    let mut summaries = Vec::with_capacity(documents.len());
    let mut errors = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        let span = info_span!("document", index);
        let _guard = span.enter();
        match generate_document(index, document, options) {
            Ok(summary) => summaries.push(summary),
            Err(err) => {
                error!("document failed: {err:#}");
                errors.push(format!("document {index}: {err:#}"));
            }
        }
    }

    let has_errors = !errors.is_empty();
    Ok(GenerateResult {
        input: input.to_path_buf(),
        seed: options.seed,
        documents: summaries,
        errors,
        has_errors,
    })
}

fn generate_document(
    index: usize,
    document: &Value,
    options: &GenerateOptions,
) -> Result<DocumentSummary> {
    let exam = parse_specification(document).context("decode specification")?;
    let limit = options.limit.unwrap_or(exam.questions().len());
    let variants = exam
        .variants(options.seed, limit)
        .context("build variants")?;
    info!(variants = variants.len(), limit, "built variants");
    check_distinct_stems(&variants)?;

    // Every twin is rendered before the first file is written.
    let mut rendered = Vec::with_capacity(variants.len());
    for variant in &variants {
        let mut twins = Vec::with_capacity(options.notations.len());
        for &notation in &options.notations {
            let twin = render_twin(variant, notation).with_context(|| {
                format!("render {notation} for section {}", section_name(variant))
            })?;
            twins.push(twin);
        }
        rendered.push(twins);
    }

    let output_dir = (!options.dry_run).then(|| document_output_dir(&options.output_dir, index));
    let mut variant_summaries = Vec::with_capacity(variants.len());
    for (variant, twins) in variants.iter().zip(&rendered) {
        let section = section_name(variant).to_string();
        let span = info_span!("variant", section = %section);
        let _guard = span.enter();
        log_questions(variant);

        let mut outputs = Vec::with_capacity(twins.len());
        for twin in twins {
            let output = match &output_dir {
                Some(dir) => write_outputs(dir, variant, twin, options.typeset)?,
                None => NotationOutput {
                    notation: twin.notation,
                    examination: None,
                    solutions: None,
                    pdfs: Vec::new(),
                },
            };
            outputs.push(output);
        }
        variant_summaries.push(VariantSummary {
            section,
            question_count: variant.questions().len(),
            points: variant.total_points(),
            outputs,
        });
    }

    Ok(DocumentSummary {
        index,
        title: exam.text(Parameter::Title).map(str::to_string),
        output_dir,
        variants: variant_summaries,
    })
}

fn write_outputs(
    dir: &Path,
    variant: &Examination,
    twin: &RenderedTwin,
    typeset_latex: bool,
) -> Result<NotationOutput> {
    let written = write_variant(dir, variant, twin)?;
    let mut pdfs = Vec::new();
    if typeset_latex && twin.notation.is_latex() {
        for tex in [&written.examination, &written.solutions] {
            let report = typeset(tex)?;
            if !report.succeeded() {
                bail!(
                    "pdflatex failed on {}: {}",
                    tex.display(),
                    report.errors.join("; ")
                );
            }
            pdfs.push(report.pdf);
        }
    }
    Ok(NotationOutput {
        notation: twin.notation,
        examination: Some(written.examination),
        solutions: Some(written.solutions),
        pdfs,
    })
}

fn section_name(variant: &Examination) -> &str {
    variant
        .section()
        .map(|section| section.name.as_str())
        .unwrap_or_default()
}

fn log_questions(variant: &Examination) {
    for (number, question) in variant.questions().iter().enumerate() {
        let statement = question.header().text();
        trace!(
            number = number + 1,
            kind = %question.kind(),
            points = question.points(),
            statement = redact_value(&statement),
            "question"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_sits_next_to_input() {
        assert_eq!(
            default_output_dir(Path::new("courses/csc225/midterm.toml")),
            PathBuf::from("courses/csc225/midterm-output")
        );
    }

    #[test]
    fn defaults_render_midterm_only() {
        let options = GenerateOptions::default();
        assert_eq!(options.notations, vec![Notation::LatexMidterm]);
        assert!(options.limit.is_none());
        assert!(!options.dry_run);
    }
}
