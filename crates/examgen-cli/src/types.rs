use std::path::PathBuf;

use examgen_report::Notation;

/// Outcome of one `generate` run over an input file.
#[derive(Debug)]
pub struct GenerateResult {
    pub input: PathBuf,
    pub seed: i64,
    pub documents: Vec<DocumentSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct DocumentSummary {
    pub index: usize,
    pub title: Option<String>,
    /// `None` for dry runs.
    pub output_dir: Option<PathBuf>,
    pub variants: Vec<VariantSummary>,
}

#[derive(Debug)]
pub struct VariantSummary {
    pub section: String,
    pub question_count: usize,
    pub points: u32,
    pub outputs: Vec<NotationOutput>,
}

/// Files produced for one variant in one notation.
#[derive(Debug)]
pub struct NotationOutput {
    pub notation: Notation,
    pub examination: Option<PathBuf>,
    pub solutions: Option<PathBuf>,
    pub pdfs: Vec<PathBuf>,
}
