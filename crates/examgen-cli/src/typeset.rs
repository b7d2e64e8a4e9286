//! Typesetting generated LaTeX with `pdflatex`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Directory, next to the `.tex` sources, that receives the PDFs.
pub const PDF_DIR: &str = "PDF";

/// Two passes resolve page references and the point totals of the exam class.
const PASSES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetReport {
    pub pdf: PathBuf,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TypesetReport {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Typeset one `.tex` file into `<its directory>/PDF/<stem>.pdf`.
///
/// A missing `pdflatex` binary is an error; compilation errors are returned in
/// the report so the caller decides whether they fail the run.
pub fn typeset(tex: &Path) -> Result<TypesetReport> {
    let source_dir = tex.parent().unwrap_or_else(|| Path::new("."));
    let stem = tex
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .with_context(|| format!("no file name in {}", tex.display()))?;
    let pdf_dir = source_dir.join(PDF_DIR);
    fs::create_dir_all(&pdf_dir).with_context(|| format!("create {}", pdf_dir.display()))?;

    let mut report = TypesetReport {
        pdf: pdf_dir.join(format!("{stem}.pdf")),
        errors: Vec::new(),
        warnings: Vec::new(),
    };
    for pass in 1..=PASSES {
        let output = Command::new("pdflatex")
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-output-directory")
            .arg(&pdf_dir)
            .arg(tex)
            .output()
            .with_context(|| format!("run pdflatex on {}", tex.display()))?;
        let log = String::from_utf8_lossy(&output.stdout);
        let (errors, warnings) = scan_log(&log);
        debug!(
            tex = %tex.display(),
            pass,
            errors = errors.len(),
            warnings = warnings.len(),
            "pdflatex pass"
        );
        report.errors = errors;
        report.warnings = warnings;
        if !output.status.success() && report.errors.is_empty() {
            report
                .errors
                .push(format!("pdflatex exited with {}", output.status));
        }
        if !report.succeeded() {
            break;
        }
    }
    for warning in &report.warnings {
        warn!(tex = %tex.display(), "{warning}");
    }
    remove_by_products(&pdf_dir, &stem)?;
    Ok(report)
}

/// Split pdflatex terminal output into error and warning lines.
pub fn scan_log(log: &str) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for line in log.lines() {
        if let Some(message) = line.strip_prefix('!') {
            errors.push(message.trim().to_string());
        } else if line.contains("LaTeX Warning") {
            warnings.push(line.trim().to_string());
        }
    }
    (errors, warnings)
}

/// Delete `.aux`, `.log` and other auxiliary files produced for `stem`.
fn remove_by_products(pdf_dir: &Path, stem: &str) -> Result<()> {
    let entries =
        fs::read_dir(pdf_dir).with_context(|| format!("read {}", pdf_dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("read {}", pdf_dir.display()))?
            .path();
        let same_stem = path.file_stem().is_some_and(|name| name == stem);
        let is_pdf = path.extension().is_some_and(|ext| ext == "pdf");
        if same_stem && !is_pdf && path.is_file() {
            fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        }
    }
    Ok(())
}
