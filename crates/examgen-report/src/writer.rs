//! Writing rendered twins to disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use examgen_model::Examination;

use crate::render::RenderedTwin;

/// Files written for one variant in one notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTwin {
    pub examination: PathBuf,
    pub solutions: PathBuf,
}

/// Output directory of the `index`-th document of an input file: the first
/// uses `base`, later ones append their index (`out`, `out1`, `out2`, ...).
pub fn document_output_dir(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let mut name = base
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(index.to_string());
    base.with_file_name(name)
}

/// File stem for a section name: letters, digits, `-` and `_` kept, anything
/// else replaced by `_`.
pub fn section_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "examination".to_string()
    } else {
        stem
    }
}

/// File stem of a variant, derived from its section name.
pub fn variant_file_stem(variant: &Examination) -> String {
    section_file_stem(
        variant
            .section()
            .map(|section| section.name.as_str())
            .unwrap_or_default(),
    )
}

/// Fail when two variants would write to the same file.
pub fn check_distinct_stems(variants: &[Examination]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(variants.len());
    for variant in variants {
        let name = variant
            .section()
            .map(|section| section.name.as_str())
            .unwrap_or_default();
        if let Some(previous) = seen.insert(variant_file_stem(variant), name) {
            bail!("sections {previous:?} and {name:?} map to the same file name");
        }
    }
    Ok(())
}

/// Write both halves of `twin` under `<output_dir>/<notation>/`.
///
/// Rendering is already complete, so a failure here never leaves a half
/// rendered file behind.
pub fn write_variant(
    output_dir: &Path,
    variant: &Examination,
    twin: &RenderedTwin,
) -> Result<WrittenTwin> {
    let stem = variant_file_stem(variant);
    let file_name = format!("{stem}.{}", twin.notation.extension());
    let notation_dir = output_dir.join(twin.notation.slug());

    let examination = notation_dir.join("examinations").join(&file_name);
    let solutions = notation_dir.join("solutions").join(&file_name);
    write_file(&examination, &twin.examination)?;
    write_file(&solutions, &twin.solutions)?;
    info!(
        notation = twin.notation.slug(),
        examination = %examination.display(),
        solutions = %solutions.display(),
        "wrote variant"
    );
    Ok(WrittenTwin {
        examination,
        solutions,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
