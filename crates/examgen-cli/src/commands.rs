use anyhow::Result;
use comfy_table::Table;
use rand::Rng;
use tracing::info;

use examgen_cli::generate::{GenerateOptions, default_output_dir, run_generate};
use examgen_cli::types::GenerateResult;
use examgen_report::Notation;

use crate::cli::GenerateArgs;
use crate::summary::apply_table_style;

pub fn run_notations() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Notation", "Extension", "Description"]);
    apply_table_style(&mut table);
    for notation in Notation::ALL {
        table.add_row(vec![
            notation.slug(),
            notation.extension(),
            notation.description(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_generate_command(args: &GenerateArgs) -> Result<GenerateResult> {
    let seed = args.seed.unwrap_or_else(|| {
        let seed = rand::thread_rng().r#gen::<i64>();
        info!(seed, "no seed given, drew a random one");
        seed
    });
    let mut notations: Vec<Notation> = Vec::with_capacity(args.notations.len());
    for &notation in &args.notations {
        if !notations.contains(&notation) {
            notations.push(notation);
        }
    }
    let options = GenerateOptions {
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.input)),
        notations,
        seed,
        limit: args.limit,
        typeset: args.typeset,
        dry_run: args.dry_run,
    };
    run_generate(&args.input, &options)
}
