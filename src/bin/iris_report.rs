//! Headless report: `iris_report [SPECIES...] [--export PATH]`.
//!
//! Prints the summary, correlation matrix and PCA for the chosen species
//! (all three when none are given).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use iris_explorer::analysis::{
    COMPONENTS, correlate, filter, full_selection, parse_selection, project, summarize,
};
use iris_explorer::data::Feature;
use iris_explorer::{export, insights};

struct Args {
    species: Vec<String>,
    export: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut species = Vec::new();
    let mut export = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => {
                let path = args.next().context("--export needs a file path")?;
                export = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => species.push(arg),
        }
    }
    Ok(Args { species, export })
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let dataset = iris_explorer::data::load()?;

    let selection = if args.species.is_empty() {
        full_selection()
    } else {
        parse_selection(&args.species)?
    };
    let subset = filter(&dataset, &selection)?;

    let summary = summarize(&subset);
    let names: Vec<&str> = selection.iter().map(|s| s.name()).collect();
    println!("Selection: {}", names.join(", "));
    println!(
        "Samples: {}  Species: {}  Features: {}  Missing values: {}",
        summary.count, summary.distinct_labels, summary.feature_count, summary.missing_values
    );

    println!("\nCorrelation matrix");
    print!("{:<14}", "");
    for f in Feature::ALL {
        print!("{:>14}", f.label());
    }
    println!();
    let corr = correlate(&subset);
    for (f, row) in Feature::ALL.iter().zip(corr.rows()) {
        print!("{:<14}", f.label());
        for value in row {
            match value {
                Some(r) => print!("{r:>14.3}"),
                None => print!("{:>14}", "-"),
            }
        }
        println!();
    }
    println!("{}", insights::correlation_note(&corr));

    let pca = project(&subset)?;
    println!("\nPrincipal components");
    for c in 0..COMPONENTS {
        println!("  {}", insights::component_label(&pca, c));
    }
    println!("\nLoadings{:>10}{:>10}", "PC1", "PC2");
    for f in Feature::ALL {
        println!("{:<14}{:>8.3}{:>10.3}", f.label(), pca.loading(f, 0), pca.loading(f, 1));
    }
    println!("\n{}", insights::pca_note(&pca));

    if let Some(path) = args.export {
        export::write(&path, &subset, &pca)
            .with_context(|| format!("exporting to {}", path.display()))?;
        println!("\nWrote {} rows to {}", subset.len(), path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
