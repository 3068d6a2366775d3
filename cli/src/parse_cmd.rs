use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use municourt::StatsExtractor;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::output::{write_csv_file, write_json};

/// Where one PDF's JSON and CSV go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub json: PathBuf,
    pub csv: PathBuf,
}

impl Outputs {
    /// `<dir>/<base>.json` and `<dir>/<base>.csv` next to `input`.
    pub fn alongside(input: &Path) -> Outputs {
        Outputs {
            json: input.with_extension("json"),
            csv: input.with_extension("csv"),
        }
    }
}

pub fn run(
    extractor: &StatsExtractor,
    input: &Path,
    json: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    let metadata =
        fs::metadata(input).with_context(|| format!("cannot read {}", input.display()))?;

    if !metadata.is_dir() {
        let defaults = Outputs::alongside(input);
        let outputs = Outputs {
            json: json.map_or(defaults.json, Path::to_path_buf),
            csv: csv.map_or(defaults.csv, Path::to_path_buf),
        };
        let summary = parse_single(extractor, input, &outputs)?;
        eprint!("{}", summary);
        return Ok(());
    }

    let pdfs = find_pdfs(input)?;
    if pdfs.is_empty() {
        bail!("no PDF files found in {}", input.display());
    }
    if json.is_some() || csv.is_some() {
        warn!("--json and --csv only apply to a single file, writing outputs alongside each PDF");
    }
    info!("parsing {} PDF files in {}", pdfs.len(), input.display());

    pdfs.par_iter().for_each(|pdf| {
        match parse_single(extractor, pdf, &Outputs::alongside(pdf)) {
            Ok(summary) => eprint!("{}", summary),
            Err(e) => eprintln!("{}: {:#}", display_name(pdf), e),
        }
    });
    Ok(())
}

/// `*.pdf` files directly inside `dir`, sorted by name.
pub fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

/// Parse one PDF, write its outputs and return the summary for stderr.
///
/// The summary is built as one string so that parallel runs do not
/// interleave their lines.
fn parse_single(extractor: &StatsExtractor, input: &Path, outputs: &Outputs) -> Result<String> {
    let report = extractor
        .from_path(input)
        .context("error extracting PDF streams")?;

    write_json(&outputs.json, &report.records)?;
    write_csv_file(&outputs.csv, &report.records)?;

    let mut summary = String::new();
    writeln!(
        summary,
        "{}: {} pages, {} successful, {} errors → {}",
        display_name(input),
        report.pages,
        report.successful(),
        report.errors.len(),
        display_name(&outputs.json)
    )?;
    for error in &report.errors {
        writeln!(summary, "  {}", error)?;
    }
    Ok(summary)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
