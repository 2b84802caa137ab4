//! The façade: host parser → decision finder → extractor → tree checker,
//! aggregated per function, per file, and across a whole run (§4.5).

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::bool_expr::collect_variable_order;
use crate::config::AnalysisConfig;
use crate::decision_finder::find_decisions;
use crate::error::AnalysisError;
use crate::extractor::extract;
use crate::host::SourceFile;
use crate::source;
use crate::tree_checker::{check_decision, Classification, DecisionAnalysis};

#[derive(Debug, Clone)]
pub struct FunctionAnalysis {
    pub name: String,
    pub line: u32,
    pub decisions: Vec<DecisionAnalysis>,
}

impl FunctionAnalysis {
    pub fn overall_classification(&self) -> Option<Classification> {
        self.decisions.iter().map(|d| d.classification).max()
    }
}

#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub functions: Vec<FunctionAnalysis>,
}

impl FileAnalysis {
    pub fn has_findings(&self) -> bool {
        self.functions
            .iter()
            .any(|f| f.decisions.iter().any(|d| d.classification != Classification::Tree))
    }
}

/// Analyzes a single already-parsed source file.
///
/// Initializers are named `init` per the host adapter's convention (§4.5);
/// declarations with no body (`func.body() == None`) contribute nothing.
pub fn analyze_source_file(path: &Path, source: &dyn SourceFile, config: &AnalysisConfig) -> FileAnalysis {
    let mut functions = Vec::new();
    for func in source.functions() {
        let Some(body) = func.body() else { continue };
        log::debug!("{}: analyzing function `{}`", path.display(), func.name());

        let decisions = find_decisions(body)
            .into_iter()
            .map(|decision_root| {
                let bool_expr = extract(decision_root);
                let order = collect_variable_order(&bool_expr);
                check_decision(&bool_expr, &order, config)
            })
            .collect();

        functions.push(FunctionAnalysis {
            name: func.name().to_string(),
            line: func.line(),
            decisions,
        });
    }
    FileAnalysis { path: path.to_path_buf(), functions }
}

/// Reads and parses `path` with the reference source adapter, then
/// analyzes it.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FileAnalysis, AnalysisError> {
    let parsed = source::parse_source_file(path)?;
    Ok(analyze_source_file(path, &parsed, config))
}

/// Expands `paths` (recursing into directories), analyzes every file in
/// parallel, and returns the files that succeeded alongside the ones that
/// failed. An `Io`/`Parse` error on one file never stops the others (§7).
pub fn analyze_paths(
    paths: &[PathBuf],
    config: &AnalysisConfig,
) -> (Vec<FileAnalysis>, Vec<(PathBuf, AnalysisError)>) {
    let files = expand_paths(paths);
    log::info!("analyzing {} file(s)", files.len());

    let results: Vec<Result<FileAnalysis, (PathBuf, AnalysisError)>> = files
        .par_iter()
        .map(|path| analyze_file(path, config).map_err(|e| (path.clone(), e)))
        .collect();

    let mut analyses = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => errors.push(e),
        }
    }
    (analyses, errors)
}

fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
                if entry.file_type().is_file() && is_source_file(entry.path()) {
                    out.push(entry.path().to_path_buf());
                }
            }
        } else {
            out.push(path.clone());
        }
    }
    out
}

fn is_source_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("swift"))
}
