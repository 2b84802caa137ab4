//! Structured (`--json`) and plain-text reporting (§6 outbound schema).
//!
//! Follows the teacher's `store/json.rs` pattern of handing a `serde`-
//! derived struct straight to `serde_json`, rather than building a
//! separate string-based renderer for the structured form.

use serde::Serialize;

use crate::analysis::FileAnalysis;
use crate::tree_checker::Classification;

impl Serialize for Classification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let name = match self {
            Classification::Tree => "TREE",
            Classification::NonTreeCorrectable => "NON_TREE_CORRECTABLE",
            Classification::NonTreeNonCorrectable => "NON_TREE_NON_CORRECTABLE",
        };
        serializer.serialize_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonTreeEntry {
    pub file: String,
    pub function: String,
    pub line: u32,
    pub decisions: Vec<OwnedDecisionAnalysisReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedDecisionAnalysisReport {
    pub condition_count: usize,
    pub node_count: usize,
    pub classification: Classification,
    pub original_order: Vec<String>,
    pub suggested_order: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub files_analyzed: usize,
    pub total_functions: usize,
    pub functions_with_decisions: usize,
    pub total_decisions: usize,
    pub tree_decisions: usize,
    pub correctable_decisions: usize,
    pub non_correctable_decisions: usize,
    pub non_tree_entries: Vec<NonTreeEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFileReport {
    pub files: Vec<FileAnalysisReport>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysisReport {
    pub path: String,
    pub functions: Vec<FunctionAnalysisReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionAnalysisReport {
    pub name: String,
    pub line: u32,
    pub decisions: Vec<OwnedDecisionAnalysisReport>,
}

pub fn build_report(files: Vec<FileAnalysis>) -> MultiFileReport {
    let summary = summarize(&files);
    let files = files
        .into_iter()
        .map(|file| FileAnalysisReport {
            path: file.path.display().to_string(),
            functions: file
                .functions
                .into_iter()
                .map(|func| FunctionAnalysisReport {
                    name: func.name,
                    line: func.line,
                    decisions: func.decisions.into_iter().map(to_owned_report).collect(),
                })
                .collect(),
        })
        .collect();
    MultiFileReport { files, summary }
}

fn to_owned_report(d: crate::tree_checker::DecisionAnalysis) -> OwnedDecisionAnalysisReport {
    OwnedDecisionAnalysisReport {
        condition_count: d.condition_count,
        node_count: d.node_count,
        classification: d.classification,
        original_order: d.original_order,
        suggested_order: d.suggested_order,
    }
}

fn summarize(files: &[FileAnalysis]) -> Summary {
    let mut summary = Summary { files_analyzed: files.len(), ..Summary::default() };

    for file in files {
        for func in &file.functions {
            summary.total_functions += 1;
            if !func.decisions.is_empty() {
                summary.functions_with_decisions += 1;
            }

            let mut non_tree_here = Vec::new();
            for decision in &func.decisions {
                summary.total_decisions += 1;
                match decision.classification {
                    Classification::Tree => summary.tree_decisions += 1,
                    Classification::NonTreeCorrectable => {
                        summary.correctable_decisions += 1;
                        non_tree_here.push(to_owned_report(decision.clone()));
                    }
                    Classification::NonTreeNonCorrectable => {
                        summary.non_correctable_decisions += 1;
                        non_tree_here.push(to_owned_report(decision.clone()));
                    }
                }
            }

            if !non_tree_here.is_empty() {
                summary.non_tree_entries.push(NonTreeEntry {
                    file: file.path.display().to_string(),
                    function: func.name.clone(),
                    line: func.line,
                    decisions: non_tree_here,
                });
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::source;
    use std::path::Path;

    #[test]
    fn json_report_shape_round_trips_through_serde_json() {
        let src = "func f() { if (b && c) || a { } }";
        let parsed = source::parse_source_str(src).expect("parse");
        let analysis = crate::analysis::analyze_source_file(Path::new("f.swift"), &parsed, &AnalysisConfig::default());
        let report = build_report(vec![analysis]);
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("\"NON_TREE_CORRECTABLE\""));
        assert!(json.contains("\"suggestedOrder\""));
        assert!(json.contains("\"nonTreeEntries\""));
    }

    #[test]
    fn summary_counts_match_decisions() {
        let src = "func f() { if a && b { } if (b && c) || a { } }";
        let parsed = source::parse_source_str(src).expect("parse");
        let analysis = crate::analysis::analyze_source_file(Path::new("f.swift"), &parsed, &AnalysisConfig::default());
        let report = build_report(vec![analysis]);
        assert_eq!(report.summary.total_decisions, 2);
        assert_eq!(report.summary.tree_decisions, 1);
        assert_eq!(report.summary.correctable_decisions, 1);
        assert_eq!(report.summary.non_tree_entries.len(), 1);
    }
}
