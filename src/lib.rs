//! Statically decides, per compound boolean decision in a source file,
//! whether branch coverage of the compiled decision implies masking MC/DC
//! (Comar et al. 2012's tree-ROBDD criterion).
//!
//! Core: the ROBDD engine (`engine`), the decision finder and extractor
//! (`decision_finder`, `extractor`, `bool_expr`), and the tree classifier
//! with its reorder search (`tree_checker`). Everything else is the
//! ambient stack that makes those three usable end to end: a host
//! interface (`host`) any source-language front end can implement, a
//! reference implementation of that interface (`source`), a façade
//! (`analysis`) that wires it all together per file and across a run, and
//! structured reporting (`report`).

pub mod analysis;
pub mod bool_expr;
pub mod config;
pub mod decision_finder;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod host;
pub mod report;
pub mod source;
pub mod tree_checker;

pub use analysis::{analyze_file, analyze_paths, analyze_source_file, FileAnalysis, FunctionAnalysis};
pub use bool_expr::BoolExpr;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use tree_checker::{Classification, DecisionAnalysis};
