//! The ROBDD engine: arena node types plus the manager that builds and
//! queries BDDs for tree-shape classification.

pub mod manager;
pub mod node;

pub use manager::Bdd;
pub use node::{NodeId, VarIndex};
