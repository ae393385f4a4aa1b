#[cfg(test)]
mod fixtures;

// Modules
pub mod config;
pub mod constants;
pub mod data;
pub mod errors;
pub mod feature;
pub mod node;
pub mod range;
pub mod record;
pub mod table;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::{ConfigIO, GainWeighting, ImportanceMethod, TreeConfig};
pub use data::{FeatureValue, TargetData};
pub use errors::SaplingError;
pub use feature::{Feature, FeatureGenerator, FeatureKind};
pub use node::{BranchKey, Node};
pub use range::{FiniteRange, MedianSplit, Range, SemiRange};
pub use record::Record;
pub use table::Table;
pub use tree::tree::DecisionTree;
