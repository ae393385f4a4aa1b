//! Tree Configuration
//!
//! Defines the configuration structures and enums used to train a
//! [`DecisionTree`](crate::tree::tree::DecisionTree), including the
//! information-gain weighting for continuous features and the
//! feature-importance methods.
use crate::constants::{DEFAULT_MIN_NODE_CAPACITY, DEFAULT_SEED};
use crate::errors::SaplingError;
use crate::utils::validate_positive_parameter;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// How the two halves of a continuous median split are weighted
/// when computing information gain.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GainWeighting {
    /// Weights derived from the median position alone: with `n` rows and
    /// `k = (n + 2) / 2` (integer division), the low half weighs `k / n` and
    /// the high half `(n - k) / n`. An approximation of the observed shares.
    ///
    /// This is a behavior change from the classic formulation, which weighs
    /// the halves by the unnormalized row counts `(n + 2) / 2.0` and
    /// `n - (n + 2) / 2.0`. Here the weights are divided by `n`, so they sum
    /// to one, and `k` is whole, so for odd `n` each half differs from the
    /// classic weight by half a row.
    ///
    /// The weights ignore how many rows actually fall in each half. On a
    /// constant column the high half is empty, yet the column still scores
    /// a positive gain of `(n - k) / n` times the table entropy. If that
    /// column wins the optimal split, the split leaves a single partition
    /// and is abandoned, so the node stays a leaf even when another feature
    /// is informative. [`GainWeighting::Counted`] scores such a column zero.
    #[default]
    Analytic,
    /// Weights are the observed share of rows in each half.
    Counted,
}

/// Method to calculate variable importance.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ImportanceMethod {
    /// The number of times a feature is used to split the data.
    Weight,
    /// The average information gain across all splits the feature is used in.
    Gain,
    /// The total information gain across all splits the feature is used in.
    TotalGain,
}

fn default_min_node_capacity() -> usize {
    DEFAULT_MIN_NODE_CAPACITY
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_num_threads() -> Option<usize> {
    None
}

/// Parameters that control how a tree is grown.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TreeConfig {
    /// Minimum number of rows a node must hold to be split, and a
    /// partition must hold to survive a split.
    #[serde(default = "default_min_node_capacity")]
    pub min_node_capacity: usize,
    /// Weighting of continuous halves in the information gain.
    #[serde(default)]
    pub gain_weighting: GainWeighting,
    /// Seed for the shuffle that precedes median selection.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of threads used for training. `None` uses the global rayon pool.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            min_node_capacity: DEFAULT_MIN_NODE_CAPACITY,
            gain_weighting: GainWeighting::Analytic,
            seed: DEFAULT_SEED,
            num_threads: None,
        }
    }
}

impl TreeConfig {
    // Set methods for paramters

    /// Set the minimum node capacity.
    /// * `min_node_capacity` - Minimum number of rows per node.
    pub fn set_min_node_capacity(mut self, min_node_capacity: usize) -> Self {
        self.min_node_capacity = min_node_capacity;
        self
    }

    /// Set the gain weighting for continuous features.
    /// * `gain_weighting` - See [`GainWeighting`].
    pub fn set_gain_weighting(mut self, gain_weighting: GainWeighting) -> Self {
        self.gain_weighting = gain_weighting;
        self
    }

    /// Set the shuffle seed.
    /// * `seed` - Integer value used to seed the median shuffle.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of threads.
    /// * `num_threads` - Set the number of threads to be used during training.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Check that the parameters are usable.
    pub fn validate(&self) -> Result<(), SaplingError> {
        if let Some(n) = self.num_threads {
            validate_positive_parameter(n, "num_threads")?;
        }
        Ok(())
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Dump a configuration as a json object
    fn json_dump(&self) -> Result<String, SaplingError> {
        serde_json::to_string(self).map_err(|e| SaplingError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, SaplingError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| SaplingError::UnableToRead(e.to_string()))
    }
}

impl ConfigIO for TreeConfig {}
