//! Feature
//!
//! Named, typed scalar values attached to a record, and the column
//! templates that produce them.
use crate::data::FeatureValue;
use crate::errors::SaplingError;
use crate::utils::items_to_strings;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// How the values of a feature column are split.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FeatureKind {
    /// Each distinct value gets its own branch.
    Discrete,
    /// Values are binarized at the local median.
    Continuous,
}

impl FromStr for FeatureKind {
    type Err = SaplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "discrete" | "0" => Ok(FeatureKind::Discrete),
            "continuous" | "1" => Ok(FeatureKind::Continuous),
            _ => Err(SaplingError::ParseString(
                s.to_string(),
                "FeatureKind".to_string(),
                items_to_strings(vec!["discrete", "continuous", "0", "1"]),
            )),
        }
    }
}

impl Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureKind::Discrete => write!(f, "discrete"),
            FeatureKind::Continuous => write!(f, "continuous"),
        }
    }
}

/// A single cell of a record: a titled, kind-tagged value.
///
/// Two features are equal when their titles are equal; they then
/// describe the same column, whatever their values.
#[derive(Clone, Debug)]
pub struct Feature {
    title: String,
    value: FeatureValue,
    kind: FeatureKind,
}

impl Feature {
    /// Create a new feature.
    ///
    /// * `title` - Name of the column this feature belongs to.
    /// * `value` - The value of the cell.
    /// * `kind` - Whether the column is split by value or by median.
    pub fn new(title: impl Into<String>, value: impl Into<FeatureValue>, kind: FeatureKind) -> Self {
        Feature {
            title: title.into(),
            value: value.into(),
            kind,
        }
    }

    /// Create a discrete feature.
    pub fn discrete(title: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Feature::new(title, value, FeatureKind::Discrete)
    }

    /// Create a continuous feature.
    pub fn continuous(title: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Feature::new(title, value, FeatureKind::Continuous)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> &FeatureValue {
        &self.value
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn is_continuous(&self) -> bool {
        self.kind == FeatureKind::Continuous
    }
}

impl PartialEq for Feature {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Feature {}

impl Hash for Feature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={} ({})", self.title, self.value, self.kind)
    }
}

/// Template for one column: stamps out features sharing a title and kind.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct FeatureGenerator {
    title: String,
    kind: FeatureKind,
}

impl FeatureGenerator {
    pub fn new(title: impl Into<String>, kind: FeatureKind) -> Self {
        FeatureGenerator {
            title: title.into(),
            kind,
        }
    }

    /// Create a feature of this column holding `value`.
    pub fn generate(&self, value: impl Into<FeatureValue>) -> Feature {
        Feature::new(self.title.clone(), value, self.kind)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }
}

impl FromStr for FeatureGenerator {
    type Err = SaplingError;

    /// Parse a column header of the form `title:kind`, e.g. `age:1`
    /// or `sex:discrete`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((title, kind)) if !title.trim().is_empty() => {
                Ok(FeatureGenerator::new(title.trim(), kind.parse::<FeatureKind>()?))
            }
            _ => Err(SaplingError::ParseString(
                s.to_string(),
                "FeatureGenerator".to_string(),
                items_to_strings(vec!["title:discrete", "title:continuous", "title:0", "title:1"]),
            )),
        }
    }
}
