use crate::data::FeatureValue;
use crate::errors::SaplingError;
use crate::feature::Feature;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One row of data: features keyed by title, plus an optional target.
///
/// A record with a target is a training record, one without is a query.
/// Every record handed to the same [`Table`](crate::table::Table) must carry
/// the same titles with the same kind per title. This is not verified;
/// a record lacking a title surfaces as [`SaplingError::MissingFeature`]
/// when that title is needed.
#[derive(Clone, Debug)]
pub struct Record<T> {
    features: BTreeMap<String, Feature>,
    target: Option<T>,
}

impl<T> Record<T> {
    /// Create a new record.
    ///
    /// * `features` - The cells of the row. At least one, no title repeated.
    /// * `target` - The label of the row, `None` for a query.
    pub fn new<I>(features: I, target: Option<T>) -> Result<Self, SaplingError>
    where
        I: IntoIterator<Item = Feature>,
    {
        let mut map = BTreeMap::new();
        for feature in features {
            match map.entry(feature.title().to_string()) {
                Entry::Vacant(e) => {
                    e.insert(feature);
                }
                Entry::Occupied(e) => {
                    return Err(SaplingError::InvalidArgument(format!(
                        "feature title {} appears more than once in the record",
                        e.key()
                    )));
                }
            }
        }
        if map.is_empty() {
            return Err(SaplingError::InvalidArgument(
                "a record must contain at least 1 feature".to_string(),
            ));
        }
        Ok(Record { features: map, target })
    }

    /// Create a training record.
    pub fn labeled<I>(features: I, target: T) -> Result<Self, SaplingError>
    where
        I: IntoIterator<Item = Feature>,
    {
        Record::new(features, Some(target))
    }

    /// Create a query record.
    pub fn query<I>(features: I) -> Result<Self, SaplingError>
    where
        I: IntoIterator<Item = Feature>,
    {
        Record::new(features, None)
    }

    pub fn features(&self) -> &BTreeMap<String, Feature> {
        &self.features
    }

    pub fn feature(&self, title: &str) -> Option<&Feature> {
        self.features.get(title)
    }

    /// Get the value of a feature, failing if the record does not have it.
    pub fn value(&self, title: &str) -> Result<&FeatureValue, SaplingError> {
        self.features
            .get(title)
            .map(Feature::value)
            .ok_or_else(|| SaplingError::MissingFeature(title.to_string()))
    }

    /// Feature titles, in sorted order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn is_query(&self) -> bool {
        self.target.is_none()
    }
}
