use super::tree::DecisionTree;
use crate::data::TargetData;
use crate::errors::SaplingError;
use crate::node::Node;
use crate::record::Record;
use rayon::prelude::*;

impl<T: TargetData> DecisionTree<T> {
    /// The node a query stops at: a leaf, or the first node none of whose
    /// branches admits the query's value.
    fn stopping_node(&self, record: &Record<T>) -> Result<&Node<T>, SaplingError> {
        let mut node = self.root();
        while let Some(title) = node.split_feature() {
            let value = record.value(title)?;
            match node.route(value) {
                Some(child) => node = child,
                None => break,
            }
        }
        Ok(node)
    }

    /// Predict the target of a single record.
    ///
    /// * `record` - The query. Only the features the tree splits on along the
    ///   query's path are read; a missing one is an error.
    pub fn predict(&self, record: &Record<T>) -> Result<T, SaplingError> {
        self.stopping_node(record)?.dominant_target().cloned()
    }

    /// Predict many records in parallel, in order.
    pub fn predict_all(&self, records: &[Record<T>]) -> Result<Vec<T>, SaplingError> {
        records.par_iter().map(|r| self.predict(r)).collect()
    }

    /// Fraction of `records` whose target is predicted correctly.
    ///
    /// * `records` - Labeled rows. Must not be empty.
    pub fn score(&self, records: &[Record<T>]) -> Result<f64, SaplingError> {
        if records.is_empty() {
            return Err(SaplingError::InvalidArgument(
                "cannot score a tree on 0 records".to_string(),
            ));
        }
        let hits = records
            .par_iter()
            .map(|r| -> Result<usize, SaplingError> {
                let target = r.target().ok_or_else(|| {
                    SaplingError::InvalidArgument("scored records must have a target value".to_string())
                })?;
                Ok(usize::from(self.predict(r)? == *target))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hits.iter().sum::<usize>() as f64 / records.len() as f64)
    }
}
