//! Table
//!
//! An immutable view over a non-empty set of labeled records. A table knows
//! how impure its targets are, how much each feature would reduce that
//! impurity, and how to partition itself by a feature.
use crate::config::GainWeighting;
use crate::constants::{DEFAULT_SEED, MEDIAN_SPLIT_BRANCHES};
use crate::data::{FeatureValue, TargetData};
use crate::errors::SaplingError;
use crate::node::BranchKey;
use crate::range::{MedianSplit, Range, SemiRange};
use crate::record::Record;
use crate::utils::{median, shannon_entropy};
use hashbrown::HashMap;
use log::trace;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Labeled rows plus, for every continuous feature, the median split of
/// that column over these rows.
///
/// Child tables produced by [`Table::split`] share the rows of their parent
/// and only hold the indices of their own rows. Medians are local: every
/// table computes them over its own rows.
///
/// All rows must carry the same feature titles with the same kind per
/// title. This is a precondition of the caller and is not verified.
#[derive(Clone, Debug)]
pub struct Table<T> {
    rows: Arc<Vec<Record<T>>>,
    index: Vec<usize>,
    ranges: HashMap<String, MedianSplit<FeatureValue>>,
    weighting: GainWeighting,
    seed: u64,
}

impl<T: TargetData> Table<T> {
    /// Create a table with the default gain weighting and seed.
    ///
    /// * `records` - Training rows. At least one, all with a target.
    pub fn new(records: Vec<Record<T>>) -> Result<Self, SaplingError> {
        Table::with_options(records, GainWeighting::default(), DEFAULT_SEED)
    }

    /// Create a table.
    ///
    /// * `records` - Training rows. At least one, all with a target.
    /// * `weighting` - How continuous halves are weighted in the information gain.
    /// * `seed` - Seed of the shuffle preceding median selection.
    pub fn with_options(records: Vec<Record<T>>, weighting: GainWeighting, seed: u64) -> Result<Self, SaplingError> {
        if records.is_empty() {
            return Err(SaplingError::InvalidArgument(
                "a table must contain at least 1 record".to_string(),
            ));
        }
        if records.iter().any(Record::is_query) {
            return Err(SaplingError::InvalidArgument(
                "all the records of a table must have a target value".to_string(),
            ));
        }
        let index = (0..records.len()).collect();
        Table::from_parts(Arc::new(records), index, weighting, seed)
    }

    fn from_parts(
        rows: Arc<Vec<Record<T>>>,
        index: Vec<usize>,
        weighting: GainWeighting,
        seed: u64,
    ) -> Result<Self, SaplingError> {
        let template = match index.first() {
            Some(&i) => &rows[i],
            None => return Err(SaplingError::EmptyResult("schema".to_string())),
        };

        let mut ranges = HashMap::new();
        for feature in template.features().values().filter(|f| f.is_continuous()) {
            let title = feature.title();
            let column = index
                .iter()
                .map(|&i| rows[i].value(title).cloned())
                .collect::<Result<Vec<_>, _>>()?;
            let m = median(column, seed).ok_or_else(|| SaplingError::EmptyResult("median".to_string()))?;
            trace!("Median of {} over {} rows is {}.", title, index.len(), m);
            ranges.insert(title.to_string(), MedianSplit::at(m));
        }

        Ok(Table {
            rows,
            index,
            ranges,
            weighting,
            seed,
        })
    }

    /// The rows of this table.
    pub fn records(&self) -> impl Iterator<Item = &Record<T>> + '_ {
        self.index.iter().map(move |&i| &self.rows[i])
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Always `false`, a table is never empty.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn template(&self) -> &Record<T> {
        &self.rows[self.index[0]]
    }

    /// Feature titles of the rows, sorted.
    pub fn titles(&self) -> Vec<&str> {
        self.template().titles().collect()
    }

    /// Median splits, keyed by continuous feature title.
    pub fn ranges(&self) -> &HashMap<String, MedianSplit<FeatureValue>> {
        &self.ranges
    }

    pub fn median_split(&self, title: &str) -> Option<&MedianSplit<FeatureValue>> {
        self.ranges.get(title)
    }

    pub fn weighting(&self) -> GainWeighting {
        self.weighting
    }

    fn check_title(&self, title: &str) -> Result<(), SaplingError> {
        match self.template().feature(title) {
            Some(_) => Ok(()),
            None => Err(SaplingError::MissingFeature(title.to_string())),
        }
    }

    /// The keys a split on `title` would branch on: the distinct observed
    /// values of a discrete feature, in order, or the two halves of the
    /// median split of a continuous one.
    pub fn feature_values(&self, title: &str) -> Result<Vec<BranchKey>, SaplingError> {
        if let Some(split) = self.ranges.get(title) {
            let mut keys = Vec::with_capacity(MEDIAN_SPLIT_BRANCHES);
            keys.extend(split.ranges().into_iter().cloned().map(BranchKey::Continuous));
            return Ok(keys);
        }
        self.check_title(title)?;
        let values = self
            .records()
            .map(|r| r.value(title).cloned())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(values.into_iter().map(BranchKey::Discrete).collect())
    }

    /// Row indices grouped by branch key. Continuous halves are always both
    /// present, even when one of them is empty.
    fn partition(&self, title: &str) -> Result<Vec<(BranchKey, Vec<usize>)>, SaplingError> {
        if let Some(split) = self.ranges.get(title) {
            let mut low = Vec::new();
            let mut high = Vec::new();
            for &i in &self.index {
                if split.low().contains(self.rows[i].value(title)?) {
                    low.push(i);
                } else {
                    high.push(i);
                }
            }
            return Ok(vec![
                (BranchKey::Continuous(split.low().clone()), low),
                (BranchKey::Continuous(split.high().clone()), high),
            ]);
        }
        self.check_title(title)?;
        let mut groups: BTreeMap<FeatureValue, Vec<usize>> = BTreeMap::new();
        for &i in &self.index {
            groups.entry(self.rows[i].value(title)?.clone()).or_default().push(i);
        }
        Ok(groups.into_iter().map(|(v, idx)| (BranchKey::Discrete(v), idx)).collect())
    }

    /// Partition the table by a feature.
    ///
    /// Partitions with fewer than `min_capacity` rows, and empty ones, are
    /// dropped together with their rows. The survivors come back ordered by
    /// key, each as a table of its own with freshly computed medians.
    ///
    /// * `title` - The feature to split on.
    /// * `min_capacity` - The minimum number of rows a partition must keep.
    pub fn split(&self, title: &str, min_capacity: usize) -> Result<Vec<(BranchKey, Table<T>)>, SaplingError> {
        let mut tables = Vec::new();
        for (key, idx) in self.partition(title)? {
            if idx.is_empty() || idx.len() < min_capacity {
                trace!(
                    "Dropping partition {} of {} with {} rows.",
                    key,
                    title,
                    idx.len()
                );
                continue;
            }
            let table = Table::from_parts(Arc::clone(&self.rows), idx, self.weighting, self.seed)?;
            tables.push((key, table));
        }
        Ok(tables)
    }

    /// Shannon entropy, in bits, of the targets of `records`.
    ///
    /// Every record must have a target.
    pub fn entropy<'a, I>(records: I) -> Result<f64, SaplingError>
    where
        I: IntoIterator<Item = &'a Record<T>>,
        T: 'a,
    {
        let mut counts: HashMap<&T, usize> = HashMap::new();
        let mut total = 0;
        for r in records {
            let target = r.target().ok_or_else(|| {
                SaplingError::InvalidArgument("entropy needs records with a target value".to_string())
            })?;
            *counts.entry(target).or_insert(0) += 1;
            total += 1;
        }
        if total == 0 {
            return Err(SaplingError::EmptyResult("entropy".to_string()));
        }
        Ok(shannon_entropy(counts.into_values(), total))
    }

    fn counts_of(&self, idx: &[usize]) -> HashMap<&T, usize> {
        let mut counts = HashMap::new();
        for target in idx.iter().filter_map(|&i| self.rows[i].target()) {
            *counts.entry(target).or_insert(0) += 1;
        }
        counts
    }

    fn entropy_of(&self, idx: &[usize]) -> f64 {
        shannon_entropy(self.counts_of(idx).into_values(), idx.len())
    }

    /// Share of the rows assigned to one half of a median split, derived from
    /// the median position instead of the observed rows. See
    /// [`GainWeighting::Analytic`].
    fn analytic_share(&self, range: &SemiRange<FeatureValue>) -> f64 {
        let n = self.len();
        let k = (n + 2) / 2;
        if range.is_inclusive() {
            k as f64 / n as f64
        } else {
            (n - k) as f64 / n as f64
        }
    }

    /// Reduction in target entropy achieved by splitting on `title`.
    ///
    /// Discrete partitions are weighted by their share of rows. Continuous
    /// halves are weighted according to the table's [`GainWeighting`]; the
    /// default analytic weights make this an approximation, which can dip
    /// below zero.
    pub fn information_gain(&self, title: &str) -> Result<f64, SaplingError> {
        let n = self.len() as f64;
        let mut gain = self.entropy_of(&self.index);
        for (key, idx) in self.partition(title)? {
            if idx.is_empty() {
                continue;
            }
            let weight = match (&key, self.weighting) {
                (BranchKey::Continuous(range), GainWeighting::Analytic) => self.analytic_share(range),
                _ => idx.len() as f64 / n,
            };
            gain -= weight * self.entropy_of(&idx);
        }
        Ok(gain)
    }

    /// The feature with the highest information gain, and that gain.
    ///
    /// Gains are computed in parallel. Equal gains go to the
    /// lexicographically smallest title.
    pub fn optimal_split(&self) -> Result<(String, f64), SaplingError> {
        let titles = self.titles();
        let gains = titles
            .par_iter()
            .map(|&title| self.information_gain(title).map(|gain| (title, gain)))
            .collect::<Result<Vec<_>, _>>()?;
        gains
            .into_iter()
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(title, gain)| (title.to_string(), gain))
            .ok_or_else(|| SaplingError::EmptyResult("optimal feature".to_string()))
    }

    /// The title of the feature with the highest information gain.
    pub fn optimal_feature(&self) -> Result<String, SaplingError> {
        self.optimal_split().map(|(title, _)| title)
    }

    /// Frequency of each target value.
    pub fn target_counts(&self) -> HashMap<&T, usize> {
        self.counts_of(&self.index)
    }

    /// `true` when all rows share the same target.
    pub fn is_pure(&self) -> bool {
        self.target_counts().len() <= 1
    }

    /// The most frequent target. Equal frequencies go to the smallest target.
    pub fn dominant_target(&self) -> Result<&T, SaplingError> {
        self.target_counts()
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(target, _)| target)
            .ok_or_else(|| SaplingError::EmptyResult("dominant target".to_string()))
    }
}
