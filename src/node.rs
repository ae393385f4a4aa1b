use crate::data::{FeatureValue, TargetData};
use crate::errors::SaplingError;
use crate::range::{Range, SemiRange};
use crate::table::Table;
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// The condition a child of a split node was created for.
///
/// A discrete split has one key per observed value, a continuous split one
/// key per half of the median split.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BranchKey {
    Discrete(FeatureValue),
    Continuous(SemiRange<FeatureValue>),
}

impl BranchKey {
    /// Check whether a raw feature value would be routed to this branch.
    pub fn admits(&self, value: &FeatureValue) -> bool {
        match self {
            BranchKey::Discrete(v) => v == value,
            BranchKey::Continuous(range) => range.contains(value),
        }
    }
}

impl Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BranchKey::Discrete(v) => write!(f, "= {}", v),
            BranchKey::Continuous(range) => write!(f, "{}", range),
        }
    }
}

/// A node of a decision tree. Every node owns the table of the rows that
/// reached it; a split node additionally owns one child per branch key.
#[derive(Clone, Debug)]
pub struct Node<T> {
    table: Table<T>,
    split_feature: Option<String>,
    split_gain: f64,
    children: BTreeMap<BranchKey, Node<T>>,
    depth: usize,
}

impl<T: TargetData> Node<T> {
    /// Create an unsplit root node over `table`.
    pub fn new(table: Table<T>) -> Self {
        Node::at_depth(table, 0)
    }

    fn at_depth(table: Table<T>, depth: usize) -> Self {
        Node {
            table,
            split_feature: None,
            split_gain: 0.0,
            children: BTreeMap::new(),
            depth,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Grow the subtree below this node.
    ///
    /// The node stays a leaf when it is already split, holds fewer than
    /// `min_capacity` rows, is label-pure, or when splitting on its optimal
    /// feature would leave fewer than two partitions. Otherwise one child is
    /// created per surviving partition and the children are split in
    /// parallel.
    ///
    /// * `min_capacity` - Minimum rows to split a node, and to keep a partition.
    pub fn split(&mut self, min_capacity: usize) -> Result<(), SaplingError> {
        if !self.is_leaf() || self.table.len() < min_capacity || self.table.is_pure() {
            return Ok(());
        }

        let (title, gain) = self.table.optimal_split()?;
        let partitions = self.table.split(&title, min_capacity)?;
        if partitions.len() < 2 {
            debug!(
                "Rejected split on {} at depth {}: {} of {} rows left in {} partition(s).",
                title,
                self.depth,
                partitions.iter().map(|(_, t)| t.len()).sum::<usize>(),
                self.table.len(),
                partitions.len()
            );
            return Ok(());
        }

        debug!(
            "Split {} rows on {} at depth {}, gain {}, {} partitions.",
            self.table.len(),
            title,
            self.depth,
            gain,
            partitions.len()
        );
        let depth = self.depth + 1;
        self.children = partitions
            .into_iter()
            .map(|(key, table)| (key, Node::at_depth(table, depth)))
            .collect();
        self.split_feature = Some(title);
        self.split_gain = gain;

        self.children
            .par_iter_mut()
            .try_for_each(|(_, child)| child.split(min_capacity))
    }

    /// The child created for exactly `key`.
    pub fn branch(&self, key: &BranchKey) -> Option<&Node<T>> {
        self.children.get(key)
    }

    /// The child whose branch admits `value`, if any.
    pub fn route(&self, value: &FeatureValue) -> Option<&Node<T>> {
        self.children
            .iter()
            .find(|(key, _)| key.admits(value))
            .map(|(_, child)| child)
    }

    /// Majority target of the rows at this node.
    pub fn dominant_target(&self) -> Result<&T, SaplingError> {
        self.table.dominant_target()
    }

    pub fn table(&self) -> &Table<T> {
        &self.table
    }

    pub fn split_feature(&self) -> Option<&str> {
        self.split_feature.as_deref()
    }

    pub fn split_gain(&self) -> f64 {
        self.split_gain
    }

    pub fn children(&self) -> &BTreeMap<BranchKey, Node<T>> {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes in the subtree rooted here, this one included.
    pub fn n_nodes(&self) -> usize {
        1 + self.children.values().map(Node::n_nodes).sum::<usize>()
    }

    pub fn n_leaves(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.values().map(Node::n_leaves).sum()
        }
    }

    /// Depth of the deepest leaf below this node, counted from the root.
    pub fn max_depth(&self) -> usize {
        self.children
            .values()
            .map(Node::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

impl<T: TargetData> Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.split_feature {
            Some(title) => write!(
                f,
                "{}:[{}] gain={},rows={}",
                self.depth,
                title,
                self.split_gain,
                self.table.len()
            ),
            None => match self.table.dominant_target() {
                Ok(target) => write!(f, "{}:leaf={:?},rows={}", self.depth, target, self.table.len()),
                Err(_) => write!(f, "{}:leaf,rows={}", self.depth, self.table.len()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{applicants, column, SALARY};

    fn grown(min_capacity: usize) -> Node<&'static str> {
        let mut root = Node::new(Table::new(applicants()).unwrap());
        root.split(min_capacity).unwrap();
        root
    }

    fn assert_no_single_child(node: &Node<&str>) {
        assert_ne!(node.children().len(), 1);
        for child in node.children().values() {
            assert_eq!(child.depth(), node.depth() + 1);
            assert_no_single_child(child);
        }
    }

    #[test]
    fn test_branch_key() {
        let key = BranchKey::Discrete(FeatureValue::from("male"));
        assert!(key.admits(&FeatureValue::from("male")));
        assert!(!key.admits(&FeatureValue::from("female")));
        assert_eq!(key.to_string(), "= male");

        let key = BranchKey::Continuous(SemiRange::greater_than(FeatureValue::from(10)));
        assert!(key.admits(&FeatureValue::from(11)));
        assert!(!key.admits(&FeatureValue::from(10)));
        assert_eq!(key.to_string(), "> 10");
    }

    #[test]
    fn test_split_root_on_best_feature() {
        let root = grown(1);
        assert!(!root.is_leaf());
        assert_eq!(root.split_feature(), Some(SALARY));
        assert!(root.split_gain() > 0.0);
        assert_eq!(root.children().len(), 2);
        assert_no_single_child(&root);
        assert_eq!(root.n_nodes(), 1 + root.children().values().map(Node::n_nodes).sum::<usize>());
        assert!(root.n_leaves() >= 2);
        assert!(root.max_depth() >= 1);
    }

    #[test]
    fn test_split_is_idempotent() {
        let mut root = grown(1);
        let nodes = root.n_nodes();
        let feature = root.split_feature().map(String::from);
        root.split(1).unwrap();
        assert_eq!(root.n_nodes(), nodes);
        assert_eq!(root.split_feature().map(String::from), feature);
    }

    #[test]
    fn test_leaves_respect_capacity() {
        let root = grown(3);
        fn walk(node: &Node<&str>) {
            assert!(node.table().len() >= 3);
            node.children().values().for_each(walk);
        }
        walk(&root);
        assert_no_single_child(&root);
    }

    #[test]
    fn test_no_split_when_pure_or_small() {
        let mut pure = Node::new(Table::new(column(&[1, 2, 3], &["a"; 3])).unwrap());
        pure.split(0).unwrap();
        assert!(pure.is_leaf());
        assert_eq!(pure.dominant_target().unwrap(), &"a");

        let mut small = Node::new(Table::new(applicants()).unwrap());
        small.split(11).unwrap();
        assert!(small.is_leaf());
        assert_eq!(small.n_nodes(), 1);
        assert_eq!(small.max_depth(), 0);
    }

    #[test]
    fn test_single_partition_stays_leaf() {
        // Constant column: the high half is empty, so no split is made.
        let mut node = Node::new(Table::new(column(&[5, 5, 5, 5], &["a", "b", "a", "b"])).unwrap());
        node.split(0).unwrap();
        assert!(node.is_leaf());
        assert!(node.split_feature().is_none());
    }

    #[test]
    fn test_route_and_branch() {
        let root = grown(1);
        let low = root.route(&FeatureValue::from(40_816)).unwrap();
        let key = BranchKey::Continuous(SemiRange::at_most(FeatureValue::from(50_000)));
        assert!(std::ptr::eq(low, root.branch(&key).unwrap()));
        assert_eq!(low.table().len(), 5);

        let high = root.route(&FeatureValue::from(50_001)).unwrap();
        assert!(!std::ptr::eq(low, high));
        assert!(root.branch(&BranchKey::Discrete(FeatureValue::from("x"))).is_none());
    }

    #[test]
    fn test_route_without_match() {
        use crate::feature::Feature;
        use crate::record::Record;
        let records = [("red", "a"), ("red", "a"), ("blue", "b"), ("blue", "b"), ("green", "a")]
            .into_iter()
            .map(|(c, t)| Record::labeled(vec![Feature::discrete("color", c)], t).unwrap())
            .collect();
        let mut node = Node::new(Table::new(records).unwrap());
        // The single green row is dropped with a capacity of 2.
        node.split(2).unwrap();
        assert_eq!(node.children().len(), 2);
        assert!(node.route(&FeatureValue::from("green")).is_none());
        assert!(node.route(&FeatureValue::from("purple")).is_none());
        assert_eq!(node.route(&FeatureValue::from("red")).unwrap().table().len(), 2);
    }

    #[test]
    fn test_display() {
        let leaf = Node::new(Table::new(column(&[1], &["a"])).unwrap());
        assert_eq!(leaf.to_string(), "0:leaf=\"a\",rows=1");
        let root = grown(1);
        assert!(root.to_string().starts_with("0:[salary] gain="));
    }
}
