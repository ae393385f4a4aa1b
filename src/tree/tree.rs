use crate::config::{ImportanceMethod, TreeConfig};
use crate::constants::DISPLAY_INDENT;
use crate::data::TargetData;
use crate::errors::SaplingError;
use crate::node::Node;
use crate::record::Record;
use crate::table::Table;
use log::{info, warn};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::time::Instant;

type ImportanceFn<T> = fn(&Node<T>) -> f64;

/// A trained ID3-style classification tree.
///
/// Training happens entirely inside [`DecisionTree::fit`]; a constructed
/// tree is immutable and can be queried from many threads at once.
#[derive(Clone, Debug)]
pub struct DecisionTree<T> {
    root: Node<T>,
    cfg: TreeConfig,
}

impl<T: TargetData> DecisionTree<T> {
    /// Train a tree with default settings and the given node capacity.
    ///
    /// * `records` - Labeled training rows. Must not be empty.
    /// * `min_node_capacity` - Minimum rows per node. At most `records.len()`.
    pub fn new(records: Vec<Record<T>>, min_node_capacity: usize) -> Result<Self, SaplingError> {
        let cfg = TreeConfig::default().set_min_node_capacity(min_node_capacity);
        DecisionTree::fit(records, &cfg)
    }

    /// Train a tree.
    ///
    /// * `records` - Labeled training rows. Must not be empty.
    /// * `cfg` - Training parameters, see [`TreeConfig`].
    pub fn fit(records: Vec<Record<T>>, cfg: &TreeConfig) -> Result<Self, SaplingError> {
        cfg.validate()?;
        if records.is_empty() {
            return Err(SaplingError::InvalidArgument(
                "a tree must be trained on at least 1 record".to_string(),
            ));
        }
        if records.len() < cfg.min_node_capacity {
            return Err(SaplingError::InvalidArgument(format!(
                "min_node_capacity {} exceeds the number of records {}",
                cfg.min_node_capacity,
                records.len()
            )));
        }

        let start = Instant::now();
        let table = Table::with_options(records, cfg.gain_weighting, cfg.seed)?;
        let is_pure = table.is_pure();
        let mut root = Node::new(table);

        match cfg.num_threads {
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| SaplingError::ThreadPool(e.to_string()))?;
                pool.install(|| root.split(cfg.min_node_capacity))?;
            }
            None => root.split(cfg.min_node_capacity)?,
        }

        if root.is_leaf() && !is_pure {
            warn!(
                "The tree is a single leaf although its {} training records have different targets. Try to decrease min_node_capacity.",
                root.table().len()
            );
        }
        info!(
            "Trained tree on {} records: {} nodes, {} leaves, depth {}, in {:.4} seconds.",
            root.table().len(),
            root.n_nodes(),
            root.n_leaves(),
            root.max_depth(),
            start.elapsed().as_secs_f64()
        );

        Ok(DecisionTree { root, cfg: cfg.clone() })
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub fn config(&self) -> &TreeConfig {
        &self.cfg
    }

    pub fn n_nodes(&self) -> usize {
        self.root.n_nodes()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    /// Depth of the deepest leaf. A single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.root.max_depth()
    }

    fn node_stats(node: &Node<T>, calc_stat: ImportanceFn<T>, stats: &mut HashMap<String, (f64, usize)>) {
        let title = match node.split_feature() {
            Some(title) => title,
            None => return,
        };
        stats
            .entry(title.to_string())
            .and_modify(|(v, c)| {
                *v += calc_stat(node);
                *c += 1;
            })
            .or_insert((calc_stat(node), 1));
        for child in node.children().values() {
            DecisionTree::node_stats(child, calc_stat, stats);
        }
    }

    /// Importance of every feature the tree splits on, keyed by title.
    ///
    /// * `method` - How to score a feature, see [`ImportanceMethod`].
    pub fn feature_importance(&self, method: ImportanceMethod) -> HashMap<String, f64> {
        let (average, calc_stat): (bool, ImportanceFn<T>) = match method {
            ImportanceMethod::Weight => (false, |_| 1.),
            ImportanceMethod::Gain => (true, Node::split_gain),
            ImportanceMethod::TotalGain => (false, Node::split_gain),
        };
        let mut stats = HashMap::new();
        DecisionTree::node_stats(&self.root, calc_stat, &mut stats);
        stats
            .into_iter()
            .map(|(k, (v, c))| if average { (k, v / c as f64) } else { (k, v) })
            .collect()
    }
}

impl<T: TargetData> Display for DecisionTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<(String, &Node<T>)> = vec![(String::new(), &self.root)];
        let mut r = String::new();
        while let Some((branch, node)) = print_buffer.pop() {
            r += format!("{}{}{}\n", DISPLAY_INDENT.repeat(node.depth()), branch, node).as_str();
            if let Some(title) = node.split_feature() {
                for (key, child) in node.children().iter().rev() {
                    print_buffer.push((format!("{} {}: ", title, key), child));
                }
            }
        }
        write!(f, "{}", r)
    }
}
