/// Minimum number of rows a node needs before it is considered for splitting.
pub const DEFAULT_MIN_NODE_CAPACITY: usize = 1;
/// Seed used to shuffle continuous columns before median selection.
pub const DEFAULT_SEED: u64 = 0;
/// Number of branches a median split produces.
pub const MEDIAN_SPLIT_BRANCHES: usize = 2;
/// Indentation used per depth level when rendering a tree.
pub const DISPLAY_INDENT: &str = "      ";
