use crate::errors::SaplingError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_positive_parameter(value: usize, parameter: &str) -> Result<(), SaplingError> {
    if value == 0 {
        Err(SaplingError::InvalidParameter(
            parameter.to_string(),
            "a positive integer".to_string(),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Select the median of a column.
///
/// The column is shuffled, then a min-heap keeps the `(n + 2) / 2`
/// largest values seen so far; its minimum at the end is the median,
/// i.e. the value at ascending position `n - (n + 2) / 2`. Shuffling
/// guards the heap against sorted input. Returns `None` for an empty column.
///
/// * `values` - The column values, consumed.
/// * `seed` - Seed for the shuffle. The result does not depend on it.
pub fn median<V: Ord>(mut values: Vec<V>, seed: u64) -> Option<V> {
    if values.is_empty() {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    values.shuffle(&mut rng);

    let keep = (values.len() + 2) / 2;
    let rest = values.split_off(keep);
    let mut heap: BinaryHeap<Reverse<V>> = values.into_iter().map(Reverse).collect();
    for v in rest {
        let larger = heap.peek().is_some_and(|Reverse(smallest)| *smallest < v);
        if larger {
            heap.pop();
            heap.push(Reverse(v));
        }
    }
    heap.pop().map(|Reverse(v)| v)
}

/// Shannon entropy, in bits, of a distribution given as counts.
///
/// Each count is divided by `total` (the number of rows), not by the
/// number of distinct values.
///
/// * `counts` - Occurrences of each distinct value.
/// * `total` - Sum of `counts`.
pub fn shannon_entropy<I>(counts: I, total: usize) -> f64
where
    I: IntoIterator<Item = usize>,
{
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|&c| c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}
