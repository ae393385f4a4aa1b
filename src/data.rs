use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

/// Data trait used throughout the package
/// to bound the type of the target (class) variable.
///
/// `Ord` gives every tie-break a deterministic answer, and
/// `Send + Sync` lets subtrees be trained on separate threads.
pub trait TargetData: Clone + Debug + Eq + Hash + Ord + std::marker::Send + std::marker::Sync {}

impl<T> TargetData for T where T: Clone + Debug + Eq + Hash + Ord + std::marker::Send + std::marker::Sync {}

/// A single scalar stored in a feature column.
///
/// Values of the same variant are ordered naturally, floats with
/// [`f64::total_cmp`]. `Int` and `Float` are ordered by numeric value, with
/// an `Int` placed just before a `Float` of the same value. Values of
/// different variants never compare equal; booleans sort before all
/// numbers and text after them.
#[derive(Clone, Debug)]
pub enum FeatureValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Free text or category label.
    Text(String),
}

impl FeatureValue {
    fn rank(&self) -> u8 {
        match self {
            FeatureValue::Bool(_) => 0,
            FeatureValue::Int(_) => 1,
            FeatureValue::Float(_) => 2,
            FeatureValue::Text(_) => 3,
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl Ord for FeatureValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FeatureValue::Bool(a), FeatureValue::Bool(b)) => a.cmp(b),
            (FeatureValue::Int(a), FeatureValue::Int(b)) => a.cmp(b),
            (FeatureValue::Float(a), FeatureValue::Float(b)) => a.total_cmp(b),
            (FeatureValue::Text(a), FeatureValue::Text(b)) => a.cmp(b),
            (FeatureValue::Int(a), FeatureValue::Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (FeatureValue::Float(a), FeatureValue::Int(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for FeatureValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FeatureValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FeatureValue {}

impl Hash for FeatureValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            FeatureValue::Bool(v) => v.hash(state),
            FeatureValue::Int(v) => v.hash(state),
            // Bit patterns agree with `total_cmp` equality.
            FeatureValue::Float(v) => v.to_bits().hash(state),
            FeatureValue::Text(v) => v.hash(state),
        }
    }
}

impl Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureValue::Bool(v) => write!(f, "{}", v),
            FeatureValue::Int(v) => write!(f, "{}", v),
            FeatureValue::Float(v) => write!(f, "{}", v),
            FeatureValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(v: bool) -> Self {
        FeatureValue::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FeatureValue {
                fn from(v: $t) -> Self {
                    FeatureValue::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FeatureValue {
    fn from(v: f32) -> Self {
        FeatureValue::Float(f64::from(v))
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_variant_ordering() {
        assert!(FeatureValue::from(3) < FeatureValue::from(10));
        assert!(FeatureValue::from(-0.5) < FeatureValue::from(0.25));
        assert!(FeatureValue::from("female") < FeatureValue::from("male"));
        assert!(FeatureValue::from(false) < FeatureValue::from(true));
    }

    #[test]
    fn test_cross_variant_never_equal() {
        assert_ne!(FeatureValue::from(1), FeatureValue::from(1.0));
        assert!(FeatureValue::from(true) < FeatureValue::from(0));
        assert!(FeatureValue::from(true) < FeatureValue::from(-1.0));
        assert!(FeatureValue::from(f64::MAX) < FeatureValue::from(""));
        assert!(FeatureValue::from(i64::MAX) < FeatureValue::from(""));
    }

    #[test]
    fn test_mixed_numeric_ordering() {
        assert!(FeatureValue::from(-1.0) < FeatureValue::from(100));
        assert!(FeatureValue::from(250) > FeatureValue::from(3.0));
        assert!(FeatureValue::from(2) < FeatureValue::from(2.5));
        assert!(FeatureValue::from(2.5) < FeatureValue::from(3));
        // Same number, different variant: ordered, never equal.
        assert!(FeatureValue::from(1) < FeatureValue::from(1.0));
        assert!(FeatureValue::from(1.0) < FeatureValue::from(2));

        let mut values = vec![
            FeatureValue::from(3.5),
            FeatureValue::from(1),
            FeatureValue::from(2.0),
            FeatureValue::from(-7),
            FeatureValue::from(2),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                FeatureValue::from(-7),
                FeatureValue::from(1),
                FeatureValue::from(2),
                FeatureValue::from(2.0),
                FeatureValue::from(3.5),
            ]
        );
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let values: HashSet<FeatureValue> = [
            FeatureValue::from(2.5),
            FeatureValue::from(2.5),
            FeatureValue::from(2),
            FeatureValue::from("2"),
            FeatureValue::from(f64::NAN),
            FeatureValue::from(f64::NAN),
        ]
        .into_iter()
        .collect();
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_views() {
        assert_eq!(FeatureValue::from(7_u8).as_f64(), Some(7.0));
        assert_eq!(FeatureValue::from("iris").as_str(), Some("iris"));
        assert_eq!(FeatureValue::from(true).as_f64(), None);
        assert_eq!(FeatureValue::from(1.5_f32).to_string(), "1.5");
    }
}
