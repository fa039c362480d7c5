//! Helpers for keyed collections.
//!
//! Small utilities used alongside decoded mappings: selecting keys by value
//! and combining two maps that share a key set.
//!
//! ## Examples
//!
//! ```rust
//! use container_codec::{from_str, map};
//! use std::collections::HashMap;
//!
//! let stock: HashMap<String, u32> = from_str("{(apple,3),(pear,0),(plum,7)}").unwrap();
//! let price: HashMap<String, u32> = from_str("{(apple,2),(pear,5),(plum,1),(fig,9)}").unwrap();
//!
//! let empty = map::keys_where(&stock, |&n| n == 0);
//! assert_eq!(empty.into_iter().collect::<Vec<_>>(), vec!["pear".to_string()]);
//!
//! let value = map::zip_values(&stock, &price, |n, p| n * p).unwrap();
//! assert_eq!(value["plum"], 7);
//! ```

use crate::{Error, Result};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Returns the keys of `map` whose value satisfies `pred`, in sorted order.
pub fn keys_where<K, V, S, P>(map: &HashMap<K, V, S>, mut pred: P) -> BTreeSet<K>
where
    K: Ord + Clone,
    P: FnMut(&V) -> bool,
{
    map.iter()
        .filter(|(_, value)| pred(value))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Applies `zip` to the two values stored under each key of `first`.
///
/// The result has exactly the keys of `first`. Keys only present in
/// `second` are ignored.
///
/// # Errors
///
/// Returns [`Error::KeyMismatch`] if a key of `first` is missing from `second`.
pub fn zip_values<K, V1, V2, Z, S1, S2, F>(
    first: &HashMap<K, V1, S1>,
    second: &HashMap<K, V2, S2>,
    mut zip: F,
) -> Result<HashMap<K, Z>>
where
    K: Eq + Hash + Clone + Debug,
    S2: BuildHasher,
    F: FnMut(&V1, &V2) -> Z,
{
    let mut zipped = HashMap::with_capacity(first.len());
    for (key, value) in first {
        let other = second.get(key).ok_or_else(|| {
            Error::key_mismatch(format!(
                "key {:?} of the first map is missing from the second",
                key
            ))
        })?;
        zipped.insert(key.clone(), zip(value, other));
    }
    Ok(zipped)
}
