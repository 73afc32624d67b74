use crate::models::Property;
use rand::Rng;
use std::collections::BTreeSet;

/// Keep only verified listings, preserving their order.
pub fn filter_verified(properties: &[Property]) -> Vec<Property> {
    properties.iter().filter(|p| p.is_verified).cloned().collect()
}

/// Shuffled copy of `verified` for the explore feed.
///
/// Fisher–Yates: walk i from the end down to 1 and swap with a uniform j in `[0, i]`.
/// The input slice is left untouched.
pub fn derive_explore<R: Rng + ?Sized>(verified: &[Property], rng: &mut R) -> Vec<Property> {
    let mut explore = verified.to_vec();
    for i in (1..explore.len()).rev() {
        let j = rng.gen_range(0..=i);
        explore.swap(i, j);
    }
    explore
}

/// Union of every `type` and `property_type` label, without duplicates.
///
/// Callers must only rely on set semantics; the sorted order is incidental.
pub fn derive_type_tabs(verified: &[Property]) -> Vec<String> {
    verified
        .iter()
        .flat_map(|p| [p.kind.as_deref(), p.property_type.as_deref()])
        .flatten()
        .filter(|label| !label.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
