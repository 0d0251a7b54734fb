//! Answer scoring - merging score deltas into a snapshot.

use super::TraitScores;

/// Returns `current` with every key of `delta` summed in.
///
/// Keys missing from `current` start at zero and are appended in `delta`
/// order. `current` is left untouched so earlier snapshots stay valid.
pub fn apply_delta(current: &TraitScores, delta: &TraitScores) -> TraitScores {
    let mut next = current.clone();
    for (name, amount) in delta.iter() {
        next.add(name, amount);
    }
    next
}
