//! Probability tables and the modifier-and-renormalize pipeline.
//!
//! A [`ProbTable`] is an ordered outcome → probability mapping. Order matters:
//! [`weighted_roll`] walks the cumulative sum in declaration order, so two
//! tables with the same numbers in a different order sample differently.
//!
//! Modifier stages never mutate their input. Each stage copies the table,
//! adds its deltas, floors negative mass at zero and renormalizes, so every
//! intermediate table sums to one.

use arrayvec::ArrayVec;

/// Upper bound on outcomes in a single table (one slot per pitch type).
pub const MAX_OUTCOMES: usize = 9;

/// Tolerance used when checking that a table is closed (sums to one).
pub const CLOSURE_EPSILON: f64 = 1e-9;

/// Ordered outcome → probability mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbTable<K> {
    entries: ArrayVec<(K, f64), MAX_OUTCOMES>,
}

impl<K: Copy + PartialEq> ProbTable<K> {
    /// Builds a table from raw weights and normalizes it.
    ///
    /// Entries beyond [`MAX_OUTCOMES`] are ignored. When every weight is zero
    /// (or negative) the result is uniform over the given keys.
    pub fn from_weights(weights: &[(K, f64)]) -> Self {
        let entries = weights
            .iter()
            .take(MAX_OUTCOMES)
            .map(|&(key, weight)| (key, sanitize(weight)))
            .collect();
        let raw = Self { entries };
        raw.normalized().unwrap_or_else(|| raw.uniform())
    }

    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|&(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Probability assigned to `key`, or 0 when the key is absent.
    pub fn get(&self, key: K) -> f64 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, p)| p)
            .unwrap_or(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|&(_, p)| p).sum()
    }

    /// Returns true when the table sums to one within [`CLOSURE_EPSILON`].
    pub fn is_closed(&self) -> bool {
        (self.sum() - 1.0).abs() <= CLOSURE_EPSILON
    }

    /// One modifier stage: copy, add deltas, floor at zero, renormalize.
    ///
    /// Deltas naming keys that are not in the table are ignored. If the
    /// deltas would remove all mass the stage is skipped and an unchanged copy
    /// is returned.
    #[must_use]
    pub fn apply(&self, deltas: &[(K, f64)]) -> Self {
        let mut next = self.clone();
        for &(key, delta) in deltas {
            if let Some(entry) = next.entries.iter_mut().find(|(k, _)| *k == key) {
                entry.1 = sanitize(entry.1 + delta);
            }
        }
        next.normalized().unwrap_or_else(|| self.clone())
    }

    /// Zeroes the mass of `keys` and renormalizes over what remains.
    ///
    /// Used for the batter "take": foul and in-play mass collapse into the
    /// remaining outcomes in proportion to their current weight.
    #[must_use]
    pub fn collapse(&self, keys: &[K]) -> Self {
        let mut next = self.clone();
        for entry in next.entries.iter_mut() {
            if keys.contains(&entry.0) {
                entry.1 = 0.0;
            }
        }
        next.normalized().unwrap_or_else(|| self.clone())
    }

    /// Divides every entry by the table sum. `None` if the sum is not positive.
    fn normalized(&self) -> Option<Self> {
        let sum = self.sum();
        if !(sum.is_finite() && sum > 0.0) {
            return None;
        }
        let entries = self.entries.iter().map(|&(k, p)| (k, p / sum)).collect();
        Some(Self { entries })
    }

    fn uniform(&self) -> Self {
        let share = if self.entries.is_empty() {
            0.0
        } else {
            1.0 / self.entries.len() as f64
        };
        let entries = self.entries.iter().map(|&(k, _)| (k, share)).collect();
        Self { entries }
    }
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Samples an outcome with a single uniform draw.
///
/// Returns the first outcome whose cumulative probability is at least `draw`.
/// When floating-point error leaves no match the first key is returned.
///
/// # Panics
///
/// Panics if the table is empty. Every table in the engine is built from a
/// non-empty constant list.
pub fn weighted_roll<K: Copy + PartialEq>(table: &ProbTable<K>, draw: f64) -> K {
    let mut cumulative = 0.0;
    for &(key, probability) in table.entries() {
        cumulative += probability;
        if cumulative >= draw {
            return key;
        }
    }
    table.entries()[0].0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Coin {
        Heads,
        Tails,
        Edge,
    }

    fn coin() -> ProbTable<Coin> {
        ProbTable::from_weights(&[(Coin::Heads, 0.5), (Coin::Tails, 0.45), (Coin::Edge, 0.05)])
    }

    #[test]
    fn roll_walks_cumulative_sum_in_order() {
        let table = coin();
        assert_eq!(weighted_roll(&table, 0.0), Coin::Heads);
        assert_eq!(weighted_roll(&table, 0.5), Coin::Heads);
        assert_eq!(weighted_roll(&table, 0.51), Coin::Tails);
        assert_eq!(weighted_roll(&table, 0.96), Coin::Edge);
    }

    #[test]
    fn roll_falls_back_to_first_key() {
        let table = coin();
        assert_eq!(weighted_roll(&table, 1.5), Coin::Heads);
    }

    #[test]
    fn from_weights_normalizes() {
        let table = ProbTable::from_weights(&[(Coin::Heads, 2.0), (Coin::Tails, 6.0)]);
        assert!(table.is_closed());
        assert!((table.get(Coin::Heads) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_become_uniform() {
        let table = ProbTable::from_weights(&[(Coin::Heads, 0.0), (Coin::Tails, -1.0)]);
        assert!((table.get(Coin::Heads) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn apply_floors_negative_mass_and_stays_closed() {
        let next = coin().apply(&[(Coin::Edge, -0.5), (Coin::Heads, 0.1)]);
        assert_eq!(next.get(Coin::Edge), 0.0);
        assert!(next.is_closed());
    }

    #[test]
    fn apply_that_removes_everything_is_skipped() {
        let table = coin();
        let next = table.apply(&[(Coin::Heads, -1.0), (Coin::Tails, -1.0), (Coin::Edge, -1.0)]);
        assert_eq!(next, table);
    }

    #[test]
    fn collapse_redistributes_proportionally() {
        let next = coin().collapse(&[Coin::Edge]);
        assert_eq!(next.get(Coin::Edge), 0.0);
        assert!((next.get(Coin::Heads) - 0.5 / 0.95).abs() < 1e-12);
        assert!(next.is_closed());
    }

    #[test]
    fn apply_does_not_touch_input() {
        let table = coin();
        let _ = table.apply(&[(Coin::Heads, 0.3)]);
        assert!((table.get(Coin::Heads) - 0.5).abs() < 1e-12);
    }
}
