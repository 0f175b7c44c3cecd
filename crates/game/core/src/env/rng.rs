//! Seeded random stream for deterministic simulation.
//!
//! The stream is a plain value. Every consumer receives the current
//! [`RngState`] and hands back the advanced one, so a replay from the same
//! seed with the same call order reproduces every draw exactly.

/// 32-bit linear congruential generator state.
///
/// `seed` is the generative state. `cursor` counts draws and exists only for
/// diagnostics; it never influences the produced values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    pub seed: u32,
    pub cursor: u64,
}

impl RngState {
    /// LCG multiplier (Numerical Recipes).
    pub const MULTIPLIER: u32 = 1_664_525;

    /// LCG increment (Numerical Recipes).
    pub const INCREMENT: u32 = 1_013_904_223;

    const MODULUS: f64 = 4_294_967_296.0;

    pub const fn new(seed: u32) -> Self {
        Self { seed, cursor: 0 }
    }

    /// Draws the next value in `[0, 1)` and advances `self`.
    ///
    /// Equivalent to `*self = next_random(*self).1`; kept for call sites that
    /// thread a local copy of the stream through several draws.
    #[inline]
    pub fn draw(&mut self) -> f64 {
        let (value, next) = next_random(*self);
        *self = next;
        value
    }

    /// Draws an index in `0..len`. Returns 0 for an empty range.
    #[inline]
    pub fn draw_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = (self.draw() * len as f64) as usize;
        index.min(len - 1)
    }
}

/// Advances the stream by one step and returns the produced value.
///
/// `seed' = (a * seed + c) mod 2^32`, output `seed' / 2^32`.
#[inline]
pub fn next_random(state: RngState) -> (f64, RngState) {
    let seed = state
        .seed
        .wrapping_mul(RngState::MULTIPLIER)
        .wrapping_add(RngState::INCREMENT);
    let value = f64::from(seed) / RngState::MODULUS;
    (
        value,
        RngState {
            seed,
            cursor: state.cursor + 1,
        },
    )
}

/// Seeded Fisher–Yates shuffle, walking from the back of the slice.
pub fn shuffle<T>(items: &mut [T], rng: &mut RngState) {
    for i in (1..items.len()).rev() {
        let j = rng.draw_index(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_draw_matches_lcg_formula() {
        let (value, next) = next_random(RngState::new(0));
        assert_eq!(next.seed, 1_013_904_223);
        assert_eq!(next.cursor, 1);
        assert!((value - 1_013_904_223.0 / 4_294_967_296.0).abs() < 1e-15);
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = RngState::new(12345);
        let mut b = RngState::new(12345);
        for _ in 0..1_000 {
            assert_eq!(a.draw().to_bits(), b.draw().to_bits());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = RngState::new(u32::MAX);
        for _ in 0..10_000 {
            let value = rng.draw();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn cursor_does_not_affect_values() {
        let a = RngState { seed: 42, cursor: 0 };
        let b = RngState { seed: 42, cursor: 9_000 };
        assert_eq!(next_random(a).0.to_bits(), next_random(b).0.to_bits());
    }

    #[test]
    fn shuffle_is_a_permutation_and_deterministic() {
        let mut first: Vec<u32> = (0..20).collect();
        let mut second = first.clone();
        let mut rng_a = RngState::new(7);
        let mut rng_b = RngState::new(7);
        shuffle(&mut first, &mut rng_a);
        shuffle(&mut second, &mut rng_b);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
