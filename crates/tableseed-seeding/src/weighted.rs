//! Weighted random selection.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tableseed_seeding::WeightedChoice;
//!
//! let status = WeightedChoice::new(vec![("active", 80), ("banned", 20)]).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let picked = status.pick(&mut rng);
//! assert!(["active", "banned"].contains(picked));
//! ```

use rand::Rng;

use crate::error::{SeedingError, SeedingResult};

/// Keys with positive integer weights, validated once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedChoice<K> {
	entries: Vec<(K, u64)>,
	total: u64,
}

impl<K> WeightedChoice<K> {
	/// Validates `entries`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::WeightedSample`] if `entries` is empty, if a
	/// weight is zero, or if the weights overflow `u64`.
	pub fn new(entries: impl IntoIterator<Item = (K, u64)>) -> SeedingResult<Self> {
		let entries: Vec<(K, u64)> = entries.into_iter().collect();
		if entries.is_empty() {
			return Err(SeedingError::WeightedSample(
				"no candidates to choose from".to_string(),
			));
		}

		let mut total: u64 = 0;
		for (index, (_, weight)) in entries.iter().enumerate() {
			if *weight == 0 {
				return Err(SeedingError::WeightedSample(format!(
					"weight of candidate #{} must be positive",
					index
				)));
			}
			total = total.checked_add(*weight).ok_or_else(|| {
				SeedingError::WeightedSample("sum of weights overflows".to_string())
			})?;
		}

		Ok(Self { entries, total })
	}

	/// Sum of all weights.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Draws one key with probability proportional to its weight.
	///
	/// A uniform integer in `1..=total` is walked down the entries in order;
	/// the entry that brings it to zero or below wins.
	pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &K {
		let mut remaining = rng.gen_range(1..=self.total);
		for (key, weight) in &self.entries {
			if remaining <= *weight {
				return key;
			}
			remaining -= weight;
		}
		unreachable!("draw is bounded by the validated total")
	}
}

/// One-shot form of [`WeightedChoice::pick`].
///
/// # Errors
///
/// Same as [`WeightedChoice::new`].
pub fn pick_weighted<K: Clone, R: Rng + ?Sized>(
	entries: &[(K, u64)],
	rng: &mut R,
) -> SeedingResult<K> {
	let choice = WeightedChoice::new(entries.iter().cloned())?;
	Ok(choice.pick(rng).clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rstest::rstest;

	#[rstest]
	fn test_empty_input_is_rejected() {
		let result = WeightedChoice::<&str>::new(Vec::new());
		assert!(matches!(result, Err(SeedingError::WeightedSample(_))));
	}

	#[rstest]
	#[case(vec![("a", 0)])]
	#[case(vec![("a", 5), ("b", 0)])]
	fn test_zero_weight_is_rejected(#[case] entries: Vec<(&'static str, u64)>) {
		let result = WeightedChoice::new(entries);
		assert!(matches!(result, Err(SeedingError::WeightedSample(_))));
	}

	#[rstest]
	fn test_overflowing_total_is_rejected() {
		let result = WeightedChoice::new(vec![("a", u64::MAX), ("b", 1)]);
		assert!(matches!(result, Err(SeedingError::WeightedSample(_))));
	}

	#[rstest]
	fn test_single_candidate_always_wins() {
		let choice = WeightedChoice::new(vec![("only", 3)]).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..100 {
			assert_eq!(*choice.pick(&mut rng), "only");
		}
	}

	#[rstest]
	fn test_frequencies_follow_weights() {
		let choice = WeightedChoice::new(vec![("a", 20), ("b", 80)]).unwrap();
		let mut rng = StdRng::seed_from_u64(20_80);
		let draws = 100_000;

		let hits = (0..draws)
			.filter(|_| *choice.pick(&mut rng) == "a")
			.count();

		let frequency = hits as f64 / draws as f64;
		assert!(
			(0.19..=0.21).contains(&frequency),
			"frequency of a was {}",
			frequency
		);
	}

	#[rstest]
	fn test_pick_weighted_one_shot() {
		let mut rng = StdRng::seed_from_u64(9);
		let picked = pick_weighted(&[("x", 4)], &mut rng).unwrap();
		assert_eq!(picked, "x");

		let result = pick_weighted::<bool, _>(&[], &mut rng);
		assert!(matches!(result, Err(SeedingError::WeightedSample(_))));
	}
}
