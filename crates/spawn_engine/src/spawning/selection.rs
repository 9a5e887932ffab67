//! Template selection
//!
//! Uniform selection picks any candidate with equal probability. Weighted
//! ("rarity") selection treats each candidate's weight as the length of an
//! interval on `[0, total)` and returns the candidate whose interval contains
//! a uniform draw. Zero-weight candidates own an empty interval and are never
//! chosen while any weight is positive.

use crate::foundation::random::RandomSource;
use crate::pool::WeightedTemplate;
use serde::{Deserialize, Serialize};

/// Errors raised while choosing a template
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Nothing to choose from
    #[error("cannot select from an empty candidate set")]
    EmptyInput,

    /// Every weight is zero and the policy forbids falling back
    #[error("all {candidates} candidate weights are zero")]
    DegenerateDistribution {
        /// Number of candidates
        candidates: usize,
    },

    /// A weight is negative or not finite
    #[error("weight of '{name}' must be finite and non-negative, got {weight}")]
    InvalidWeight {
        /// Label of the offending entry
        name: String,
        /// The rejected weight
        weight: f32,
    },

    /// Every weight is valid but their sum is not finite
    #[error("total weight of {candidates} candidates overflows")]
    WeightOverflow {
        /// Number of candidates
        candidates: usize,
    },
}

/// Behaviour of weighted selection when every weight is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroWeightPolicy {
    /// Fail with [`SelectionError::DegenerateDistribution`]
    #[default]
    Reject,
    /// Choose uniformly among all candidates
    Uniform,
}

/// Pick one candidate with equal probability
pub fn select_uniform<'a, T, R>(candidates: &'a [T], rng: &mut R) -> Result<&'a T, SelectionError>
where
    R: RandomSource + ?Sized,
{
    if candidates.is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let index = rng.uniform_int(0, candidates.len());
    Ok(&candidates[index])
}

/// Validate weights and return their sum
pub fn total_weight(candidates: &[WeightedTemplate]) -> Result<f32, SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::EmptyInput);
    }

    let mut total = 0.0_f32;
    for candidate in candidates {
        if !candidate.weight.is_finite() || candidate.weight < 0.0 {
            return Err(SelectionError::InvalidWeight {
                name: candidate.name.clone(),
                weight: candidate.weight,
            });
        }
        total += candidate.weight;
    }

    if !total.is_finite() {
        return Err(SelectionError::WeightOverflow {
            candidates: candidates.len(),
        });
    }
    Ok(total)
}

/// Pick one candidate with probability proportional to its weight
pub fn select_weighted<'a, R>(
    candidates: &'a [WeightedTemplate],
    policy: ZeroWeightPolicy,
    rng: &mut R,
) -> Result<&'a WeightedTemplate, SelectionError>
where
    R: RandomSource + ?Sized,
{
    let total = total_weight(candidates)?;

    if total <= 0.0 {
        return match policy {
            ZeroWeightPolicy::Reject => Err(SelectionError::DegenerateDistribution {
                candidates: candidates.len(),
            }),
            ZeroWeightPolicy::Uniform => select_uniform(candidates, rng),
        };
    }

    let mut remaining = rng.uniform_float(0.0, total);
    let mut last_positive = None;
    for candidate in candidates.iter().filter(|c| c.weight > 0.0) {
        if remaining < candidate.weight {
            return Ok(candidate);
        }
        remaining -= candidate.weight;
        last_positive = Some(candidate);
    }

    // Rounding can leave the draw just past the final interval
    last_positive.ok_or(SelectionError::DegenerateDistribution {
        candidates: candidates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::random::seeded_rng;
    use crate::pool::TemplateRegistry;

    fn weighted(entries: &[(&str, f32)]) -> Vec<WeightedTemplate> {
        let mut registry = TemplateRegistry::new();
        entries
            .iter()
            .map(|(name, weight)| WeightedTemplate::new(registry.register(*name).unwrap(), *weight))
            .collect()
    }

    struct FixedDraw(f32);

    impl RandomSource for FixedDraw {
        fn uniform_float(&mut self, _lo: f32, _hi: f32) -> f32 {
            self.0
        }

        fn uniform_int(&mut self, lo: usize, _hi_exclusive: usize) -> usize {
            lo
        }
    }

    #[test]
    fn test_uniform_empty_input() {
        let empty: [u8; 0] = [];
        let mut rng = seeded_rng(1);
        assert_eq!(select_uniform(&empty, &mut rng), Err(SelectionError::EmptyInput));
    }

    #[test]
    fn test_uniform_covers_all_candidates() {
        let items = ["a", "b", "c", "d"];
        let mut rng = seeded_rng(2);
        let mut seen = [0usize; 4];

        for _ in 0..4000 {
            let picked = select_uniform(&items, &mut rng).unwrap();
            let index = items.iter().position(|i| i == picked).unwrap();
            seen[index] += 1;
        }

        for count in seen {
            assert!((800..1200).contains(&count), "count {count} outside tolerance");
        }
    }

    #[test]
    fn test_weighted_empty_input() {
        let mut rng = seeded_rng(1);
        let result = select_weighted(&[], ZeroWeightPolicy::Uniform, &mut rng);
        assert_eq!(result, Err(SelectionError::EmptyInput));
    }

    #[test]
    fn test_weighted_interval_boundaries() {
        let candidates = weighted(&[("a", 1.0), ("b", 3.0)]);

        let pick = |draw| select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut FixedDraw(draw)).unwrap().name.clone();

        assert_eq!(pick(0.0), "a");
        assert_eq!(pick(0.999), "a");
        assert_eq!(pick(1.0), "b");
        assert_eq!(pick(3.999), "b");
        // Past the end falls back to the final positive entry
        assert_eq!(pick(4.0), "b");
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let candidates = weighted(&[("never", 0.0), ("always", 2.0), ("also_never", 0.0)]);
        let mut rng = seeded_rng(9);

        for _ in 0..1000 {
            let picked = select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut rng).unwrap();
            assert_eq!(picked.name, "always");
        }
        // A draw of exactly zero must not land on the leading zero-weight entry
        let picked = select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut FixedDraw(0.0)).unwrap();
        assert_eq!(picked.name, "always");
    }

    #[test]
    fn test_all_zero_weights() {
        let candidates = weighted(&[("a", 0.0), ("b", 0.0)]);
        let mut rng = seeded_rng(4);

        assert_eq!(
            select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut rng),
            Err(SelectionError::DegenerateDistribution { candidates: 2 })
        );
        assert!(select_weighted(&candidates, ZeroWeightPolicy::Uniform, &mut rng).is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        for bad in [-1.0, f32::NAN, f32::INFINITY] {
            let candidates = weighted(&[("ok", 1.0), ("bad", bad)]);
            let result = total_weight(&candidates);
            assert!(matches!(result, Err(SelectionError::InvalidWeight { ref name, .. }) if name == "bad"));
        }
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let candidates = weighted(&[("huge", f32::MAX), ("also huge", f32::MAX)]);

        assert_eq!(
            total_weight(&candidates),
            Err(SelectionError::WeightOverflow { candidates: 2 })
        );
        let mut rng = seeded_rng(9);
        assert!(select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut rng).is_err());
    }

    #[test]
    fn test_weighted_convergence_one_to_three() {
        let candidates = weighted(&[("light", 1.0), ("heavy", 3.0)]);
        let mut rng = seeded_rng(2024);
        let draws = 10_000;

        let heavy = (0..draws)
            .filter(|_| select_weighted(&candidates, ZeroWeightPolicy::Reject, &mut rng).unwrap().name == "heavy")
            .count();

        let frequency = heavy as f64 / f64::from(draws);
        approx::assert_abs_diff_eq!(frequency, 0.75, epsilon = 0.02);
    }
}
