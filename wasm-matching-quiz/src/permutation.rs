//! Presentation order utilities
//!
//! Prompts and answers are shuffled independently, so every correctness check
//! goes through original-index space: display -> original on the prompt side,
//! original -> display on the answer side.

use rand::Rng;
use serde::Serialize;

/// Fisher-Yates shuffle of `0..n`
///
/// **Learning Point**: walks from the back, swapping each slot with a uniformly
/// chosen slot at or before it, so every permutation is equally likely.
pub fn shuffled_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }
    indices
}

/// Position holding `value` in `permutation` (linear scan, O(N))
pub fn inverse_lookup(permutation: &[usize], value: usize) -> Option<usize> {
    permutation.iter().position(|&v| v == value)
}

/// True when `values` contains each of `0..values.len()` exactly once
pub fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    values.iter().all(|&v| v < seen.len() && !std::mem::replace(&mut seen[v], true))
}

/// Display order of both columns: each vector maps display position -> original index
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationOrder {
    shuffled_prompts: Vec<usize>,
    shuffled_answers: Vec<usize>,
}

impl PresentationOrder {
    /// Fresh independent shuffles of both columns
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        PresentationOrder {
            shuffled_prompts: shuffled_indices(n, rng),
            shuffled_answers: shuffled_indices(n, rng),
        }
    }

    /// Identity order (display position == original index)
    pub fn identity(n: usize) -> Self {
        PresentationOrder {
            shuffled_prompts: (0..n).collect(),
            shuffled_answers: (0..n).collect(),
        }
    }

    /// Build from explicit permutations; `None` if either is not a permutation
    /// or the columns differ in length.
    pub fn from_parts(shuffled_prompts: Vec<usize>, shuffled_answers: Vec<usize>) -> Option<Self> {
        if shuffled_prompts.len() != shuffled_answers.len()
            || !is_permutation(&shuffled_prompts)
            || !is_permutation(&shuffled_answers)
        {
            return None;
        }
        Some(PresentationOrder {
            shuffled_prompts,
            shuffled_answers,
        })
    }

    pub fn len(&self) -> usize {
        self.shuffled_prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shuffled_prompts.is_empty()
    }

    pub fn prompts(&self) -> &[usize] {
        &self.shuffled_prompts
    }

    pub fn answers(&self) -> &[usize] {
        &self.shuffled_answers
    }

    /// Original prompt index shown at a display position
    pub fn original_prompt(&self, display: usize) -> Option<usize> {
        self.shuffled_prompts.get(display).copied()
    }

    /// Original answer index shown at a display position
    pub fn original_answer(&self, display: usize) -> Option<usize> {
        self.shuffled_answers.get(display).copied()
    }

    /// Display position currently holding an original answer index
    pub fn answer_display(&self, original: usize) -> Option<usize> {
        inverse_lookup(&self.shuffled_answers, original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shuffle_of_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(shuffled_indices(0, &mut rng).is_empty());
        assert_eq!(shuffled_indices(1, &mut rng), vec![0]);
    }

    #[test]
    fn same_seed_same_order() {
        let a = PresentationOrder::random(6, &mut StdRng::seed_from_u64(42));
        let b = PresentationOrder::random(6, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn from_parts_validates() {
        assert!(PresentationOrder::from_parts(vec![1, 0], vec![0, 1]).is_some());
        assert!(PresentationOrder::from_parts(vec![1, 1], vec![0, 1]).is_none());
        assert!(PresentationOrder::from_parts(vec![0, 2], vec![0, 1]).is_none());
        assert!(PresentationOrder::from_parts(vec![0, 1], vec![0]).is_none());
    }

    #[test]
    fn answer_display_inverts_original_answer() {
        let order = PresentationOrder::from_parts(vec![1, 0, 2], vec![2, 0, 1]).unwrap();
        assert_eq!(order.answer_display(2), Some(0));
        assert_eq!(order.answer_display(0), Some(1));
        assert_eq!(order.answer_display(1), Some(2));
        assert_eq!(order.answer_display(3), None);
        assert_eq!(order.original_prompt(0), Some(1));
        assert_eq!(order.original_prompt(3), None);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(n in 0usize..64, seed in any::<u64>()) {
            let indices = shuffled_indices(n, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(indices.len(), n);
            prop_assert!(is_permutation(&indices));
        }

        #[test]
        fn inverse_lookup_is_idempotent(n in 1usize..64, seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
            let order = PresentationOrder::random(n, &mut StdRng::seed_from_u64(seed));
            let original = pick.index(n);
            let display = order.answer_display(original).unwrap();
            prop_assert_eq!(order.answers()[display], original);
        }
    }
}
