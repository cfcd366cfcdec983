use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::env::{DiscreteActionSpace, Environment};

/// K-armed bandit environment
///
/// A simple environment with K arms, each of which has a normal distribution of rewards.
/// The goal is to learn which arm has the highest mean reward.
pub struct KArmedBandit<const K: usize, R = StdRng> {
    means: [f32; K],
    arms: [Normal<f32>; K],
    rng: R,
}

impl<const K: usize> KArmedBandit<K> {
    /// Initialize a new K-armed bandit with arm means drawn from N(0, 1)
    pub fn new() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let means = std::array::from_fn(|_| rng.sample(rand_distr::StandardNormal));
        Self::with_means(means, rng)
    }
}

impl<const K: usize> Default for KArmedBandit<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: usize, R: Rng> KArmedBandit<K, R> {
    /// Initialize a bandit with given arm means, each arm having unit variance
    pub fn with_means(means: [f32; K], rng: R) -> Self {
        let arms =
            means.map(|mean| Normal::new(mean, 1.0).expect("unit standard deviation is valid"));
        Self { means, arms, rng }
    }

    pub fn means(&self) -> &[f32; K] {
        &self.means
    }

    /// The arm with the highest mean reward, `None` if the bandit has no arms
    pub fn best_arm(&self) -> Option<usize> {
        self.means
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }
}

impl<const K: usize, R: Rng> Environment for KArmedBandit<K, R> {
    type State = ();
    type Action = usize;

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        assert!(action < K, "Invalid action: {}", action);
        (Some(()), self.arms[action].sample(&mut self.rng))
    }

    fn reset(&mut self) -> Self::State {}
}

impl<const K: usize, R: Rng> DiscreteActionSpace for KArmedBandit<K, R> {
    fn actions(&self) -> Vec<Self::Action> {
        (0..K).collect()
    }
}
