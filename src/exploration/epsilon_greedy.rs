use rand::Rng;

use crate::{check_interval, Result};

use super::Choice;

/// Epsilon greedy exploration policy with a fixed epsilon threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f32,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy with the probability of exploring
    ///
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f32) -> Result<Self> {
        check_interval!(epsilon, 0.0, 1.0);
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Invoke epsilon greedy policy, drawing from the provided random source
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        // gen::<f32>() is in [0, 1), so epsilon = 0 never explores and epsilon = 1 always does
        if rng.gen::<f32>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}
