use rand::{
    rngs::StdRng,
    seq::{IteratorRandom, SliceRandom},
    Rng, SeedableRng,
};

use crate::{
    agent::Agent,
    check_interval,
    exploration::{Choice, EpsilonGreedy},
    memory::Exp,
    Error, Result,
};

use super::{q_table::QTable, Hashable};

/// Configuration for the [`QLearner`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct QLearnerConfig {
    /// The learning rate, must be in the interval `(0,1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f32,
    /// The discount factor, must be in the interval `[0,1]`
    ///
    /// **Default**: `0.95`
    pub gamma: f32,
    /// The probability of choosing a uniformly random action, must be in the interval `[0,1]`
    ///
    /// **Default**: `0.1`
    pub epsilon: f32,
}

impl Default for QLearnerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.95,
            epsilon: 0.1,
        }
    }
}

/// A tabular Q-learning agent over a fixed set of actions
///
/// Actions are chosen epsilon greedily and values are updated with the one step rule:
///
/// Q(s,a) ← Q(s,a) + α(r + γ max<sub>a'</sub> Q(s',a') - Q(s,a))
///
/// where the max ranges over the whole action set regardless of which action the policy would take in s'.
///
/// ### Generics
/// - `S` - The state type, any cloneable, hashable token
/// - `A` - The action type, any cloneable, hashable token
/// - `R` - The random source used for exploration and tie breaking
///
/// The learner is not synchronized. Give each concurrent trajectory its own learner or guard it externally.
#[derive(Debug, Clone)]
pub struct QLearner<S, A, R = StdRng> {
    table: QTable<S, A>,
    actions: Vec<A>,
    exploration: EpsilonGreedy,
    alpha: f32,
    gamma: f32,
    rng: R,
}

impl<S: Hashable, A: Hashable> QLearner<S, A> {
    /// Initialize a new `QLearner` seeded from system entropy
    ///
    /// **Errors** if `actions` is empty or any parameter in `config` is out of its interval
    pub fn new(actions: impl Into<Vec<A>>, config: QLearnerConfig) -> Result<Self> {
        Self::with_rng(actions, config, StdRng::from_entropy())
    }
}

impl<S: Hashable, A: Hashable, R: Rng> QLearner<S, A, R> {
    /// Initialize a new `QLearner` drawing randomness from `rng`
    ///
    /// **Errors** if `actions` is empty or any parameter in `config` is out of its interval
    pub fn with_rng(actions: impl Into<Vec<A>>, config: QLearnerConfig, rng: R) -> Result<Self> {
        let actions = actions.into();
        if actions.is_empty() {
            return Err(Error::InvalidActionSet);
        }

        let QLearnerConfig {
            alpha,
            gamma,
            epsilon,
        } = config;
        check_interval!(alpha, open 0.0, 1.0);
        check_interval!(gamma, 0.0, 1.0);

        Ok(Self {
            table: QTable::new(),
            actions,
            exploration: EpsilonGreedy::new(epsilon)?,
            alpha,
            gamma,
            rng,
        })
    }

    /// Choose an action for `state` with the epsilon greedy policy
    ///
    /// Ties for the best value are broken uniformly at random. The table is not modified.
    pub fn select_action(&mut self, state: &S) -> Result<A> {
        let Self {
            table,
            actions,
            exploration,
            rng,
            ..
        } = self;

        match exploration.choose(rng) {
            Choice::Explore => actions.choose(rng).cloned().ok_or(Error::InvalidActionSet),
            Choice::Exploit => greedy(table, actions, state, rng),
        }
    }

    /// Choose the best known action for `state`, never exploring
    pub fn greedy_action(&mut self, state: &S) -> Result<A> {
        let Self {
            table,
            actions,
            rng,
            ..
        } = self;
        greedy(table, actions, state, rng)
    }

    /// Move the value of `(state, action)` toward `reward` plus the discounted best value of `next_state`
    ///
    /// Only the entry for `(state, action)` is written.
    pub fn update(&mut self, state: S, action: A, reward: f32, next_state: &S) {
        let target = reward + self.gamma * self.max_value(next_state);
        self.apply(state, action, target);
    }

    /// Learn from a transition. A terminal transition has no future value.
    pub fn learn(&mut self, exp: Exp<S, A>) {
        let Exp {
            state,
            action,
            next_state,
            reward,
        } = exp;

        let future = next_state.as_ref().map_or(0.0, |s| self.max_value(s));
        self.apply(state, action, reward + self.gamma * future);
    }

    /// Forget everything that has been learned
    pub fn reset(&mut self) {
        self.table.clear();
    }

    fn max_value(&self, state: &S) -> f32 {
        self.actions
            .iter()
            .map(|a| self.table.value(state, a))
            .reduce(f32::max)
            .unwrap_or(0.0)
    }

    fn apply(&mut self, state: S, action: A, target: f32) {
        let alpha = self.alpha;
        let entry = self.table.entry_mut(state, action);
        entry.value += alpha * (target - entry.value);
        entry.count = entry.count.saturating_add(1);
    }
}

impl<S: Hashable, A: Hashable, R> QLearner<S, A, R> {
    /// The current value estimate for a state action pair, `0.0` if unseen
    pub fn value(&self, state: &S, action: &A) -> f32 {
        self.table.value(state, action)
    }

    /// The number of updates applied to a state action pair
    pub fn count(&self, state: &S, action: &A) -> u32 {
        self.table.count(state, action)
    }

    pub fn table(&self) -> &QTable<S, A> {
        &self.table
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    pub fn config(&self) -> QLearnerConfig {
        QLearnerConfig {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.exploration.epsilon(),
        }
    }
}

impl<S: Hashable, A: Hashable, R: Rng> Agent<S, A> for QLearner<S, A, R> {
    fn act(&mut self, state: &S) -> Result<A> {
        self.select_action(state)
    }

    fn learn(&mut self, exp: Exp<S, A>) {
        QLearner::learn(self, exp)
    }
}

/// Pick uniformly among the actions sharing the highest value in `state`
fn greedy<S, A, R>(table: &QTable<S, A>, actions: &[A], state: &S, rng: &mut R) -> Result<A>
where
    S: Hashable,
    A: Hashable,
    R: Rng + ?Sized,
{
    let values = actions
        .iter()
        .map(|a| table.value(state, a))
        .collect::<Vec<_>>();
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    actions
        .iter()
        .zip(values)
        .filter(|&(_, v)| v == max)
        .map(|(a, _)| a)
        .choose(rng)
        .cloned()
        .ok_or(Error::InvalidActionSet)
}
