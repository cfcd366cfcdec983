use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::env::{DiscreteActionSpace, Environment};

/// Where the market is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketState {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketAction {
    Buy,
    Hold,
    Sell,
}

impl MarketAction {
    pub const ALL: [Self; 3] = [Self::Buy, Self::Hold, Self::Sell];
}

/// A toy market for exercising trading agents
///
/// Every step pays a reward drawn uniformly from `[0, 1)` regardless of the action taken, then
/// moves to [`MarketState::End`] with probability `0.2` or back to [`MarketState::Start`].
/// The market never terminates, so episodes must be bounded by a step limit.
pub struct MarketSim<R = StdRng> {
    state: MarketState,
    rng: R,
}

impl MarketSim {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for MarketSim {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MarketSim<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: MarketState::Start,
            rng,
        }
    }

    pub fn state(&self) -> MarketState {
        self.state
    }
}

impl<R: Rng> Environment for MarketSim<R> {
    type State = MarketState;
    type Action = MarketAction;

    fn step(&mut self, action: Self::Action) -> (Option<Self::State>, f32) {
        let reward = self.rng.gen::<f32>();
        self.state = if self.rng.gen::<f32>() > 0.8 {
            MarketState::End
        } else {
            MarketState::Start
        };
        trace!("{action:?} -> {:?}, reward {reward}", self.state);

        (Some(self.state), reward)
    }

    fn reset(&mut self) -> Self::State {
        self.state = MarketState::Start;
        self.state
    }
}

impl<R: Rng> DiscreteActionSpace for MarketSim<R> {
    fn actions(&self) -> Vec<Self::Action> {
        MarketAction::ALL.to_vec()
    }
}
