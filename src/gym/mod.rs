pub mod k_armed_bandit;
pub mod market;

pub use k_armed_bandit::KArmedBandit;
pub use market::{MarketAction, MarketSim, MarketState};
