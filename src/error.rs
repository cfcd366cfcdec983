use thiserror::Error;

/// Errors surfaced by the learner and the training loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// There is no action to choose from
    #[error("action set is empty; there is no valid action to choose")]
    InvalidActionSet,

    /// A hyperparameter is outside of its domain
    #[error("invalid value {value} for `{name}`; must be in the interval {interval}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        interval: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
