use crate::{memory::Exp, Result};

/// An agent that can be driven by a training loop
///
/// ### Generics
/// - `S` - The state type of the environment
/// - `A` - The action type of the environment
pub trait Agent<S, A> {
    /// Choose an action to take in the given state
    fn act(&mut self, state: &S) -> Result<A>;

    /// Learn from a single transition
    fn learn(&mut self, exp: Exp<S, A>);
}
