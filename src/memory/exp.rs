/// Represents a single experience or transition in the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Exp<S, A> {
    /// The state of the environment before taking the action
    pub state: S,
    /// The action taken in the given state
    pub action: A,
    /// The state of the environment after the action is taken, or if terminal, `None`
    pub next_state: Option<S>,
    /// The reward received after taking the action
    pub reward: f32,
}

impl<S, A> Exp<S, A> {
    /// Whether the transition ended the episode
    pub fn is_terminal(&self) -> bool {
        self.next_state.is_none()
    }
}
