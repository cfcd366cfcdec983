use log::{debug, info};

use crate::{agent::Agent, env::Environment, memory::Exp, Result};

/// Configuration for the [`Trainer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct TrainerConfig {
    /// Number of episodes to run
    ///
    /// **Default**: `100`
    pub episodes: usize,
    /// Step limit for a single episode
    ///
    /// **Default**: `10`
    pub max_steps: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            max_steps: 10,
        }
    }
}

/// What happened during a single episode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f32,
}

/// Run one episode of `agent` in `env`, feeding every transition back to the agent
///
/// The episode ends when the environment reaches a terminal state or after `max_steps` steps.
pub fn run_episode<E, G>(agent: &mut G, env: &mut E, max_steps: usize) -> Result<EpisodeSummary>
where
    E: Environment,
    E::State: Clone,
    E::Action: Clone,
    G: Agent<E::State, E::Action>,
{
    let mut summary = EpisodeSummary::default();
    let mut state = env.reset();

    while summary.steps < max_steps {
        let action = agent.act(&state)?;
        let (next_state, reward) = env.step(action.clone());
        summary.steps += 1;
        summary.total_reward += reward;

        agent.learn(Exp {
            state,
            action,
            next_state: next_state.clone(),
            reward,
        });

        match next_state {
            Some(next) => state = next,
            None => break,
        }
    }

    Ok(summary)
}

/// Drives an agent through a fixed number of episodes
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Train `agent` in `env`
    ///
    /// **Returns** a summary per episode, or the first error raised by the agent, which aborts the run
    pub fn train<E, G>(&self, agent: &mut G, env: &mut E) -> Result<Vec<EpisodeSummary>>
    where
        E: Environment,
        E::State: Clone,
        E::Action: Clone,
        G: Agent<E::State, E::Action>,
    {
        let TrainerConfig {
            episodes,
            max_steps,
        } = self.config;
        info!("Training for {episodes} episodes of at most {max_steps} steps");

        let mut summaries = Vec::with_capacity(episodes);
        for episode in 0..episodes {
            let summary = run_episode(agent, env, max_steps)?;
            debug!(
                "Episode {episode}: {} steps, total reward {}",
                summary.steps, summary.total_reward
            );
            summaries.push(summary);
        }

        let mean = if summaries.is_empty() {
            0.0
        } else {
            summaries.iter().map(|s| s.total_reward).sum::<f32>() / summaries.len() as f32
        };
        info!("Finished {episodes} episodes, mean reward {mean}");

        Ok(summaries)
    }
}

/// A learner over the simulated market's states and actions
#[cfg(feature = "gym")]
pub type MarketAgent = crate::algo::QLearner<crate::gym::MarketState, crate::gym::MarketAction>;

/// Train a learner over `actions` (usually [`MarketAction::ALL`](crate::gym::MarketAction::ALL))
/// in the simulated market, seeded from system entropy
///
/// The learner uses [`QLearnerConfig::default`](crate::algo::QLearnerConfig).
///
/// **Errors** if `actions` is empty
#[cfg(feature = "gym")]
pub fn train_market_agent(
    actions: impl Into<Vec<crate::gym::MarketAction>>,
    config: TrainerConfig,
) -> Result<MarketAgent> {
    use crate::{
        algo::{QLearner, QLearnerConfig},
        gym::MarketSim,
    };

    let agent = QLearner::new(actions, QLearnerConfig::default())?;
    train_market(agent, MarketSim::new(), config)
}

/// Same as [`train_market_agent`], but the learner and the market are seeded from `seed`
#[cfg(feature = "gym")]
pub fn train_market_agent_seeded(
    actions: impl Into<Vec<crate::gym::MarketAction>>,
    config: TrainerConfig,
    seed: u64,
) -> Result<MarketAgent> {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        algo::{QLearner, QLearnerConfig},
        gym::MarketSim,
    };

    let agent = QLearner::with_rng(
        actions,
        QLearnerConfig::default(),
        StdRng::seed_from_u64(seed),
    )?;
    train_market(agent, MarketSim::seeded(seed.wrapping_add(1)), config)
}

#[cfg(feature = "gym")]
fn train_market(
    mut agent: MarketAgent,
    mut env: crate::gym::MarketSim,
    config: TrainerConfig,
) -> Result<MarketAgent> {
    Trainer::new(config).train(&mut agent, &mut env)?;
    Ok(agent)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        algo::{QLearner, QLearnerConfig},
        env::tests::{MockEnv, Move},
        Error,
    };

    /// Always takes the same action and remembers what it learned from
    struct Scripted {
        action: Move,
        seen: Vec<Exp<usize, Move>>,
    }

    impl Scripted {
        fn new(action: Move) -> Self {
            Self {
                action,
                seen: Vec::new(),
            }
        }
    }

    impl Agent<usize, Move> for Scripted {
        fn act(&mut self, _state: &usize) -> Result<Move> {
            Ok(self.action)
        }

        fn learn(&mut self, exp: Exp<usize, Move>) {
            self.seen.push(exp);
        }
    }

    struct Broken;

    impl Agent<usize, Move> for Broken {
        fn act(&mut self, _state: &usize) -> Result<Move> {
            Err(Error::InvalidActionSet)
        }

        fn learn(&mut self, _exp: Exp<usize, Move>) {}
    }

    #[test]
    fn episode_ends_at_terminal_state() {
        let mut agent = Scripted::new(Move::Right);
        let mut env = MockEnv::new(4);

        let summary = run_episode(&mut agent, &mut env, 100).unwrap();
        assert_eq!(
            summary,
            EpisodeSummary {
                steps: 3,
                total_reward: 1.0
            }
        );

        let states = agent.seen.iter().map(|e| e.state).collect::<Vec<_>>();
        assert_eq!(states, [0, 1, 2], "Transitions chain state to next state");
        assert_eq!(agent.seen[2].next_state, None, "Last transition is terminal");
    }

    #[test]
    fn episode_stops_at_step_limit() {
        let mut agent = Scripted::new(Move::Left);
        let mut env = MockEnv::new(4);

        let summary = run_episode(&mut agent, &mut env, 7).unwrap();
        assert_eq!(summary.steps, 7, "Step limit reached");
        assert_eq!(summary.total_reward, 0.0, "Goal never reached");
        assert!(agent.seen.iter().all(|e| !e.is_terminal()));
    }

    #[test]
    fn zero_step_limit() {
        let mut agent = Scripted::new(Move::Right);
        let summary = run_episode(&mut agent, &mut MockEnv::new(2), 0).unwrap();
        assert_eq!(summary, EpisodeSummary::default());
        assert!(agent.seen.is_empty());
    }

    #[test]
    fn trainer_runs_every_episode() {
        let trainer = Trainer::new(TrainerConfig {
            episodes: 5,
            max_steps: 10,
        });
        let mut agent = Scripted::new(Move::Right);
        let summaries = trainer.train(&mut agent, &mut MockEnv::new(3)).unwrap();

        assert_eq!(summaries.len(), 5, "One summary per episode");
        assert!(summaries.iter().all(|s| s.steps == 2 && s.total_reward == 1.0));
        assert_eq!(agent.seen.len(), 10);
    }

    #[test]
    fn agent_error_aborts_training() {
        let trainer = Trainer::default();
        let result = trainer.train(&mut Broken, &mut MockEnv::new(3));
        assert_eq!(result.unwrap_err(), Error::InvalidActionSet);
    }

    #[test]
    fn q_learner_finds_the_goal() {
        let mut agent = QLearner::with_rng(
            [Move::Left, Move::Right],
            QLearnerConfig {
                alpha: 0.5,
                gamma: 0.9,
                epsilon: 0.2,
            },
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        let mut env = MockEnv::new(4);
        let trainer = Trainer::new(TrainerConfig {
            episodes: 300,
            max_steps: 50,
        });
        trainer.train(&mut agent, &mut env).unwrap();

        for state in 0..3 {
            assert_eq!(
                agent.greedy_action(&state).unwrap(),
                Move::Right,
                "Heads for the goal from {state}"
            );
        }
        assert!(
            (agent.value(&2, &Move::Right) - 1.0).abs() < 1e-3,
            "Last step is worth the goal reward"
        );
    }

    #[cfg(feature = "gym")]
    #[test]
    fn market_agent_trains() {
        use crate::gym::{MarketAction, MarketState};

        let config = TrainerConfig {
            episodes: 20,
            max_steps: 10,
        };
        let agent = train_market_agent_seeded(MarketAction::ALL, config, 11).unwrap();
        let visits = MarketAction::ALL
            .iter()
            .map(|a| agent.count(&MarketState::Start, a))
            .sum::<u32>();
        assert!(visits > 0, "Start state was visited");
        assert!(agent.table().len() <= 6, "Two states by three actions");

        let again = train_market_agent_seeded(MarketAction::ALL, config, 11).unwrap();
        for state in [MarketState::Start, MarketState::End] {
            for action in MarketAction::ALL {
                assert_eq!(
                    agent.value(&state, &action),
                    again.value(&state, &action),
                    "Same seed, same values"
                );
                assert_eq!(agent.count(&state, &action), again.count(&state, &action));
            }
        }
    }

    #[cfg(feature = "gym")]
    #[test]
    fn market_agent_uses_given_actions() {
        use crate::gym::{MarketAction, MarketState};

        let config = TrainerConfig::default();
        let agent = train_market_agent_seeded([MarketAction::Hold], config, 2).unwrap();
        assert_eq!(agent.actions(), [MarketAction::Hold]);
        assert_eq!(agent.count(&MarketState::Start, &MarketAction::Buy), 0);
        assert!(agent.count(&MarketState::Start, &MarketAction::Hold) > 0);

        let empty = train_market_agent(Vec::<MarketAction>::new(), config);
        assert_eq!(empty.unwrap_err(), Error::InvalidActionSet);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let config: TrainerConfig = serde_json::from_str(r#"{ "episodes": 3 }"#).unwrap();
        assert_eq!(
            config,
            TrainerConfig {
                episodes: 3,
                max_steps: 10
            }
        );
    }
}
