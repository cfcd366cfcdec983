use std::error::Error;

use wealth_rl::{
    gym::{MarketAction, MarketState},
    train::{train_market_agent, TrainerConfig},
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let agent = train_market_agent(MarketAction::ALL, TrainerConfig::default())?;

    for state in [MarketState::Start, MarketState::End] {
        for action in MarketAction::ALL {
            println!(
                "{state:?} {action:?}: value {:.3}, visits {}",
                agent.value(&state, &action),
                agent.count(&state, &action)
            );
        }
    }

    Ok(())
}
