use std::{error::Error, fs, path::Path};

use minefield_maze::{
    algo::{QTableAgent, QTableAgentConfig},
    decay,
    env::{Action, Minefield},
    exploration::EpsilonGreedy,
};
use strum::EnumCount;

const SIZE: usize = 5;
const MINE_PROBABILITY: f64 = 0.3;
const NUM_EPISODES: u32 = 1000;

fn main() -> Result<(), Box<dyn Error>> {
    let out = Path::new("demos/out");
    fs::create_dir_all(out)?;

    let mut env = Minefield::new();
    let mut agent = QTableAgent::new(QTableAgentConfig {
        states: SIZE * SIZE,
        actions: Action::COUNT,
        alpha: 0.1,
        gamma: 0.95,
        exploration: EpsilonGreedy::new(decay::Multiplicative::new(0.995, 1.0, 0.01).unwrap()),
    });

    let mut wtr = csv::Writer::from_path(out.join("train_minefield.csv"))?;
    wtr.write_record(["episode", "reward", "steps"])?;

    let mut wins = 0u32;
    for episode in 0..NUM_EPISODES {
        let mut state = env.reset(SIZE, MINE_PROBABILITY)?;
        let mut total_reward = 0.0;
        let mut steps = 0u32;

        loop {
            let action = agent.select_action(state)?;
            let (next_state, reward, done) = env.step(Action::try_from(action)?)?;
            agent.update(state, action, reward, next_state)?;
            state = next_state;
            total_reward += reward;
            steps += 1;
            if done {
                if reward > 0.0 {
                    wins += 1;
                }
                break;
            }
        }

        wtr.write_record([
            episode.to_string(),
            total_reward.to_string(),
            steps.to_string(),
        ])?;
    }
    wtr.flush()?;

    println!(
        "trained {} episodes: {} reached the goal, final epsilon {:.3}",
        NUM_EPISODES,
        wins,
        agent.epsilon()
    );

    Ok(())
}
