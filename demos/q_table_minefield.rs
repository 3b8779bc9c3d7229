use std::io;

use minefield_maze::{
    algo::{QTableAgent, QTableAgentConfig},
    decay,
    env::{Action, Minefield},
    exploration::EpsilonGreedy,
    viz::App,
};
use strum::EnumCount;

const SIZE: usize = 5;
const MINE_PROBABILITY: f64 = 0.3;
const NUM_EPISODES: u16 = 1000;

fn main() -> io::Result<()> {
    tui_logger::init_logger(log::LevelFilter::Debug).expect("no other logger is set");
    tui_logger::set_default_level(log::LevelFilter::Debug);

    let env = Minefield::new();
    let agent = QTableAgent::new(QTableAgentConfig {
        states: SIZE * SIZE,
        actions: Action::COUNT,
        alpha: 0.1,
        gamma: 0.95,
        exploration: EpsilonGreedy::new(decay::Multiplicative::new(0.995, 1.0, 0.01).unwrap()),
    });

    App::new(env, agent, SIZE, MINE_PROBABILITY, NUM_EPISODES).run()
}
