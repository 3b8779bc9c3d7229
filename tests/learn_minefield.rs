use minefield_maze::{
    algo::{QTableAgent, QTableAgentConfig},
    decay,
    env::{Action, Minefield},
    exploration::EpsilonGreedy,
};
use strum::EnumCount;

const SIZE: usize = 5;

fn greedy(row: &[f32]) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, &q)| {
            if q > best.1 {
                (i, q)
            } else {
                best
            }
        })
        .0
}

#[test]
fn crossing_a_clear_board_step_by_step() {
    let mut env = Minefield::with_seed(7);
    assert_eq!(env.reset(SIZE, 0.0).unwrap(), 0);

    // Walk the top edge, then down the right edge
    let path = [
        (Action::Right, 1),
        (Action::Right, 2),
        (Action::Right, 3),
        (Action::Right, 4),
        (Action::Down, 9),
        (Action::Down, 14),
        (Action::Down, 19),
    ];
    for (action, state) in path {
        assert_eq!(env.step(action).unwrap(), (state, -1.0, false));
    }
    assert_eq!(env.step(Action::Down).unwrap(), (24, 100.0, true));

    // Terminated episodes no longer move
    assert_eq!(env.step(Action::Up).unwrap(), (24, 0.0, true));
}

#[test]
fn first_step_onto_a_mine_ends_the_game() {
    let mut env = Minefield::with_seed(11);
    env.reset(4, 1.0).unwrap();

    assert_eq!(env.step(Action::Right).unwrap(), (1, -100.0, true));
    assert!(env.is_done());
}

#[test]
fn the_table_outlives_board_resets() {
    let mut env = Minefield::with_seed(5);
    let mut agent = QTableAgent::new(QTableAgentConfig::default()).with_seed(5);

    env.reset(SIZE, 0.3).unwrap();
    agent.update(0, 1, -1.0, 1).unwrap();
    let learned = agent.q_row(0).unwrap().to_vec();

    env.reset(SIZE, 0.3).unwrap();
    assert_eq!(agent.q_row(0).unwrap(), learned.as_slice());
}

#[test]
fn q_learning_masters_a_clear_board() {
    let mut env = Minefield::with_seed(3);
    let mut agent = QTableAgent::new(QTableAgentConfig {
        states: SIZE * SIZE,
        actions: Action::COUNT,
        alpha: 0.5,
        gamma: 0.95,
        exploration: EpsilonGreedy::new(decay::Multiplicative::new(0.995, 1.0, 0.01).unwrap()),
    })
    .with_seed(3);

    for _ in 0..3000 {
        let mut state = env.reset(SIZE, 0.0).unwrap();
        loop {
            let action = agent.select_action(state).unwrap();
            let (next_state, reward, done) = env.step(Action::try_from(action).unwrap()).unwrap();
            agent.update(state, action, reward, next_state).unwrap();
            state = next_state;
            if done {
                break;
            }
        }
    }

    // The learned table, followed greedily, must walk straight to the goal
    let mut state = env.reset(SIZE, 0.0).unwrap();
    for _ in 0..50 {
        let action = greedy(agent.q_row(state).unwrap());
        let (next_state, reward, done) = env.step(Action::try_from(action).unwrap()).unwrap();
        state = next_state;
        if done {
            assert_eq!(reward, 100.0, "policy walked into a terminal that is not the goal");
            return;
        }
    }
    panic!("greedy policy did not reach the goal within 50 moves");
}
