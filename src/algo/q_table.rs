use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    assert_interval,
    decay::{self, Decay},
    error::{Error, Result},
    exploration::{Choice, EpsilonGreedy},
};

/// Configuration for the [`QTableAgent`]
pub struct QTableAgentConfig<D: Decay> {
    /// Number of states in the environment's state space
    pub states: usize,
    /// Number of actions available in every state
    pub actions: usize,
    pub alpha: f32,
    pub gamma: f32,
    pub exploration: EpsilonGreedy<D>,
}

impl Default for QTableAgentConfig<decay::Multiplicative> {
    fn default() -> Self {
        Self {
            states: 25,
            actions: 4,
            alpha: 0.1,
            gamma: 0.95,
            exploration: EpsilonGreedy::new(decay::Multiplicative::new(0.995, 1.0, 0.01).unwrap()),
        }
    }
}

/// A simple Q-learning agent that utilizes a Q-table to learn its environment
///
/// Q-values live in a dense `states x actions` table, initialized to zero at
/// construction. The table persists across environment resets and is only
/// mutated by [`update`](QTableAgent::update). The agent observes nothing but
/// state indices, rewards, and its own table, so it cannot cheat by inspecting
/// the environment.
///
/// The epsilon threshold anneals by one decay step per `update` call, not per
/// episode, so longer episodes anneal it faster.
pub struct QTableAgent<D: Decay> {
    q_table: Vec<f32>,
    states: usize,
    actions: usize,
    exploration: EpsilonGreedy<D>,
    alpha: f32,   // learning rate
    gamma: f32,   // discount factor
    step: u32,    // completed updates, drives the epsilon schedule
    rng: StdRng,
}

impl<D: Decay> QTableAgent<D> {
    /// Initialize a new `QTableAgent` for the given state and action space sizes
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`, or if
    /// either space is empty
    pub fn new(config: QTableAgentConfig<D>) -> Self {
        assert_interval!(config.alpha, 0.0, 1.0);
        assert_interval!(config.gamma, 0.0, 1.0);
        assert!(
            config.states > 0 && config.actions > 0,
            "State and action spaces must not be empty.",
        );
        Self {
            q_table: vec![0.0; config.states * config.actions],
            states: config.states,
            actions: config.actions,
            exploration: config.exploration,
            alpha: config.alpha,
            gamma: config.gamma,
            step: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the entropy-seeded generator with a reproducible one
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Choose an action index for `state` with the epsilon greedy policy
    ///
    /// Exploration draws a uniformly random action. Exploitation returns the
    /// argmax of the state's table row; ties break to the lowest action index.
    pub fn select_action(&mut self, state: usize) -> Result<usize> {
        self.check_state(state)?;
        let action = match self.exploration.choose(&mut self.rng, self.step as f32) {
            Choice::Explore => self.rng.gen_range(0..self.actions),
            Choice::Exploit => argmax(self.row(state)),
        };
        Ok(action)
    }

    /// Learn from a single transition and advance the epsilon schedule
    ///
    /// Applies the Q-learning rule
    ///
    /// `Q(s,a) <- (1 - alpha) * Q(s,a) + alpha * (reward + gamma * max_a' Q(s',a'))`
    ///
    /// The bootstrap term is always included, even when `next_state` ended the
    /// episode. Epsilon decays once per call, unconditionally.
    pub fn update(&mut self, state: usize, action: usize, reward: f32, next_state: usize) -> Result<()> {
        self.check_state(state)?;
        self.check_state(next_state)?;
        if action >= self.actions {
            return Err(Error::InvalidAction(action));
        }

        let max_next_q = max_q(self.row(next_state));
        let q_value = &mut self.q_table[state * self.actions + action];
        *q_value = (1.0 - self.alpha) * *q_value + self.alpha * (reward + self.gamma * max_next_q);
        self.step += 1;
        Ok(())
    }

    /// The epsilon threshold after the updates applied so far
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon(self.step as f32)
    }

    /// The Q-values for every action in `state`
    pub fn q_row(&self, state: usize) -> Result<&[f32]> {
        self.check_state(state)?;
        Ok(self.row(state))
    }

    fn row(&self, state: usize) -> &[f32] {
        &self.q_table[state * self.actions..(state + 1) * self.actions]
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if state < self.states {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                state,
                states: self.states,
            })
        }
    }
}

fn argmax(row: &[f32]) -> usize {
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

fn max_q(row: &[f32]) -> f32 {
    row.iter().copied().fold(f32::NEG_INFINITY, f32::max)
}

#[cfg(test)]
mod tests {
    use statrs::distribution::{ChiSquared, ContinuousCDF};

    use super::*;

    fn constant_epsilon_agent(epsilon: f32, alpha: f32, gamma: f32) -> QTableAgent<decay::Constant> {
        QTableAgent::new(QTableAgentConfig {
            states: 6,
            actions: 4,
            alpha,
            gamma,
            exploration: EpsilonGreedy::new(decay::Constant::new(epsilon)),
        })
        .with_seed(42)
    }

    #[test]
    fn update_applies_exact_rule() {
        let mut agent = constant_epsilon_agent(0.0, 0.5, 0.5);

        // From a zeroed table: Q(0,1) = 0.5 * (-1 + 0.5 * 0) = -0.5
        agent.update(0, 1, -1.0, 1).unwrap();
        assert!((agent.q_row(0).unwrap()[1] - (-0.5)).abs() < 1e-6);

        // Q(1,2) = 0.5 * (100 + 0.5 * max Q(0,*)) with max Q(0,*) = 0
        agent.update(1, 2, 100.0, 0).unwrap();
        assert!((agent.q_row(1).unwrap()[2] - 50.0).abs() < 1e-6);

        // Q(0,1) = 0.5 * -0.5 + 0.5 * (-1 + 0.5 * 50) = 11.75
        agent.update(0, 1, -1.0, 1).unwrap();
        assert!((agent.q_row(0).unwrap()[1] - 11.75).abs() < 1e-6);
    }

    #[test]
    fn epsilon_decays_per_update_to_its_floor() {
        let mut agent = QTableAgent::new(QTableAgentConfig {
            states: 2,
            actions: 2,
            alpha: 0.1,
            gamma: 0.9,
            exploration: EpsilonGreedy::new(decay::Multiplicative::new(0.9, 1.0, 0.05).unwrap()),
        })
        .with_seed(42);

        let mut prev = agent.epsilon();
        assert_eq!(prev, 1.0);
        for _ in 0..100 {
            agent.update(0, 0, 0.0, 1).unwrap();
            let epsilon = agent.epsilon();
            assert!(epsilon <= prev);
            assert!(epsilon >= 0.05);
            prev = epsilon;
        }
        assert_eq!(agent.epsilon(), 0.05, "floored after enough updates");
    }

    #[test]
    fn greedy_selection_is_argmax() {
        let mut agent = constant_epsilon_agent(0.0, 0.5, 0.5);
        agent.update(0, 2, 10.0, 1).unwrap();

        for _ in 0..100 {
            assert_eq!(agent.select_action(0).unwrap(), 2);
        }
    }

    #[test]
    fn greedy_ties_break_to_the_lowest_index() {
        let mut agent = constant_epsilon_agent(0.0, 0.5, 0.5);
        for _ in 0..100 {
            assert_eq!(agent.select_action(3).unwrap(), 0, "zeroed row is a 4-way tie");
        }
    }

    #[test]
    fn exploration_draws_uniform_actions() {
        let mut agent = constant_epsilon_agent(1.0, 0.5, 0.5);

        const DRAWS: usize = 10_000;
        let mut counts = [0usize; 4];
        for _ in 0..DRAWS {
            counts[agent.select_action(0).unwrap()] += 1;
        }

        let expected = DRAWS as f64 / 4.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        let critical = ChiSquared::new(3.0).unwrap().inverse_cdf(0.999);
        assert!(
            chi2 < critical,
            "chi-square statistic {chi2} exceeds the 99.9% critical value {critical}"
        );
    }

    #[test]
    fn seeded_agents_reproduce_their_choices() {
        let mut a = constant_epsilon_agent(1.0, 0.5, 0.5);
        let mut b = constant_epsilon_agent(1.0, 0.5, 0.5);

        for _ in 0..100 {
            assert_eq!(a.select_action(0).unwrap(), b.select_action(0).unwrap());
        }
    }

    #[test]
    fn out_of_range_arguments_fail() {
        let mut agent = constant_epsilon_agent(0.0, 0.5, 0.5);

        assert_eq!(
            agent.select_action(6),
            Err(Error::StateOutOfRange { state: 6, states: 6 })
        );
        assert_eq!(
            agent.update(6, 0, 0.0, 0),
            Err(Error::StateOutOfRange { state: 6, states: 6 })
        );
        assert_eq!(
            agent.update(0, 0, 0.0, 9),
            Err(Error::StateOutOfRange { state: 9, states: 6 })
        );
        assert_eq!(agent.update(0, 4, 0.0, 0), Err(Error::InvalidAction(4)));
        assert!(agent.q_row(7).is_err());
    }
}
