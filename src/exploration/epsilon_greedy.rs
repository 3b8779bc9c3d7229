use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with a time-decaying epsilon threshold
///
/// The decision is a pure function of the evaluated epsilon and a single
/// uniform draw from the provided generator.
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The epsilon threshold at time `t`
    pub fn epsilon(&self, t: f32) -> f32 {
        self.epsilon.evaluate(t)
    }

    /// Invoke epsilon greedy policy at time `t`
    pub fn choose<R: Rng>(&self, rng: &mut R, t: f32) -> Choice {
        if rng.gen::<f32>() < self.epsilon.evaluate(t) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::decay;

    use super::*;

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);

        let always_exploit = EpsilonGreedy::new(decay::Constant::new(0.0));
        let always_explore = EpsilonGreedy::new(decay::Constant::new(1.0));

        for t in 0..1000 {
            assert!(matches!(
                always_exploit.choose(&mut rng, t as f32),
                Choice::Exploit
            ));
            assert!(matches!(
                always_explore.choose(&mut rng, t as f32),
                Choice::Explore
            ));
        }
    }
}
