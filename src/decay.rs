use crate::error::{Error, Result};

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

fn validate(rate: f32, vi: f32, vf: f32) -> Result<()> {
    (rate > 0.0 && rate <= 1.0 && vi >= vf)
        .then_some(())
        .ok_or_else(|| {
            Error::Decay(String::from(
                "`rate` must be in (0, 1] and `vi` must not be below `vf`",
            ))
        })
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = max(v<sub>i</sub> * r<sup>t</sup>, v<sub>f</sub>)
///
/// Equivalent to multiplying the value by `rate` once per time step and
/// flooring it at `vf`, but stateless in `t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multiplicative {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Multiplicative {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Multiplicative {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi * rate.powf(t)).max(vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(0.995, 1.0, 0.01).is_ok());
        assert!(validate(1.0, 1.0, 1.0).is_ok());
        assert!(validate(0.0, 1.0, 0.01).is_err());
        assert!(validate(1.5, 1.0, 0.01).is_err());
        assert!(validate(0.995, 0.01, 1.0).is_err());
    }

    #[test]
    fn constant_decay() {
        let x = Constant::new(1.0);
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 1.0);
    }

    #[test]
    fn multiplicative_decay() {
        let x = Multiplicative::new(0.5, 2.0, 0.1).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert!((x.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!((x.evaluate(2.0) - 0.5).abs() < 1e-6);
        assert_eq!(x.evaluate(100.0), 0.1, "floored at `vf`");
    }

    #[test]
    fn multiplicative_decay_is_monotone() {
        let x = Multiplicative::new(0.995, 1.0, 0.01).unwrap();
        let mut prev = x.evaluate(0.0);
        for t in 1..2000 {
            let v = x.evaluate(t as f32);
            assert!(v <= prev);
            assert!(v >= 0.01);
            prev = v;
        }
    }
}
