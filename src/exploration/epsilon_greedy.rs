use rand::Rng;

use crate::assert_interval;

use super::Choice;

/// Epsilon greedy exploration policy with a fixed epsilon threshold
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Explore with probability `epsilon`, exploit otherwise
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(0.1)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let never = EpsilonGreedy::new(0.0);
        let always = EpsilonGreedy::new(1.0);
        for _ in 0..1000 {
            assert_eq!(never.choose(&mut rng), Choice::Exploit);
            assert_eq!(always.choose(&mut rng), Choice::Explore);
        }
    }

    #[test]
    fn explores_at_roughly_epsilon() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = EpsilonGreedy::default();
        let explored = (0..10_000)
            .filter(|_| policy.choose(&mut rng) == Choice::Explore)
            .count();
        assert!(
            (700..1300).contains(&explored),
            "Explored {explored} of 10000 with epsilon 0.1"
        );
    }

    #[test]
    #[should_panic]
    fn rejects_invalid_epsilon() {
        EpsilonGreedy::new(1.1);
    }
}
