use crate::{abstraction::StateKey, assert_interval, ds::QTable, memory::Transition};

/// One-step Q-learning
///
/// Moves the value of the previous transition towards
/// `reward + gamma * max_a Q(next_key, a)`, bootstrapping from the greedy value of the
/// next state regardless of which action is taken there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QLearning {
    alpha: f64, // learning rate
    gamma: f64, // discount factor
}

impl QLearning {
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn new(alpha: f64, gamma: f64) -> Self {
        assert_interval!(alpha, 0.0, 1.0);
        assert_interval!(gamma, 0.0, 1.0);
        Self { alpha, gamma }
    }

    /// Apply the backup for `prev`, which led into `next_key` and earned `reward`
    ///
    /// Both keys are ensured first. **Returns** the updated value.
    pub fn update(
        &self,
        table: &mut QTable,
        prev: &Transition,
        next_key: &StateKey,
        reward: f64,
    ) -> f64 {
        table.ensure(&prev.key);
        table.ensure(next_key);

        let q_value = table.get(&prev.key, prev.action).unwrap_or(0.0);
        let max_next_q = table.max_value(next_key).unwrap_or(0.0);
        let target = reward + self.gamma * max_next_q;
        let new_q_value = (1.0 - self.alpha) * q_value + self.alpha * target;

        table.set(&prev.key, prev.action, new_q_value);
        log::debug!(
            "Q({}, {}) {q_value} -> {new_q_value} (reward {reward})",
            prev.key,
            prev.action
        );
        new_q_value
    }
}

impl Default for QLearning {
    fn default() -> Self {
        Self::new(0.1, 0.9)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::env::Action;

    use super::*;

    #[test]
    fn bellman_backup() {
        let prev = Transition::new(StateKey::from("s"), Action::Up);
        let next = StateKey::from("s'");
        let mut table = QTable::new();
        table.ensure(&next);
        table.set(&next, Action::Left, 10.0);

        let value = QLearning::default().update(&mut table, &prev, &next, 5.0);
        assert_relative_eq!(value, 1.4, epsilon = 1e-12);
        assert_relative_eq!(table.get(&prev.key, Action::Up).unwrap(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn blends_with_prior_value() {
        let prev = Transition::new(StateKey::from("s"), Action::Right);
        let next = StateKey::from("t");
        let mut table = QTable::new();
        table.ensure(&prev.key);
        table.set(&prev.key, Action::Right, 2.0);

        // 0.9 * 2 + 0.1 * (-10 + 0.9 * 0)
        let value = QLearning::default().update(&mut table, &prev, &next, -10.0);
        assert_relative_eq!(value, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn ensures_both_keys() {
        let prev = Transition::new(StateKey::from("a"), Action::Stay);
        let next = StateKey::from("b");
        let mut table = QTable::new();

        QLearning::default().update(&mut table, &prev, &next, 0.0);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.row(&next).unwrap().len(),
            5,
            "Next key gets a full row"
        );
        assert_eq!(table.get(&prev.key, Action::Stay), Some(0.0));
    }

    #[test]
    fn self_transition_uses_value_before_update() {
        let key = StateKey::from("loop");
        let prev = Transition::new(key.clone(), Action::Down);
        let mut table = QTable::new();
        table.ensure(&key);
        table.set(&key, Action::Down, 1.0);

        // 0.9 * 1 + 0.1 * (0 + 0.9 * 1)
        let value = QLearning::default().update(&mut table, &prev, &key, 0.0);
        assert_relative_eq!(value, 0.99, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn rejects_invalid_alpha() {
        QLearning::new(1.5, 0.9);
    }
}
