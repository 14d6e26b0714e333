use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a detected KPI transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction implied by a signed diff. A zero diff counts as upward.
    pub fn from_diff(diff: i64) -> Self {
        if diff >= 0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// A transition between two consecutive rounded KPI values, or the synthetic
/// first ("baseline") observation of a series.
///
/// Events are produced once per detection run and are read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeEvent {
    /// Calendar date of the observation that triggered the event.
    pub date: NaiveDate,
    pub previous_value: i64,
    pub current_value: i64,
    /// `current_value - previous_value`; zero only for the baseline event.
    pub diff: i64,
    pub direction: Direction,
}

impl ChangeEvent {
    /// Builds the synthetic baseline event for the first observation.
    pub fn baseline(date: NaiveDate, value: i64) -> Self {
        Self {
            date,
            previous_value: value,
            current_value: value,
            diff: 0,
            direction: Direction::Up,
        }
    }

    /// Builds a transition event between two rounded values.
    pub fn transition(date: NaiveDate, previous: i64, current: i64) -> Self {
        let diff = current - previous;
        Self {
            date,
            previous_value: previous,
            current_value: current,
            diff,
            direction: Direction::from_diff(diff),
        }
    }

    /// Whether this is the synthetic first event of a series.
    pub fn is_baseline(&self) -> bool {
        self.diff == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 2).expect("valid date")
    }

    #[test]
    fn transition_direction_follows_diff_sign() {
        let up = ChangeEvent::transition(date(), 10, 16);
        assert_eq!(up.diff, 6);
        assert_eq!(up.direction, Direction::Up);

        let down = ChangeEvent::transition(date(), 20, 15);
        assert_eq!(down.diff, -5);
        assert_eq!(down.direction, Direction::Down);
    }

    #[test]
    fn baseline_has_equal_values_and_zero_diff() {
        let baseline = ChangeEvent::baseline(date(), 9);
        assert_eq!(baseline.previous_value, baseline.current_value);
        assert_eq!(baseline.diff, 0);
        assert_eq!(baseline.direction, Direction::Up);
        assert!(baseline.is_baseline());
    }
}
