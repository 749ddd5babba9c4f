//! Segment shot filter.
//!
//! Narrows a shot collection to one player inside a half-open time window,
//! with optional on/off-court constraints. Constraints compose by AND;
//! output preserves input order and never mutates the source.

use serde::{Deserialize, Serialize};

use super::clock::TimeWindow;
use crate::models::ShotRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotFilter {
    pub player_id: u32,
    pub window: TimeWindow,
    /// Require this teammate on court.
    pub teammate_on: Option<u32>,
    /// Require this teammate off court.
    pub teammate_off: Option<u32>,
    /// Require this opponent on court.
    pub opponent_on: Option<u32>,
    /// Require this opponent off court.
    pub opponent_off: Option<u32>,
}

impl ShotFilter {
    pub fn new(player_id: u32, window: TimeWindow) -> Self {
        Self {
            player_id,
            window,
            teammate_on: None,
            teammate_off: None,
            opponent_on: None,
            opponent_off: None,
        }
    }

    pub fn matches(&self, shot: &ShotRecord) -> bool {
        if shot.player_id != self.player_id || !self.window.contains(shot.elapsed_min) {
            return false;
        }
        if let Some(id) = self.teammate_on {
            if !shot.teammates_on_court.contains(&id) {
                return false;
            }
        }
        if let Some(id) = self.teammate_off {
            if shot.teammates_on_court.contains(&id) {
                return false;
            }
        }
        if let Some(id) = self.opponent_on {
            if !shot.opponents_on_court.contains(&id) {
                return false;
            }
        }
        if let Some(id) = self.opponent_off {
            if shot.opponents_on_court.contains(&id) {
                return false;
            }
        }
        true
    }

    /// Order-preserving narrowing of `shots`.
    pub fn apply(&self, shots: &[ShotRecord]) -> Vec<ShotRecord> {
        shots.iter().filter(|s| self.matches(s)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(player_id: u32, elapsed_min: f32, teammates: Vec<u32>, opponents: Vec<u32>) -> ShotRecord {
        ShotRecord {
            player_id,
            player_name: String::new(),
            loc_x: 0.0,
            loc_y: 0.0,
            made: false,
            period: 1,
            minutes_remaining: 0,
            seconds_remaining: 0,
            action_type: None,
            value: Default::default(),
            teammates_on_court: teammates,
            opponents_on_court: opponents,
            elapsed_min,
        }
    }

    #[test]
    fn test_player_and_window() {
        let shots = vec![
            shot(7, 5.0, vec![], vec![]),
            shot(8, 5.0, vec![], vec![]),
            shot(7, 24.0, vec![], vec![]),
            shot(7, 23.9, vec![], vec![]),
        ];
        let f = ShotFilter::new(7, TimeWindow::new(0.0, 24.0));
        let out = f.apply(&shots);
        assert_eq!(out.len(), 2);
        // Half-open: the shot at exactly 24.0 is excluded.
        assert!((out[1].elapsed_min - 23.9).abs() < 1e-6);
    }

    #[test]
    fn test_on_off_court_constraints_compose() {
        let shots = vec![
            shot(7, 1.0, vec![10, 11], vec![20]),
            shot(7, 2.0, vec![10], vec![20, 21]),
            shot(7, 3.0, vec![11], vec![21]),
        ];

        let mut f = ShotFilter::new(7, TimeWindow::new(0.0, 48.0));
        f.teammate_on = Some(10);
        f.opponent_off = Some(21);
        let out = f.apply(&shots);
        assert_eq!(out.len(), 1);
        assert!((out[0].elapsed_min - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_constraints_means_no_extra_filtering() {
        let shots = vec![shot(7, 1.0, vec![], vec![]), shot(7, 2.0, vec![1], vec![2])];
        let f = ShotFilter::new(7, TimeWindow::new(0.0, 48.0));
        assert_eq!(f.apply(&shots).len(), 2);
    }

    #[test]
    fn test_preserves_order_and_input() {
        let shots = vec![shot(7, 3.0, vec![], vec![]), shot(7, 1.0, vec![], vec![])];
        let f = ShotFilter::new(7, TimeWindow::new(0.0, 48.0));
        let out = f.apply(&shots);
        assert!((out[0].elapsed_min - 3.0).abs() < 1e-6);
        assert_eq!(shots.len(), 2);
    }
}
