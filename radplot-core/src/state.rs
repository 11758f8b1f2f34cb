//! Plot State
//!
//! The editable plotting sheet: own ship, display frame, a list of contacts
//! with their two observations, and the avoidance settings. Every edit is a
//! pure transition from one state to the next; solving is done on demand
//! from whatever the state holds.
//!
//! Bearings are stored as true bearings. An [`Action`] carries bearings in
//! the current display frame and they are converted on entry.

use serde::{Deserialize, Serialize};

use crate::error::PlotError;
use crate::geometry::{display_to_true, normalize_bearing, true_to_display, FrameMode};
use crate::plot::{
    solve, solve_avoidance, AvoidanceInput, ClockTime, Observation, OwnShip, Solution,
};

/// One contact with two observations, as entered on the form
///
/// Times are kept as typed so that an unfinished entry survives a save and
/// load; they are only parsed when the plot is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlot {
    pub bearing1: f64,
    pub range1: f64,
    pub time1: String,
    pub bearing2: f64,
    pub range2: f64,
    pub time2: String,
}

impl TargetPlot {
    pub fn new(
        bearing1: f64,
        range1: f64,
        time1: &str,
        bearing2: f64,
        range2: f64,
        time2: &str,
    ) -> Self {
        TargetPlot {
            bearing1,
            range1,
            time1: time1.to_string(),
            bearing2,
            range2,
            time2: time2.to_string(),
        }
    }

    /// Both observations, with their clock times parsed
    pub fn observations(&self) -> Result<(Observation, Observation), PlotError> {
        let time1: ClockTime = self.time1.parse()?;
        let time2: ClockTime = self.time2.parse()?;
        Ok((
            Observation::new(self.bearing1, self.range1, time1),
            Observation::new(self.bearing2, self.range2, time2),
        ))
    }

    /// Bearings of both observations as shown in the given frame
    pub fn display_bearings(&self, own_course: f64, mode: FrameMode) -> (f64, f64) {
        (
            true_to_display(self.bearing1, own_course, mode),
            true_to_display(self.bearing2, own_course, mode),
        )
    }
}

/// Proposed avoidance maneuver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvoidanceSettings {
    pub active: bool,
    pub course: f64,
    pub speed: f64,
    /// Range at which to maneuver (NM)
    pub distance: f64,
}

impl Default for AvoidanceSettings {
    fn default() -> Self {
        AvoidanceSettings {
            active: false,
            course: 0.0,
            speed: 0.0,
            distance: 3.0,
        }
    }
}

/// Which of a contact's two observations an edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationSlot {
    First,
    Second,
}

/// New value for one observation field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "field", content = "value")]
pub enum ObservationField {
    /// Bearing in the current display frame
    Bearing(f64),
    Range(f64),
    Time(String),
}

/// An edit to the plotting sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "action", content = "value")]
pub enum Action {
    SetOwnCourse(f64),
    SetOwnSpeed(f64),
    SetFrameMode(FrameMode),
    SelectTarget(usize),
    SetObservation {
        which: ObservationSlot,
        field: ObservationField,
    },
    /// Enter avoidance mode with the given own course and speed
    SetAvoidance { course: f64, speed: f64 },
    SetAvoidanceDistance(f64),
    ExitAvoidance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotState {
    pub own_ship: OwnShip,
    pub frame_mode: FrameMode,
    pub current_target: usize,
    pub targets: Vec<TargetPlot>,
    pub avoidance: AvoidanceSettings,
}

impl Default for PlotState {
    fn default() -> Self {
        PlotState {
            own_ship: OwnShip::new(0.0, 12.0),
            frame_mode: FrameMode::TrueUp,
            current_target: 0,
            targets: vec![
                TargetPlot::new(45.0, 8.0, "12:00", 50.0, 6.0, "12:12"),
                TargetPlot::new(90.0, 10.0, "14:00", 95.0, 8.0, "14:15"),
                TargetPlot::new(180.0, 12.0, "16:30", 185.0, 9.0, "16:48"),
                TargetPlot::new(270.0, 7.0, "09:15", 275.0, 5.0, "09:25"),
                TargetPlot::new(315.0, 9.0, "11:00", 320.0, 7.0, "11:14"),
            ],
            avoidance: AvoidanceSettings::default(),
        }
    }
}

impl PlotState {
    /// The selected contact, if the index is valid
    pub fn target(&self) -> Option<&TargetPlot> {
        self.targets.get(self.current_target)
    }

    /// Apply one edit and return the resulting state
    pub fn apply(mut self, action: Action) -> PlotState {
        match action {
            Action::SetOwnCourse(course) => {
                self.own_ship.course = normalize_bearing(course);
            }
            Action::SetOwnSpeed(speed) => {
                self.own_ship.speed = speed.max(0.0);
            }
            Action::SetFrameMode(mode) => {
                self.frame_mode = mode;
            }
            Action::SelectTarget(index) => {
                if index < self.targets.len() {
                    self.current_target = index;
                }
            }
            Action::SetObservation { which, field } => {
                let own_course = self.own_ship.course;
                let mode = self.frame_mode;
                if let Some(target) = self.targets.get_mut(self.current_target) {
                    let (bearing, range, time) = match which {
                        ObservationSlot::First => {
                            (&mut target.bearing1, &mut target.range1, &mut target.time1)
                        }
                        ObservationSlot::Second => {
                            (&mut target.bearing2, &mut target.range2, &mut target.time2)
                        }
                    };
                    match field {
                        ObservationField::Bearing(display) => {
                            *bearing = normalize_bearing(display_to_true(display, own_course, mode));
                        }
                        ObservationField::Range(value) => *range = value.max(0.0),
                        ObservationField::Time(value) => *time = value,
                    }
                }
            }
            Action::SetAvoidance { course, speed } => {
                self.avoidance.active = true;
                self.avoidance.course = normalize_bearing(course);
                self.avoidance.speed = speed.max(0.0);
            }
            Action::SetAvoidanceDistance(distance) => {
                self.avoidance.distance = distance.max(0.0);
            }
            Action::ExitAvoidance => {
                self.avoidance.active = false;
            }
        }
        self
    }

    /// Solve the selected contact
    ///
    /// With avoidance active the maneuver range is held within the second
    /// observation's range. Avoidance that does not apply to the geometry
    /// (no relative motion) leaves the plain solution.
    pub fn evaluate(&self) -> Result<Solution, PlotError> {
        let target = self.target().ok_or(PlotError::NoSuchTarget {
            index: self.current_target,
            count: self.targets.len(),
        })?;
        let (obs1, obs2) = target.observations()?;
        let solution = solve(&obs1, &obs2, &self.own_ship)?;

        if !self.avoidance.active {
            return Ok(solution);
        }

        let input = AvoidanceInput {
            new_course: self.avoidance.course,
            new_speed: self.avoidance.speed,
            min_distance: self.avoidance.distance.min(obs2.range),
        };
        match solve_avoidance(solution.solve(), &input) {
            Ok(avoidance) => Ok(solution.with_avoidance(avoidance)),
            Err(PlotError::ZeroRelativeMotion) => Ok(solution),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn head_on_state() -> PlotState {
        PlotState {
            own_ship: OwnShip::new(0.0, 10.0),
            targets: vec![TargetPlot::new(0.0, 10.0, "12:00", 0.0, 8.0, "12:06")],
            ..PlotState::default()
        }
    }

    #[test]
    fn test_default_state() {
        let state = PlotState::default();
        assert_eq!(state.targets.len(), 5);
        assert_eq!(state.current_target, 0);
        assert_eq!(state.own_ship, OwnShip::new(0.0, 12.0));
        assert_eq!(state.frame_mode, FrameMode::TrueUp);
        assert!(!state.avoidance.active);
        assert_eq!(state.avoidance.distance, 3.0);

        for i in 0..state.targets.len() {
            let state = state.clone().apply(Action::SelectTarget(i));
            assert!(state.evaluate().is_ok(), "default contact {} should solve", i);
        }
    }

    #[test]
    fn test_select_target_bounds() {
        let state = PlotState::default().apply(Action::SelectTarget(3));
        assert_eq!(state.current_target, 3);

        let state = state.apply(Action::SelectTarget(5));
        assert_eq!(state.current_target, 3);
    }

    #[test]
    fn test_course_and_speed_normalized() {
        let state = PlotState::default()
            .apply(Action::SetOwnCourse(370.0))
            .apply(Action::SetOwnSpeed(-4.0));
        assert!((state.own_ship.course - 10.0).abs() < EPSILON);
        assert_eq!(state.own_ship.speed, 0.0);
    }

    #[test]
    fn test_bearing_entered_in_heading_up_frame() {
        let state = PlotState::default()
            .apply(Action::SetOwnCourse(350.0))
            .apply(Action::SetFrameMode(FrameMode::HeadingUp))
            .apply(Action::SetObservation {
                which: ObservationSlot::Second,
                field: ObservationField::Bearing(20.0),
            });

        let target = state.target().unwrap();
        assert!((target.bearing2 - 10.0).abs() < EPSILON);
        // First observation untouched
        assert_eq!(target.bearing1, 45.0);

        let (_, shown) = target.display_bearings(state.own_ship.course, state.frame_mode);
        assert!((shown - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_bearing_entered_in_true_up_frame() {
        let state = PlotState::default()
            .apply(Action::SetOwnCourse(90.0))
            .apply(Action::SetObservation {
                which: ObservationSlot::First,
                field: ObservationField::Bearing(-30.0),
            });
        assert!((state.target().unwrap().bearing1 - 330.0).abs() < EPSILON);
    }

    #[test]
    fn test_edit_applies_to_selected_target() {
        let state = PlotState::default()
            .apply(Action::SelectTarget(2))
            .apply(Action::SetObservation {
                which: ObservationSlot::First,
                field: ObservationField::Range(11.5),
            })
            .apply(Action::SetObservation {
                which: ObservationSlot::Second,
                field: ObservationField::Time("16:50".to_string()),
            });

        assert_eq!(state.targets[2].range1, 11.5);
        assert_eq!(state.targets[2].time2, "16:50");
        assert_eq!(state.targets[0], PlotState::default().targets[0]);
    }

    #[test]
    fn test_invalid_time_surfaces_on_evaluate() {
        let state = PlotState::default().apply(Action::SetObservation {
            which: ObservationSlot::First,
            field: ObservationField::Time("12h00".to_string()),
        });
        assert!(matches!(state.evaluate(), Err(PlotError::InvalidTime(_))));
    }

    #[test]
    fn test_non_chronological_surfaces_on_evaluate() {
        let state = PlotState::default().apply(Action::SetObservation {
            which: ObservationSlot::Second,
            field: ObservationField::Time("11:00".to_string()),
        });
        assert!(matches!(
            state.evaluate(),
            Err(PlotError::NonChronological { .. })
        ));
    }

    #[test]
    fn test_empty_plot() {
        let state = PlotState {
            targets: Vec::new(),
            ..PlotState::default()
        };
        assert_eq!(
            state.evaluate(),
            Err(PlotError::NoSuchTarget { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_hand_edited_index_out_of_range() {
        let state = PlotState {
            current_target: 7,
            ..PlotState::default()
        };
        assert_eq!(
            state.evaluate(),
            Err(PlotError::NoSuchTarget { index: 7, count: 5 })
        );
    }

    #[test]
    fn test_avoidance_lifecycle() {
        let state = head_on_state().apply(Action::SetAvoidance {
            course: 90.0,
            speed: 10.0,
        });
        assert!(state.avoidance.active);

        let state = state.apply(Action::SetAvoidanceDistance(4.0));
        let solution = state.evaluate().unwrap();
        let avoidance = solution.avoidance().expect("avoidance active");
        assert!(avoidance.maneuver_needed);
        assert!((avoidance.maneuver_point.y - 4.0).abs() < 1e-6);
        assert_eq!(avoidance.input.min_distance, 4.0);

        let state = state.apply(Action::ExitAvoidance);
        assert!(state.evaluate().unwrap().avoidance().is_none());
        // Settings are kept for the next time avoidance is entered
        assert_eq!(state.avoidance.distance, 4.0);
    }

    #[test]
    fn test_avoidance_distance_clamped_to_current_range() {
        let state = head_on_state()
            .apply(Action::SetAvoidance {
                course: 90.0,
                speed: 10.0,
            })
            .apply(Action::SetAvoidanceDistance(12.0));

        let solution = state.evaluate().unwrap();
        let avoidance = solution.avoidance().unwrap();
        assert_eq!(avoidance.input.min_distance, 8.0);
        // Maneuver right away, at the second observation
        assert!(avoidance.time_to_maneuver_hours.abs() < 1e-6);
    }

    #[test]
    fn test_avoidance_without_relative_motion() {
        let state = PlotState {
            own_ship: OwnShip::new(90.0, 8.0),
            targets: vec![TargetPlot::new(30.0, 4.0, "08:00", 30.0, 4.0, "08:10")],
            ..PlotState::default()
        }
        .apply(Action::SetAvoidance {
            course: 180.0,
            speed: 8.0,
        });

        let solution = state.evaluate().unwrap();
        assert!(solution.avoidance().is_none());
    }

    #[test]
    fn test_action_json() {
        let action: Action = serde_json::from_str(
            r#"{"action":"setObservation","value":{"which":"second","field":{"field":"bearing","value":12.5}}}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::SetObservation {
                which: ObservationSlot::Second,
                field: ObservationField::Bearing(12.5),
            }
        );

        let action: Action = serde_json::from_str(r#"{"action":"setOwnSpeed","value":8.5}"#).unwrap();
        assert_eq!(action, Action::SetOwnSpeed(8.5));
    }
}
