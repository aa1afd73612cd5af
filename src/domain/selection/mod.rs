//! Selection model: the editable in/out points on the timeline

use crate::domain::errors::DomainError;
use crate::domain::model::Selection;
use crate::domain::rules::{DurationRule, DEFAULT_SELECTION_SECONDS};
use crate::utils::time::{format_time, parse_time};

/// Holds the current selection and the duration it is bounded by
///
/// Every accepted mutation keeps `0 <= start < end <= duration`. Rejected
/// mutations return an error and leave both points untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionModel {
    selection: Selection,
    duration: f64,
}

/// Nothing loaded: a zero-length video and an empty selection
impl Default for SelectionModel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SelectionModel {
    /// Model for a freshly loaded video
    pub fn new(duration: f64) -> Self {
        let mut model = Self {
            selection: Selection::new(0.0, 0.0),
            duration: duration.max(0.0),
        };
        model.reset();
        model
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn start(&self) -> f64 {
        self.selection.start
    }

    pub fn end(&self) -> f64 {
        self.selection.end
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// `start = 0, end = min(60, duration)`
    pub fn reset(&mut self) {
        self.selection = Selection::new(0.0, DEFAULT_SELECTION_SECONDS.min(self.duration));
    }

    /// Accept `t` only when `0 <= t < end`
    pub fn set_start(&mut self, t: f64) -> Result<(), DomainError> {
        if t.is_finite() && t >= 0.0 && t < self.selection.end {
            self.selection.start = t;
            Ok(())
        } else {
            Err(DomainError::InvalidSelection(format!(
                "Invalid start time {} (must be before {})",
                format_time(t),
                format_time(self.selection.end)
            )))
        }
    }

    /// Accept `t` only when `start < t <= duration`
    pub fn set_end(&mut self, t: f64) -> Result<(), DomainError> {
        if t.is_finite() && t > self.selection.start && t <= self.duration {
            self.selection.end = t;
            Ok(())
        } else {
            Err(DomainError::InvalidSelection(format!(
                "Invalid end time {} (must be after {} and at most {})",
                format_time(t),
                format_time(self.selection.start),
                format_time(self.duration)
            )))
        }
    }

    /// Start point typed as text; must also lie within the video
    pub fn set_start_text(&mut self, text: &str) -> Result<(), DomainError> {
        let t = parse_time(text);
        if t > self.duration {
            return Err(DomainError::InvalidSelection(format!(
                "Invalid start time {} (video is {})",
                format_time(t),
                format_time(self.duration)
            )));
        }
        self.set_start(t)
    }

    /// End point typed as text
    pub fn set_end_text(&mut self, text: &str) -> Result<(), DomainError> {
        self.set_end(parse_time(text))
    }

    /// Start handle dragged to `t`; out-of-order proposals are ignored
    ///
    /// Returns whether the selection changed.
    pub fn drag_start(&mut self, t: f64) -> bool {
        if t < self.selection.end {
            let start = t.max(0.0);
            let changed = start != self.selection.start;
            self.selection.start = start;
            changed
        } else {
            false
        }
    }

    /// End handle dragged to `t`; out-of-order proposals are ignored
    pub fn drag_end(&mut self, t: f64) -> bool {
        if t > self.selection.start {
            let end = t.min(self.duration);
            let changed = end != self.selection.end;
            self.selection.end = end;
            changed
        } else {
            false
        }
    }

    /// Replace the whole range, e.g. when previewing a committed chunk
    pub fn load(&mut self, selection: Selection) -> Result<(), DomainError> {
        if selection.start >= 0.0 && selection.start < selection.end && selection.end <= self.duration {
            self.selection = selection;
            Ok(())
        } else {
            Err(DomainError::InvalidSelection(format!(
                "Range {} does not fit a {} video",
                selection,
                format_time(self.duration)
            )))
        }
    }

    /// `0 < end - start <= 90`
    pub fn is_valid(&self) -> bool {
        DurationRule::is_valid(self.selection.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_is_capped_by_duration() {
        assert_eq!(SelectionModel::new(125.0).selection(), Selection::new(0.0, 60.0));
        assert_eq!(SelectionModel::new(42.5).selection(), Selection::new(0.0, 42.5));
    }

    #[test]
    fn test_set_end_before_start_is_rejected_unchanged() {
        let mut model = SelectionModel::new(120.0);
        model.set_start(10.0).unwrap();
        model.set_end(20.0).unwrap();
        let before = model.selection();

        let result = model.set_end(5.0);

        assert!(matches!(result, Err(DomainError::InvalidSelection(_))));
        assert_eq!(model.selection().start.to_bits(), before.start.to_bits());
        assert_eq!(model.selection().end.to_bits(), before.end.to_bits());
    }

    #[test]
    fn test_set_start_bounds() {
        let mut model = SelectionModel::new(120.0);
        assert!(model.set_start(-1.0).is_err());
        assert!(model.set_start(60.0).is_err());
        assert!(model.set_start(f64::NAN).is_err());
        assert!(model.set_start(59.5).is_ok());
        assert_eq!(model.start(), 59.5);
    }

    #[test]
    fn test_set_end_cannot_pass_duration() {
        let mut model = SelectionModel::new(100.0);
        assert!(model.set_end(100.5).is_err());
        assert!(model.set_end(100.0).is_ok());
        assert_eq!(model.end(), 100.0);
    }

    #[test]
    fn test_text_inputs() {
        let mut model = SelectionModel::new(300.0);
        model.set_end_text("00:02:00").unwrap();
        model.set_start_text("1:30").unwrap();
        assert_eq!(model.selection(), Selection::new(90.0, 120.0));

        assert!(model.set_start_text("00:10:00").is_err());
        assert!(model.set_end_text("00:01:00").is_err());
        assert_eq!(model.selection(), Selection::new(90.0, 120.0));
    }

    #[test]
    fn test_text_inputs_with_fractional_fields() {
        let mut model = SelectionModel::new(300.0);
        model.set_end_text("00:02:00.75").unwrap();
        model.set_start_text("1:30.5").unwrap();
        assert_eq!(model.selection(), Selection::new(90.0, 120.0));
    }

    #[test]
    fn test_drag_clamps_and_ignores_crossing() {
        let mut model = SelectionModel::new(100.0);
        assert!(model.drag_start(20.0));
        assert!(!model.drag_start(75.0));
        assert_eq!(model.start(), 20.0);

        assert!(model.drag_end(150.0));
        assert_eq!(model.end(), 100.0);
        assert!(!model.drag_end(10.0));
        assert_eq!(model.end(), 100.0);

        assert!(model.drag_start(-4.0));
        assert_eq!(model.start(), 0.0);
    }

    #[test]
    fn test_validity_predicate() {
        let mut model = SelectionModel::new(500.0);
        assert!(model.is_valid());
        model.set_end(200.0).unwrap();
        assert!(!model.is_valid());
        model.set_start(110.0).unwrap();
        assert!(model.is_valid());
    }

    #[test]
    fn test_zero_length_video_selection_is_invalid() {
        let model = SelectionModel::new(0.0);
        assert_eq!(model.selection(), Selection::new(0.0, 0.0));
        assert!(!model.is_valid());
    }

    #[test]
    fn test_load_checks_range() {
        let mut model = SelectionModel::new(100.0);
        assert!(model.load(Selection::new(30.0, 90.0)).is_ok());
        assert!(model.load(Selection::new(30.0, 190.0)).is_err());
        assert_eq!(model.selection(), Selection::new(30.0, 90.0));
    }

    #[test]
    fn test_accepted_mutations_keep_order() {
        let mut model = SelectionModel::new(240.0);
        let proposals = [5.0, 300.0, 0.0, 61.0, 59.0, 240.0, 239.9, -2.0, 120.0];
        for (i, t) in proposals.iter().enumerate() {
            let _ = if i % 2 == 0 { model.set_start(*t) } else { model.set_end(*t) };
            model.drag_start(*t);
            model.drag_end(*t);
            assert!(model.start() < model.end(), "order broken after {}", t);
            assert!(model.start() >= 0.0 && model.end() <= 240.0);
        }
    }
}
