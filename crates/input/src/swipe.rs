//! Swipe gestures: classify a drag vector into a move direction.
//!
//! Terminals report mouse positions in character cells, so the tracker
//! scales cells to device-independent pixels before applying the same
//! minimum-distance rule a touch screen would.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Direction, MIN_SWIPE_DISTANCE};

/// Approximate pixel width of one terminal column.
pub const CELL_PX_W: f32 = 8.0;

/// Approximate pixel height of one terminal row.
pub const CELL_PX_H: f32 = 16.0;

/// Classify a swipe vector (`dx` right-positive, `dy` down-positive).
///
/// Returns `None` when both components are shorter than `min_distance`.
/// The dominant axis wins; an exact tie goes to the vertical axis.
pub fn swipe_direction(dx: f32, dy: f32, min_distance: f32) -> Option<Direction> {
    if dx.abs() < min_distance && dy.abs() < min_distance {
        return None;
    }

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if dy > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// Tracks a left-button drag and turns it into a swipe on release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
    min_distance: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_min_distance(MIN_SWIPE_DISTANCE)
    }

    pub fn with_min_distance(min_distance: f32) -> Self {
        Self {
            start: None,
            min_distance,
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// True while a drag is in progress.
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Feed a mouse event; returns a direction when a drag completes.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.start.take()?;
                let dx = (event.column as f32 - x0 as f32) * CELL_PX_W;
                let dy = (event.row as f32 - y0 as f32) * CELL_PX_H;
                swipe_direction(dx, dy, self.min_distance)
            }
            _ => None,
        }
    }

    /// Forget any drag in progress.
    pub fn reset(&mut self) {
        self.start = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        assert_eq!(swipe_direction(29.0, -29.0, 30.0), None);
        assert_eq!(swipe_direction(0.0, 0.0, 30.0), None);
    }

    #[test]
    fn test_dominant_axis_wins() {
        assert_eq!(swipe_direction(40.0, 10.0, 30.0), Some(Direction::Right));
        assert_eq!(swipe_direction(-40.0, 35.0, 30.0), Some(Direction::Left));
        assert_eq!(swipe_direction(5.0, 31.0, 30.0), Some(Direction::Down));
        assert_eq!(swipe_direction(-20.0, -60.0, 30.0), Some(Direction::Up));
    }

    #[test]
    fn test_tie_goes_vertical() {
        assert_eq!(swipe_direction(50.0, 50.0, 30.0), Some(Direction::Down));
        assert_eq!(swipe_direction(50.0, -50.0, 30.0), Some(Direction::Up));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(swipe_direction(30.0, 0.0, 30.0), Some(Direction::Right));
    }

    #[test]
    fn test_tracker_drag_right() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(
            tracker.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            None
        );
        assert!(tracker.is_tracking());

        // 4 columns * 8px = 32px
        let dir = tracker.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 14, 5));
        assert_eq!(dir, Some(Direction::Right));
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_tracker_small_drag_ignored() {
        let mut tracker = SwipeTracker::new();
        tracker.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        // 1 row * 16px = 16px < 30px
        let dir = tracker.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 4));
        assert_eq!(dir, None);
    }

    #[test]
    fn test_tracker_release_without_press() {
        let mut tracker = SwipeTracker::new();
        let dir = tracker.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 40, 20));
        assert_eq!(dir, None);
    }
}
