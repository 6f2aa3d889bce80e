//! Frame-coherent mouse state tracker.
//!
//! [`MouseState`] accumulates pointer motion and wheel events during a frame.
//! While the cursor is captured, raw device motion is used; otherwise motion
//! is the difference between successive cursor positions.

use glam::Vec2;
use winit::event::MouseScrollDelta;

/// Pixels of trackpad scroll counted as one wheel line.
pub const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    scroll: f32,
    captured: bool,
    cursor_in_window: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. The first position after entering the
    /// window only seeds the tracker.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.captured
            && let Some(prev) = self.position
        {
            self.delta += new_pos - prev;
        }
        self.position = Some(new_pos);
    }

    /// Process a `DeviceEvent::MouseMotion` raw delta (used when captured).
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Process a `MouseWheel` event. Positive is scroll up.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.scroll += (pos.y / PIXELS_PER_LINE) as f32;
            }
        }
    }

    pub fn on_cursor_entered(&mut self) {
        self.cursor_in_window = true;
    }

    /// Forget the last position so re-entry doesn't register as a jump.
    pub fn on_cursor_left(&mut self) {
        self.cursor_in_window = false;
        self.position = None;
    }

    /// Grab and hide the cursor (or release it) and switch motion sources.
    pub fn set_captured(&mut self, window: &winit::window::Window, captured: bool) {
        use winit::window::CursorGrabMode;
        if captured {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            if let Err(e) = grabbed {
                tracing::warn!("Cursor grab unavailable: {e}");
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.set_captured_flag(captured);
    }

    /// Switch motion sources without touching a window.
    pub fn set_captured_flag(&mut self, captured: bool) {
        tracing::debug!(captured, "Cursor capture changed");
        self.captured = captured;
    }

    /// Clears per-frame transients: delta and scroll.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Movement since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel lines since the last clear.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[must_use]
    pub fn is_cursor_in_window(&self) -> bool {
        self.cursor_in_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_first_move_only_seeds_position() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        assert_eq!(ms.position(), Some(Vec2::new(100.0, 200.0)));
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_delta_is_difference_between_moves() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        ms.clear_transients();
        ms.on_cursor_moved(110.0, 195.0);
        assert_eq!(ms.delta(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_deltas_accumulate_within_frame() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(0.0, 0.0);
        ms.on_cursor_moved(3.0, 1.0);
        ms.on_cursor_moved(5.0, 4.0);
        assert_eq!(ms.delta(), Vec2::new(5.0, 4.0));
    }

    #[test]
    fn test_raw_motion_only_counts_when_captured() {
        let mut ms = MouseState::new();
        ms.on_raw_motion(4.0, 2.0);
        assert_eq!(ms.delta(), Vec2::ZERO);

        ms.set_captured_flag(true);
        ms.on_raw_motion(4.0, 2.0);
        ms.on_cursor_moved(500.0, 500.0);
        ms.on_cursor_moved(600.0, 600.0);
        assert_eq!(ms.delta(), Vec2::new(4.0, 2.0));
        assert!(ms.is_captured());
    }

    #[test]
    fn test_scroll_accumulates_within_frame() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 0.5));
        assert!((ms.scroll() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pixel_scroll_is_normalized() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)));
        assert!((ms.scroll() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_clear_resets_transients() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(0.0, 0.0);
        ms.on_cursor_moved(5.0, 5.0);
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.clear_transients();
        assert_eq!(ms.delta(), Vec2::ZERO);
        assert_eq!(ms.scroll(), 0.0);
        assert_eq!(ms.position(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_reentry_does_not_jump() {
        let mut ms = MouseState::new();
        ms.on_cursor_entered();
        ms.on_cursor_moved(10.0, 10.0);
        ms.on_cursor_left();
        assert!(!ms.is_cursor_in_window());
        ms.on_cursor_entered();
        ms.on_cursor_moved(400.0, 300.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
        assert!(ms.is_cursor_in_window());
    }
}
