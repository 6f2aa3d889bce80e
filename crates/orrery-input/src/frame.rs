//! Per-frame input snapshot.

use glam::Vec2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::mouse::MouseState;

/// What the frame loop needs from one frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub quit: bool,
    /// Pointer motion in pixels, +y down.
    pub pointer_delta: Vec2,
    /// Wheel lines, positive = toward the scene.
    pub zoom_delta: f32,
}

/// Collects winit events between polls.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mouse: MouseState,
    quit: bool,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    pub fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.request_quit(),
            WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
                self.on_key(event.physical_key, event.state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => self.mouse.on_scroll(*delta),
            WindowEvent::CursorEntered { .. } => self.mouse.on_cursor_entered(),
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            _ => {}
        }
    }

    pub fn on_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.mouse.on_raw_motion(*dx, *dy);
        }
    }

    /// Escape quits.
    pub fn on_key(&mut self, key: PhysicalKey, state: ElementState) {
        if state == ElementState::Pressed && key == PhysicalKey::Code(KeyCode::Escape) {
            self.request_quit();
        }
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            tracing::info!("Quit requested");
        }
        self.quit = true;
    }

    /// Snapshot this frame's input and clear the transients. `quit` stays
    /// set once requested.
    pub fn poll(&mut self) -> FrameInput {
        let input = FrameInput {
            quit: self.quit,
            pointer_delta: self.mouse.delta(),
            zoom_delta: self.mouse.scroll(),
        };
        self.mouse.clear_transients();
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseScrollDelta;

    #[test]
    fn test_idle_poll_is_empty() {
        let mut input = InputState::new();
        assert_eq!(input.poll(), FrameInput::default());
    }

    #[test]
    fn test_poll_reports_and_clears_motion() {
        let mut input = InputState::new();
        input.mouse_mut().on_cursor_moved(10.0, 10.0);
        input.mouse_mut().on_cursor_moved(14.0, 7.0);
        input.mouse_mut().on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));

        let frame = input.poll();
        assert_eq!(frame.pointer_delta, Vec2::new(4.0, -3.0));
        assert_eq!(frame.zoom_delta, 2.0);
        assert!(!frame.quit);

        let next = input.poll();
        assert_eq!(next.pointer_delta, Vec2::ZERO);
        assert_eq!(next.zoom_delta, 0.0);
    }

    #[test]
    fn test_escape_quits() {
        let mut input = InputState::new();
        input.on_key(PhysicalKey::Code(KeyCode::Escape), ElementState::Released);
        assert!(!input.poll().quit);
        input.on_key(PhysicalKey::Code(KeyCode::KeyA), ElementState::Pressed);
        assert!(!input.poll().quit);
        input.on_key(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed);
        assert!(input.poll().quit);
        assert!(input.poll().quit);
    }

    #[test]
    fn test_close_request_quits() {
        let mut input = InputState::new();
        input.on_window_event(&WindowEvent::CloseRequested);
        assert!(input.poll().quit);
    }

    #[test]
    fn test_raw_motion_when_captured() {
        let mut input = InputState::new();
        input.mouse_mut().set_captured_flag(true);
        input.on_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -1.0) });
        assert_eq!(input.poll().pointer_delta, Vec2::new(3.0, -1.0));
    }
}
