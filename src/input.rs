/// Input handling
/// Turns raw pointer and key events from the windowing layer into orrery
/// actions for the camera rig and the simulation clock

/// Keys the orrery reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Number row 0-9, selects a focus body
    Digit(u8),
    Space,
    Up,
    Down,
    Home,
    R,
    Escape,
}

/// Raw events delivered by the windowing layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The drag button went down or up
    DragButton { pressed: bool },
    /// Cursor position in window pixels
    CursorMoved { x: f64, y: f64 },
    /// Scroll wheel notches, positive away from the user
    Scroll(f64),
    KeyPressed(Key),
}

/// What the application should do in response to input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Cursor moved this many pixels while the drag button was held
    Drag { dx: f64, dy: f64 },
    Zoom(f64),
    Focus(usize),
    TogglePause,
    SpeedUp,
    SlowDown,
    ResetSpeed,
    ResetSimulation,
    Quit,
}

#[derive(Debug, Default)]
pub struct InputHandler {
    drag_held: bool,
    last_cursor: Option<(f64, f64)>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Option<Action> {
        match *event {
            InputEvent::DragButton { pressed } => {
                self.drag_held = pressed;
                None
            }
            InputEvent::CursorMoved { x, y } => self.handle_cursor(x, y),
            InputEvent::Scroll(notches) if notches != 0.0 => Some(Action::Zoom(notches)),
            InputEvent::Scroll(_) => None,
            InputEvent::KeyPressed(key) => Self::handle_key(key),
        }
    }

    fn handle_cursor(&mut self, x: f64, y: f64) -> Option<Action> {
        // Always track the cursor so a drag starts from where it is now
        let previous = self.last_cursor.replace((x, y));
        if !self.drag_held {
            return None;
        }

        let (last_x, last_y) = previous?;
        let (dx, dy) = (x - last_x, y - last_y);
        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(Action::Drag { dx, dy })
        }
    }

    fn handle_key(key: Key) -> Option<Action> {
        match key {
            Key::Digit(d) if d <= 9 => Some(Action::Focus(d as usize)),
            Key::Digit(d) => {
                log::warn!("Ignoring digit key {d}");
                None
            }
            Key::Space => Some(Action::TogglePause),
            Key::Up => Some(Action::SpeedUp),
            Key::Down => Some(Action::SlowDown),
            Key::Home => Some(Action::ResetSpeed),
            Key::R => Some(Action::ResetSimulation),
            Key::Escape => Some(Action::Quit),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_only_while_held() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 10.0, y: 10.0 }),
            None
        );

        input.handle_event(&InputEvent::DragButton { pressed: true });
        assert!(input.is_dragging());
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 14.0, y: 7.0 }),
            Some(Action::Drag { dx: 4.0, dy: -3.0 })
        );
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 14.0, y: 7.0 }),
            None
        );

        input.handle_event(&InputEvent::DragButton { pressed: false });
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 30.0, y: 30.0 }),
            None
        );
    }

    #[test]
    fn test_first_move_after_press_has_no_jump() {
        let mut input = InputHandler::new();
        input.handle_event(&InputEvent::DragButton { pressed: true });
        assert_eq!(
            input.handle_event(&InputEvent::CursorMoved { x: 500.0, y: 500.0 }),
            None
        );
    }

    #[test]
    fn test_key_bindings() {
        let mut input = InputHandler::new();
        let press = |input: &mut InputHandler, key| input.handle_event(&InputEvent::KeyPressed(key));

        assert_eq!(press(&mut input, Key::Digit(3)), Some(Action::Focus(3)));
        assert_eq!(press(&mut input, Key::Digit(12)), None);
        assert_eq!(press(&mut input, Key::Space), Some(Action::TogglePause));
        assert_eq!(press(&mut input, Key::Up), Some(Action::SpeedUp));
        assert_eq!(press(&mut input, Key::Down), Some(Action::SlowDown));
        assert_eq!(press(&mut input, Key::Home), Some(Action::ResetSpeed));
        assert_eq!(press(&mut input, Key::R), Some(Action::ResetSimulation));
        assert_eq!(press(&mut input, Key::Escape), Some(Action::Quit));
    }

    #[test]
    fn test_scroll() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_event(&InputEvent::Scroll(-2.0)),
            Some(Action::Zoom(-2.0))
        );
        assert_eq!(input.handle_event(&InputEvent::Scroll(0.0)), None);
    }
}
