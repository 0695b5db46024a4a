use std::collections::VecDeque;
use winit::event::MouseButton;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Other(code) => PointerButton::Other(code),
        }
    }
}

/// Pointer event in surface-local pixels, recorded by window callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter { x: i32, y: i32 },
    Leave,
    Move { x: i32, y: i32 },
    Press { x: i32, y: i32, button: PointerButton },
    Release { x: i32, y: i32 },
}

/// Pointer state as seen by one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub x: i32,
    pub y: i32,
    pub over: bool,
    pub out: bool,
    pub moving: bool,
    pub down: bool,
    pub button: Option<PointerButton>,
}

impl InputState {
    /// Button currently held, if any.
    pub fn pressed(&self) -> Option<PointerButton> {
        if self.down {
            self.button
        } else {
            None
        }
    }

    fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter { x, y } => {
                self.over = true;
                self.out = false;
                self.x = x;
                self.y = y;
            }
            PointerEvent::Leave => {
                *self = InputState {
                    out: true,
                    ..InputState::default()
                };
            }
            PointerEvent::Move { x, y } => {
                self.moving = true;
                self.x = x;
                self.y = y;
            }
            PointerEvent::Press { x, y, button } => {
                self.down = true;
                self.button = Some(button);
                self.x = x;
                self.y = y;
            }
            PointerEvent::Release { x, y } => {
                self.down = false;
                self.button = None;
                self.x = x;
                self.y = y;
            }
        }
    }
}

/// Queues pointer events between simulation steps and folds them into
/// an [`InputState`] once per step.
#[derive(Debug, Default)]
pub struct InputTracker {
    queue: VecDeque<PointerEvent>,
    state: InputState,
    previous: InputState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PointerEvent) {
        self.queue.push_back(event);
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Applies every queued event in arrival order and returns the result.
    pub fn drain(&mut self) -> &InputState {
        while let Some(event) = self.queue.pop_front() {
            self.state.apply(event);
        }
        self.log_transitions();
        &self.state
    }

    fn log_transitions(&mut self) {
        let (prev, cur) = (self.previous, self.state);
        if prev.over != cur.over {
            log::debug!("Pointer over changed: {}", cur.over);
        }
        if prev.out != cur.out {
            log::debug!("Pointer out changed: {}", cur.out);
        }
        if prev.moving != cur.moving {
            log::debug!("Pointer move changed: {}", cur.moving);
        }
        if prev.down != cur.down {
            log::debug!("Pointer down changed: {}", cur.down);
        }
        if prev.button != cur.button {
            log::debug!("Pointer button changed: {:?}", cur.button);
        }
        self.previous = cur;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_folds_events_in_order() {
        let mut tracker = InputTracker::new();
        tracker.push(PointerEvent::Enter { x: 3, y: 4 });
        tracker.push(PointerEvent::Move { x: 30, y: 40 });
        tracker.push(PointerEvent::Press { x: 31, y: 41, button: PointerButton::Primary });
        assert_eq!(tracker.pending(), 3);

        let state = *tracker.drain();
        assert_eq!((state.x, state.y), (31, 41));
        assert!(state.over && state.moving && state.down);
        assert_eq!(state.pressed(), Some(PointerButton::Primary));
        assert_eq!(tracker.pending(), 0);
    }

    #[test]
    fn state_is_unchanged_without_new_events() {
        let mut tracker = InputTracker::new();
        tracker.push(PointerEvent::Move { x: 5, y: 5 });
        let first = *tracker.drain();
        let second = *tracker.drain();
        assert_eq!(first, second);
    }

    #[test]
    fn leave_resets_position_and_flags() {
        let mut tracker = InputTracker::new();
        tracker.push(PointerEvent::Move { x: 50, y: 60 });
        tracker.push(PointerEvent::Press { x: 50, y: 60, button: PointerButton::Secondary });
        tracker.push(PointerEvent::Leave);
        let state = *tracker.drain();
        assert_eq!((state.x, state.y), (0, 0));
        assert!(!state.down && !state.over && !state.moving);
        assert!(state.out);
        assert_eq!(state.pressed(), None);
    }

    #[test]
    fn release_clears_button() {
        let mut tracker = InputTracker::new();
        tracker.push(PointerEvent::Press { x: 1, y: 1, button: PointerButton::Primary });
        tracker.push(PointerEvent::Release { x: 2, y: 2 });
        let state = *tracker.drain();
        assert!(!state.down);
        assert_eq!(state.button, None);
        assert_eq!((state.x, state.y), (2, 2));
    }

    #[test]
    fn winit_buttons_map_to_pointer_buttons() {
        assert_eq!(PointerButton::from(MouseButton::Left), PointerButton::Primary);
        assert_eq!(PointerButton::from(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(PointerButton::from(MouseButton::Other(7)), PointerButton::Other(7));
    }
}
