use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};
use crate::grid::Preset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    LoadPreset(Preset),
    Clear,
    Save,
    Restore,
    Quit,
}

pub struct InputMapper;

impl InputMapper {
    pub fn new() -> Self {
        Self
    }

    /// Maps a key press to an editor action. Releases map to `None`.
    pub fn map_keyboard_input(&self, input: &KeyboardInput) -> InputAction {
        match (input.state, input.virtual_keycode) {
            (ElementState::Pressed, Some(key_code)) => self.map_key_code(key_code),
            _ => InputAction::None,
        }
    }

    pub fn map_key_code(&self, key_code: VirtualKeyCode) -> InputAction {
        match key_code {
            VirtualKeyCode::H => InputAction::LoadPreset(Preset::Heart),
            VirtualKeyCode::X => InputAction::LoadPreset(Preset::Cross),
            VirtualKeyCode::C | VirtualKeyCode::Delete | VirtualKeyCode::Back => InputAction::Clear,
            VirtualKeyCode::S => InputAction::Save,
            VirtualKeyCode::R => InputAction::Restore,
            VirtualKeyCode::Escape => InputAction::Quit,
            _ => InputAction::None,
        }
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}
