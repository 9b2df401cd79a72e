//! Surface of the host application the plugin is embedded in.
//!
//! The host owns the frame loop, the game state and the console. It hands itself
//! to every plugin callback as `&mut dyn Host`; the plugin never keeps a
//! reference past the callback.

use crate::config::SharedFlag;
use crate::input::ControllerInput;

/// Opaque key identifier produced by the host's name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyIndex(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub has_ball: bool,
}

/// The local car, as far as the plugin cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarView {
    /// Raw jump input of the car; anything above zero counts as pressed.
    pub jumped: u32,
}

pub trait Host {
    fn is_in_custom_training(&self) -> bool;
    fn is_in_freeplay(&self) -> bool;
    fn current_session(&self) -> Option<SessionView>;
    fn local_car(&self) -> Option<CarView>;
    /// Controller input of the local player for the current frame.
    fn vehicle_input(&self) -> ControllerInput;
    /// `(key name, action name)` pairs of the gamepad binding table.
    fn gamepad_bindings(&self) -> Vec<(String, String)>;
    fn key_index_by_name(&self, key_name: &str) -> Option<KeyIndex>;
    fn is_key_pressed(&self, key: KeyIndex) -> bool;

    /// Writes one line to the host console.
    fn log(&mut self, line: &str);
    /// Registers a persisted boolean config variable and returns the flag bound
    /// to it. The host keeps its own handle to the same flag.
    fn register_bool_cvar(&mut self, name: &str, default: bool, description: &str)
        -> SharedFlag;
    fn hook_event(&mut self, event: &str);
    fn execute_command(&mut self, command: &str);
}

/// Text drawing surface handed to the overlay draw hook.
pub trait Canvas {
    fn set_color(&mut self, rgba: [u8; 4]);
    fn set_position(&mut self, x: i32, y: i32);
    fn draw_string(&mut self, text: &str, scale_x: f32, scale_y: f32);
}

/// Immediate-mode widgets available inside the settings tab.
pub trait SettingsUi {
    /// Draws a checkbox bound to `value`; returns true when the user toggled it
    /// this frame, in which case `value` already holds the new state.
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;
}
