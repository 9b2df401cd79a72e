mod classifier;

use serde::{Deserialize, Serialize};

use crate::host::{Host, KeyIndex};

pub use classifier::{active_labels, classify, format_one_decimal, InputLabel, LABEL_SEPARATOR};

/// Controller input structure as the host reports it for the local player.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerInput {
    pub throttle: f32,
    pub steer: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub dodge_forward: f32,
    pub dodge_strafe: f32,
    pub handbrake: f32,
    pub jump: f32,
    pub activate_boost: f32,
}

/// Per-tick control state the classifier and the change detector work on.
///
/// `pitch` follows the game's convention: positive pitches the nose down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSnapshot {
    pub throttle: f32,
    pub steer: f32,
    pub pitch: f32,
    pub roll: f32,
    /// `1.0` forward dodge, `-1.0` backward dodge, anything else none.
    pub dodge_forward: f32,
    pub dodge_strafe: f32,
    pub activate_boost: f32,
    pub handbrake: f32,
    pub yaw: f32,
    /// Taken from the car's raw input, not from [`ControllerInput::jump`].
    pub jump_pressed: bool,
}

impl ControlSnapshot {
    pub fn from_controller(input: &ControllerInput, jump_pressed: bool) -> Self {
        Self {
            throttle: input.throttle,
            steer: input.steer,
            pitch: input.pitch,
            roll: input.roll,
            dodge_forward: input.dodge_forward,
            dodge_strafe: input.dodge_strafe,
            activate_boost: input.activate_boost,
            handbrake: input.handbrake,
            yaw: input.yaw,
            jump_pressed,
        }
    }
}

/// A snapshot plus the directional air roll key state sampled with it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    pub snapshot: ControlSnapshot,
    pub directional_air_roll: bool,
}

/// Reads the current frame's inputs. Callers gate on the local car existing;
/// without one the jump flag reads as released.
pub fn sample_inputs(host: &dyn Host, air_roll_key: Option<KeyIndex>) -> InputSample {
    let jump_pressed = host.local_car().is_some_and(|car| car.jumped > 0);
    let directional_air_roll = air_roll_key.is_some_and(|key| host.is_key_pressed(key));

    InputSample {
        snapshot: ControlSnapshot::from_controller(&host.vehicle_input(), jump_pressed),
        directional_air_roll,
    }
}
