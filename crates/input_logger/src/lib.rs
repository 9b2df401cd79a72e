//! Input logger overlay plugin.
//!
//! Samples the local player's controls on every host tick, turns changed input
//! combinations into a label string such as `"DriveForward, Boost, "`, logs each
//! new non-empty label once and draws the current one on screen. The host
//! application is reached only through the [`Host`], [`Canvas`] and
//! [`SettingsUi`] traits.

pub mod config;
pub mod host;
pub mod input;
pub mod overlay;
pub mod plugin;
pub mod report;
mod sync;

pub use config::{PluginConfig, SharedFlag};
pub use host::{Canvas, CarView, Host, KeyIndex, SessionView, SettingsUi};
pub use input::{
    classify, format_one_decimal, sample_inputs, ControlSnapshot, ControllerInput, InputLabel,
    InputSample,
};
pub use overlay::{
    draw_label_overlay, FrameCanvas, OVERLAY_COLOR, OVERLAY_POSITION, OVERLAY_SCALE,
};
pub use plugin::{
    check_eligibility, resolve_air_roll_key, Ineligible, InputLogger, MissingEntity, Plugin,
    TickOutcome, AIR_ROLL_ACTION, ENABLED_CVAR, LOG_SOURCE, PLUGIN_NAME, PLUGIN_VERSION,
    TICK_EVENT, WRITE_CONFIG_COMMAND,
};
pub use report::{LabelHandle, LastObservedState, Observation, Reporter};
