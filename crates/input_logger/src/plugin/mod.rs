mod gate;

use tracing::{debug, info, warn};

use crate::config::PluginConfig;
use crate::host::{Canvas, Host, KeyIndex, SettingsUi};
use crate::input::sample_inputs;
use crate::overlay::draw_label_overlay;
use crate::report::{LabelHandle, Observation, Reporter};

pub use gate::{check_eligibility, Ineligible, MissingEntity};

pub const PLUGIN_NAME: &str = "Rocket League Input Logger";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TICK_EVENT: &str = "Function Engine.GameViewportClient.Tick";
pub const ENABLED_CVAR: &str = "enabled";
pub const AIR_ROLL_ACTION: &str = "ToggleRoll";
pub const WRITE_CONFIG_COMMAND: &str = "writeconfig";
/// Prefix of every console line the plugin writes.
pub const LOG_SOURCE: &str = "[InputLogger]";

const ENABLED_CVAR_DESCRIPTION: &str = "Enable the plugin";
const ENABLED_CHECKBOX_LABEL: &str = "Enabled";

/// Callbacks a host delivers to a loaded plugin. All of them run on the host's
/// frame thread, one at a time.
pub trait Plugin {
    fn on_load(&mut self, host: &mut dyn Host);

    fn on_unload(&mut self, _host: &mut dyn Host) {}

    /// Called for every event the plugin hooked during load.
    fn on_event(&mut self, event: &str, host: &mut dyn Host);

    fn render_canvas(&self, host: &mut dyn Host, canvas: &mut dyn Canvas);

    fn render_settings(&mut self, host: &mut dyn Host, ui: &mut dyn SettingsUi);
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Skipped(Ineligible),
    Unchanged,
    Changed { emitted: Option<String> },
}

#[derive(Debug, Default)]
pub struct InputLogger {
    config: PluginConfig,
    reporter: Reporter,
}

impl InputLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn label_handle(&self) -> LabelHandle {
        self.reporter.label_handle()
    }

    /// One pass of the tick hook: gate, sample, then hand the sample to the
    /// reporter. Console lines go out through `host`.
    pub fn tick(&mut self, host: &mut dyn Host) -> TickOutcome {
        if let Err(reason) = self.eligibility(host) {
            return TickOutcome::Skipped(reason);
        }

        let sample = sample_inputs(&*host, self.config.air_roll_key);
        match self.reporter.observe(sample) {
            Observation::Unchanged => TickOutcome::Unchanged,
            Observation::Changed { emitted } => {
                if let Some(label) = emitted.as_deref() {
                    debug!(label, "input_change_logged");
                    host.log(&format!("{LOG_SOURCE} lastInputs == {label}"));
                }
                TickOutcome::Changed { emitted }
            }
        }
    }

    fn eligibility(&self, host: &mut dyn Host) -> Result<(), Ineligible> {
        let result = check_eligibility(self.config.is_enabled(), &*host);
        if let Err(Ineligible::Missing(entity)) = result {
            host.log(&format!("{LOG_SOURCE} {entity}"));
        }
        result
    }
}

impl Plugin for InputLogger {
    fn on_load(&mut self, host: &mut dyn Host) {
        let enabled = host.register_bool_cvar(ENABLED_CVAR, true, ENABLED_CVAR_DESCRIPTION);
        self.config = PluginConfig {
            enabled,
            air_roll_key: resolve_air_roll_key(&*host),
        };
        host.hook_event(TICK_EVENT);

        info!(
            plugin = PLUGIN_NAME,
            version = PLUGIN_VERSION,
            enabled = self.config.is_enabled(),
            air_roll_key = ?self.config.air_roll_key,
            "plugin_loaded"
        );
    }

    fn on_event(&mut self, event: &str, host: &mut dyn Host) {
        if event == TICK_EVENT {
            self.tick(host);
        }
    }

    fn render_canvas(&self, host: &mut dyn Host, canvas: &mut dyn Canvas) {
        if self.eligibility(host).is_err() {
            return;
        }

        draw_label_overlay(canvas, &self.reporter.label_handle().current());
    }

    fn render_settings(&mut self, host: &mut dyn Host, ui: &mut dyn SettingsUi) {
        let mut enabled = self.config.is_enabled();
        if ui.checkbox(ENABLED_CHECKBOX_LABEL, &mut enabled) {
            self.config.enabled.set(enabled);
            host.execute_command(WRITE_CONFIG_COMMAND);
            info!(enabled, "settings_toggled");
        }
    }
}

/// Finds the key bound to the directional air roll action. When several keys
/// are bound, the last one in the binding table wins.
pub fn resolve_air_roll_key(host: &dyn Host) -> Option<KeyIndex> {
    let bound_key = host
        .gamepad_bindings()
        .into_iter()
        .filter(|(_, action)| action == AIR_ROLL_ACTION)
        .map(|(key_name, _)| key_name)
        .last();

    let Some(key_name) = bound_key else {
        warn!(action = AIR_ROLL_ACTION, "air_roll_binding_missing");
        return None;
    };

    let key = host.key_index_by_name(&key_name);
    if key.is_none() {
        warn!(key_name = key_name.as_str(), "air_roll_key_unknown");
    }
    key
}
