use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use input_logger::{
    CarView, ControllerInput, Host, KeyIndex, SessionView, SharedFlag, WRITE_CONFIG_COMMAND,
};
use tracing::{debug, info, warn};

use super::script::{FrameScript, GameMode, ScriptFrame};
use super::settings::{save_settings, SettingsFile};

/// Host implementation backed by a frame script.
///
/// Key names are interned up front so `KeyIndex` values stay stable for the
/// whole run, the same way the game hands out name indices.
#[derive(Debug)]
pub(crate) struct SimHost {
    bindings: Vec<(String, String)>,
    key_names: Vec<String>,
    frame: ScriptFrame,
    cvars: BTreeMap<String, SharedFlag>,
    persisted: SettingsFile,
    settings_path: Option<PathBuf>,
    hooked_events: BTreeSet<String>,
    console: Vec<String>,
    config_writes: usize,
}

impl SimHost {
    pub(crate) fn new(
        script: &FrameScript,
        persisted: SettingsFile,
        settings_path: Option<PathBuf>,
    ) -> Self {
        Self {
            bindings: script
                .bindings
                .iter()
                .map(|binding| (binding.key.clone(), binding.action.clone()))
                .collect(),
            key_names: script.key_names(),
            frame: ScriptFrame::default(),
            cvars: BTreeMap::new(),
            persisted,
            settings_path,
            hooked_events: BTreeSet::new(),
            console: Vec::new(),
            config_writes: 0,
        }
    }

    pub(crate) fn set_frame(&mut self, frame: &ScriptFrame) {
        self.frame = frame.clone();
    }

    pub(crate) fn is_hooked(&self, event: &str) -> bool {
        self.hooked_events.contains(event)
    }

    pub(crate) fn console(&self) -> &[String] {
        &self.console
    }

    pub(crate) fn config_writes(&self) -> usize {
        self.config_writes
    }

    pub(crate) fn cvar(&self, name: &str) -> Option<bool> {
        self.cvars.get(name).map(SharedFlag::get)
    }

    fn write_config(&mut self) {
        self.config_writes += 1;
        let Some(path) = self.settings_path.as_ref() else {
            debug!("writeconfig without a settings file; values kept in memory");
            return;
        };

        let settings = SettingsFile {
            cvars: self
                .cvars
                .iter()
                .map(|(name, flag)| (name.clone(), flag.get()))
                .collect(),
            ..SettingsFile::default()
        };
        match save_settings(path, &settings) {
            Ok(()) => info!(path = %path.display(), "settings_written"),
            Err(error) => warn!(error = %error, "settings_write_failed"),
        }
    }
}

impl Host for SimHost {
    fn is_in_custom_training(&self) -> bool {
        self.frame.mode == GameMode::CustomTraining
    }

    fn is_in_freeplay(&self) -> bool {
        self.frame.mode == GameMode::Freeplay
    }

    fn current_session(&self) -> Option<SessionView> {
        self.frame.session.then_some(SessionView {
            has_ball: self.frame.ball,
        })
    }

    fn local_car(&self) -> Option<CarView> {
        self.frame.car.then_some(CarView {
            jumped: self.frame.jumped,
        })
    }

    fn vehicle_input(&self) -> ControllerInput {
        self.frame.input
    }

    fn gamepad_bindings(&self) -> Vec<(String, String)> {
        self.bindings.clone()
    }

    fn key_index_by_name(&self, key_name: &str) -> Option<KeyIndex> {
        let index = self.key_names.iter().position(|name| name == key_name)?;
        i32::try_from(index).ok().map(KeyIndex)
    }

    fn is_key_pressed(&self, key: KeyIndex) -> bool {
        usize::try_from(key.0)
            .ok()
            .and_then(|index| self.key_names.get(index))
            .is_some_and(|name| self.frame.held_keys.contains(name))
    }

    fn log(&mut self, line: &str) {
        info!(line, "host_console");
        self.console.push(line.to_string());
    }

    fn register_bool_cvar(&mut self, name: &str, default: bool, description: &str) -> SharedFlag {
        let value = self.persisted.cvars.get(name).copied().unwrap_or(default);
        let flag = SharedFlag::new(value);
        self.cvars.insert(name.to_string(), flag.clone());
        debug!(name, value, description, "cvar_registered");
        flag
    }

    fn hook_event(&mut self, event: &str) {
        debug!(event, "event_hooked");
        self.hooked_events.insert(event.to_string());
    }

    fn execute_command(&mut self, command: &str) {
        match command {
            WRITE_CONFIG_COMMAND => self.write_config(),
            other => warn!(command = other, "unknown_host_command"),
        }
    }
}
