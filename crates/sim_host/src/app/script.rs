use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use input_logger::ControllerInput;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ScriptError {
    #[error("failed to read frame script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid frame script at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame script contains no frames")]
    NoFrames,
    #[error("frame {index} has repeat 0; use at least 1")]
    ZeroRepeat { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum GameMode {
    #[default]
    Freeplay,
    CustomTraining,
    Online,
    MainMenu,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Binding {
    pub(crate) key: String,
    pub(crate) action: String,
}

/// Game state the simulated host reports for one or more consecutive frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ScriptFrame {
    pub(crate) mode: GameMode,
    pub(crate) session: bool,
    pub(crate) ball: bool,
    pub(crate) car: bool,
    pub(crate) input: ControllerInput,
    pub(crate) jumped: u32,
    pub(crate) held_keys: Vec<String>,
    pub(crate) repeat: u32,
}

impl Default for ScriptFrame {
    fn default() -> Self {
        Self {
            mode: GameMode::Freeplay,
            session: true,
            ball: true,
            car: true,
            input: ControllerInput::default(),
            jumped: 0,
            held_keys: Vec::new(),
            repeat: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FrameScript {
    #[serde(default)]
    pub(crate) bindings: Vec<Binding>,
    pub(crate) frames: Vec<ScriptFrame>,
}

impl FrameScript {
    /// Frames in playback order with `repeat` applied.
    pub(crate) fn expanded_frames(&self) -> impl Iterator<Item = &ScriptFrame> + '_ {
        self.frames
            .iter()
            .flat_map(|frame| std::iter::repeat(frame).take(frame.repeat as usize))
    }

    pub(crate) fn frame_count(&self) -> usize {
        self.frames.iter().map(|frame| frame.repeat as usize).sum()
    }

    /// Every key name the script mentions, bindings first.
    pub(crate) fn key_names(&self) -> Vec<String> {
        let mut names = Vec::<String>::new();
        let mentioned = self
            .bindings
            .iter()
            .map(|binding| &binding.key)
            .chain(self.frames.iter().flat_map(|frame| frame.held_keys.iter()));
        for name in mentioned {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    fn validate(self) -> Result<Self, ScriptError> {
        if self.frames.is_empty() {
            return Err(ScriptError::NoFrames);
        }
        if let Some(index) = self.frames.iter().position(|frame| frame.repeat == 0) {
            return Err(ScriptError::ZeroRepeat { index });
        }
        Ok(self)
    }
}

pub(crate) fn load_script(path: &Path) -> Result<FrameScript, ScriptError> {
    let raw = fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&raw)
}

pub(crate) fn parse_script(raw: &str) -> Result<FrameScript, ScriptError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let script = serde_path_to_error::deserialize::<_, FrameScript>(&mut deserializer).map_err(
        |error| {
            let mut location = error.path().to_string();
            if location.is_empty() {
                location = ".".to_string();
            }
            ScriptError::Parse {
                location,
                source: error.into_inner(),
            }
        },
    )?;
    script.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_fields_default_to_eligible_freeplay() {
        let script = parse_script(r#"{ "frames": [ {} ] }"#).expect("script");
        assert_eq!(script.frames, vec![ScriptFrame::default()]);
        assert!(script.bindings.is_empty());
    }

    #[test]
    fn repeat_expands_frames_in_order() {
        let script = parse_script(
            r#"{
                "frames": [
                    { "input": { "throttle": 1.0 }, "repeat": 3 },
                    { "mode": "custom_training", "jumped": 1 }
                ]
            }"#,
        )
        .expect("script");

        let throttles = script
            .expanded_frames()
            .map(|frame| frame.input.throttle)
            .collect::<Vec<_>>();
        assert_eq!(throttles, vec![1.0, 1.0, 1.0, 0.0]);
        assert_eq!(script.frame_count(), 4);
        assert_eq!(script.frames[1].mode, GameMode::CustomTraining);
    }

    #[test]
    fn key_names_are_unique_and_bindings_come_first() {
        let script = parse_script(
            r#"{
                "bindings": [ { "key": "XboxTypeS_LeftShoulder", "action": "ToggleRoll" } ],
                "frames": [
                    { "held_keys": ["XboxTypeS_A", "XboxTypeS_LeftShoulder"] },
                    { "held_keys": ["XboxTypeS_A"] }
                ]
            }"#,
        )
        .expect("script");
        assert_eq!(
            script.key_names(),
            vec!["XboxTypeS_LeftShoulder".to_string(), "XboxTypeS_A".to_string()]
        );
    }

    #[test]
    fn parse_error_reports_json_path() {
        let error = parse_script(r#"{ "frames": [ {}, { "input": { "pitch": "up" } } ] }"#)
            .expect_err("type error");
        match error {
            ScriptError::Parse { location, .. } => assert_eq!(location, "frames[1].input.pitch"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_frame_field_is_rejected() {
        let error = parse_script(r#"{ "frames": [ { "throttle": 1.0 } ] }"#).expect_err("field");
        assert!(matches!(error, ScriptError::Parse { .. }));
    }

    #[test]
    fn empty_script_is_rejected() {
        let error = parse_script(r#"{ "frames": [] }"#).expect_err("empty");
        assert!(matches!(error, ScriptError::NoFrames));
    }

    #[test]
    fn zero_repeat_is_rejected() {
        let error = parse_script(r#"{ "frames": [ {}, { "repeat": 0 } ] }"#).expect_err("repeat");
        assert!(matches!(error, ScriptError::ZeroRepeat { index: 1 }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = load_script(Path::new("definitely/not/a/script.json")).expect_err("missing");
        assert!(matches!(error, ScriptError::Read { .. }));
    }
}
