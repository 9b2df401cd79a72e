use std::path::PathBuf;
use std::process::ExitCode;

use input_logger::{FrameCanvas, InputLogger, Plugin, SettingsUi, ENABLED_CVAR, TICK_EVENT};
use thiserror::Error;
use tracing::{debug, error, info};

use super::export::{export_overlay_png, OverlayExportError};
use super::host::SimHost;
use super::script::{load_script, FrameScript, ScriptError};
use super::settings::{load_settings, SettingsError, SettingsFile};

const CANVAS_WIDTH: u32 = 1280;
const CANVAS_HEIGHT: u32 = 720;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunOptions {
    pub(crate) script_path: PathBuf,
    pub(crate) settings_path: Option<PathBuf>,
    pub(crate) overlay_png: Option<PathBuf>,
    /// Frame index at which the settings checkbox gets clicked.
    pub(crate) toggle_at: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunReport {
    pub(crate) frames_run: usize,
    pub(crate) ticks_dispatched: usize,
    pub(crate) console_lines: Vec<String>,
    pub(crate) config_writes: usize,
    pub(crate) enabled_at_exit: bool,
}

#[derive(Debug, Error)]
pub(crate) enum HarnessError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Export(#[from] OverlayExportError),
}

pub(crate) fn run(options: RunOptions) -> ExitCode {
    match run_session(&options) {
        Ok(report) => {
            info!(
                script = %options.script_path.display(),
                frames = report.frames_run,
                ticks = report.ticks_dispatched,
                lines = report.console_lines.len(),
                config_writes = report.config_writes,
                enabled = report.enabled_at_exit,
                "sim_finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "sim_failed");
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn run_session(options: &RunOptions) -> Result<RunReport, HarnessError> {
    let script = load_script(&options.script_path)?;
    let persisted = match options.settings_path.as_deref() {
        Some(path) => load_settings(path)?,
        None => SettingsFile::default(),
    };
    info!(
        frames = script.frame_count(),
        bindings = script.bindings.len(),
        "script_loaded"
    );

    let mut host = SimHost::new(&script, persisted, options.settings_path.clone());
    let mut canvas = FrameCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let mut plugin = InputLogger::new();
    let report = drive(&mut plugin, &mut host, &script, options.toggle_at, &mut canvas);

    if let Some(path) = options.overlay_png.as_deref() {
        export_overlay_png(&canvas, path)?;
        info!(path = %path.display(), "overlay_exported");
    }
    Ok(report)
}

/// Plays every scripted frame through the plugin. The canvas holds the last
/// frame's overlay afterwards.
pub(crate) fn drive(
    plugin: &mut dyn Plugin,
    host: &mut SimHost,
    script: &FrameScript,
    toggle_at: Option<usize>,
    canvas: &mut FrameCanvas,
) -> RunReport {
    plugin.on_load(host);

    let mut frames_run = 0usize;
    let mut ticks_dispatched = 0usize;
    for (index, frame) in script.expanded_frames().enumerate() {
        host.set_frame(frame);

        if toggle_at == Some(index) {
            debug!(frame = index, "settings_click");
            plugin.render_settings(host, &mut ScriptedClick::pending());
        }
        if host.is_hooked(TICK_EVENT) {
            plugin.on_event(TICK_EVENT, host);
            ticks_dispatched += 1;
        }

        canvas.clear();
        plugin.render_canvas(host, canvas);
        frames_run += 1;
    }

    plugin.on_unload(host);

    RunReport {
        frames_run,
        ticks_dispatched,
        console_lines: host.console().to_vec(),
        config_writes: host.config_writes(),
        enabled_at_exit: host.cvar(ENABLED_CVAR).unwrap_or(false),
    }
}

/// Settings panel stand-in that flips the first checkbox it is shown.
struct ScriptedClick {
    pending: bool,
}

impl ScriptedClick {
    fn pending() -> Self {
        Self { pending: true }
    }
}

impl SettingsUi for ScriptedClick {
    fn checkbox(&mut self, _label: &str, value: &mut bool) -> bool {
        if !std::mem::take(&mut self.pending) {
            return false;
        }
        *value = !*value;
        true
    }
}
