use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use super::loop_runner::RunOptions;

const SETTINGS_ENV_VAR: &str = "INPUT_LOGGER_SETTINGS";
const OVERLAY_PNG_ENV_VAR: &str = "INPUT_LOGGER_OVERLAY_PNG";

/// Parses command-line options, falling back to the environment for paths.
/// `Ok(None)` means help was requested.
pub(crate) fn build_options(args: &[String]) -> Result<Option<RunOptions>, String> {
    let Some(mut options) = parse_args(args)? else {
        return Ok(None);
    };
    if options.settings_path.is_none() {
        options.settings_path = path_from_env(SETTINGS_ENV_VAR);
    }
    if options.overlay_png.is_none() {
        options.overlay_png = path_from_env(OVERLAY_PNG_ENV_VAR);
    }
    Ok(Some(options))
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    info!("=== Input Logger Sim Host ===");
}

fn parse_args(args: &[String]) -> Result<Option<RunOptions>, String> {
    let mut script_path = None::<PathBuf>;
    let mut settings_path = None;
    let mut overlay_png = None;
    let mut toggle_at = None;

    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(None),
            "--settings" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --settings".to_string())?;
                settings_path = Some(PathBuf::from(value));
                index += 2;
            }
            "--overlay-png" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --overlay-png".to_string())?;
                overlay_png = Some(PathBuf::from(value));
                index += 2;
            }
            "--toggle-at" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --toggle-at".to_string())?;
                toggle_at = Some(value.parse::<usize>().map_err(|_| {
                    format!("invalid --toggle-at value '{value}' (expected usize)")
                })?);
                index += 2;
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option '{flag}'")),
            path => {
                if script_path.is_some() {
                    return Err(format!("unexpected extra argument '{path}'"));
                }
                script_path = Some(PathBuf::from(path));
                index += 1;
            }
        }
    }

    let script_path = script_path.ok_or_else(|| "missing frame script path".to_string())?;
    Ok(Some(RunOptions {
        script_path,
        settings_path,
        overlay_png,
        toggle_at,
    }))
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn usage_text() -> String {
    [
        "sim_host - drives the input logger plugin from a frame script",
        "",
        "Usage:",
        "  sim_host [--settings <path>] [--overlay-png <path>] [--toggle-at <frame>] <script.json>",
        "",
        "Environment:",
        "  INPUT_LOGGER_SETTINGS     settings file when --settings is absent",
        "  INPUT_LOGGER_OVERLAY_PNG  overlay image when --overlay-png is absent",
        "  RUST_LOG                  tracing filter (default: info)",
    ]
    .join("\n")
}
