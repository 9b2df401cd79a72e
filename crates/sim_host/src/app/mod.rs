mod bootstrap;
mod export;
mod host;
mod loop_runner;
mod script;
mod settings;

pub(crate) use bootstrap::{build_options, init_tracing, usage_text};
pub(crate) use loop_runner::run;
