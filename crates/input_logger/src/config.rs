use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::host::KeyIndex;

/// Boolean shared between the plugin and the host's config-variable table.
#[derive(Debug, Clone)]
pub struct SharedFlag {
    value: Arc<AtomicBool>,
}

impl SharedFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: Arc::new(AtomicBool::new(value)),
        }
    }

    pub fn get(&self) -> bool {
        self.value.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub enabled: SharedFlag,
    /// Key bound to the directional air roll action, resolved once at load.
    pub air_roll_key: Option<KeyIndex>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: SharedFlag::new(true),
            air_roll_key: None,
        }
    }
}

impl PluginConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}
