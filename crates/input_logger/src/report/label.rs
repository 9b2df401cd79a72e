use std::sync::{Arc, RwLock};

use crate::sync::{read_or_recover, replace_or_recover};

const LOCK_NAME: &str = "label";

/// Last emitted label, shared with draw callbacks. Publishing swaps the
/// pointer, so readers see either the old or the new string, never a mix.
#[derive(Clone, Debug)]
pub struct LabelHandle {
    current: Arc<RwLock<Arc<str>>>,
}

impl Default for LabelHandle {
    fn default() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::from(""))),
        }
    }
}

impl LabelHandle {
    pub fn current(&self) -> Arc<str> {
        read_or_recover(&self.current, LOCK_NAME)
    }

    pub(crate) fn publish(&self, label: &str) {
        replace_or_recover(&self.current, LOCK_NAME, Arc::from(label));
    }
}
