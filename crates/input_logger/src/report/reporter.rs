use crate::input::{classify, InputSample};

use super::LabelHandle;

/// What the reporter remembers between ticks.
#[derive(Debug, Clone, Default)]
pub struct LastObservedState {
    /// `None` until the first sample arrives.
    pub sample: Option<InputSample>,
    /// Last label written to the log. Never holds an empty label once a
    /// non-empty one was emitted.
    pub emitted_label: String,
}

/// Result of feeding one sample to the [`Reporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Every sampled field matched the stored sample.
    Unchanged,
    /// The sample was stored; `emitted` is the label to log, if any.
    Changed { emitted: Option<String> },
}

impl Observation {
    pub fn into_emitted(self) -> Option<String> {
        match self {
            Observation::Unchanged => None,
            Observation::Changed { emitted } => emitted,
        }
    }
}

/// Decides which ticks produce a log line.
///
/// Two gates run in sequence: the raw sample must differ from the stored one
/// (dodge strafe and yaw count here even though they never show up in a
/// label), then the freshly classified label must differ from the last
/// emitted label and be non-empty.
#[derive(Debug, Default)]
pub struct Reporter {
    state: LastObservedState,
    published: LabelHandle,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LastObservedState {
        &self.state
    }

    /// Handle for draw callbacks; it always shows the last emitted label.
    pub fn label_handle(&self) -> LabelHandle {
        self.published.clone()
    }

    /// Runs both gates for one tick.
    pub fn observe(&mut self, sample: InputSample) -> Observation {
        if !self.record_if_changed(sample) {
            return Observation::Unchanged;
        }

        let label = classify(&sample);
        Observation::Changed {
            emitted: self.emit_if_new(label),
        }
    }

    /// Exact comparison on every sampled field against the most recently
    /// stored sample. Stores `sample` and returns true on the first call or
    /// when anything differs; an identical sample leaves the state untouched.
    pub fn record_if_changed(&mut self, sample: InputSample) -> bool {
        if self.state.sample.as_ref() == Some(&sample) {
            return false;
        }

        self.state.sample = Some(sample);
        true
    }

    fn emit_if_new(&mut self, label: String) -> Option<String> {
        if label.is_empty() || label == self.state.emitted_label {
            return None;
        }

        self.published.publish(&label);
        self.state.emitted_label = label.clone();
        Some(label)
    }
}
