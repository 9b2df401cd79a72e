mod label;
mod reporter;

pub use label::LabelHandle;
pub use reporter::{LastObservedState, Observation, Reporter};
