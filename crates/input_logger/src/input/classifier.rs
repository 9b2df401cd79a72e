use std::fmt;

use super::InputSample;

/// Appended after every label, including the last one. Consumers of the log
/// text rely on the trailing separator.
pub const LABEL_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputLabel {
    DriveForward,
    DriveBackward,
    DodgingForward,
    DodgingBackward,
    Boost,
    AnalogueDown(f32),
    AnalogueUp(f32),
    RollRight(f32),
    RollLeft(f32),
    AnalogueRight(f32),
    AnalogueLeft(f32),
    Handbrake,
    DirectionalAirRoll,
    Jump,
}

impl InputLabel {
    pub fn name(self) -> &'static str {
        match self {
            InputLabel::DriveForward => "DriveForward",
            InputLabel::DriveBackward => "DriveBackward",
            InputLabel::DodgingForward => "DodgingForward",
            InputLabel::DodgingBackward => "DodgingBackward",
            InputLabel::Boost => "Boost",
            InputLabel::AnalogueDown(_) => "AnalogueDown",
            InputLabel::AnalogueUp(_) => "AnalogueUp",
            InputLabel::RollRight(_) => "RollRight",
            InputLabel::RollLeft(_) => "RollLeft",
            InputLabel::AnalogueRight(_) => "AnalogueRight",
            InputLabel::AnalogueLeft(_) => "AnalogueLeft",
            InputLabel::Handbrake => "Handbrake",
            InputLabel::DirectionalAirRoll => "DirectionalAirRoll",
            InputLabel::Jump => "Jump",
        }
    }

    fn value(self) -> Option<f32> {
        match self {
            InputLabel::AnalogueDown(value)
            | InputLabel::AnalogueUp(value)
            | InputLabel::RollRight(value)
            | InputLabel::RollLeft(value)
            | InputLabel::AnalogueRight(value)
            | InputLabel::AnalogueLeft(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for InputLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} ({})", self.name(), format_one_decimal(value)),
            None => f.write_str(self.name()),
        }
    }
}

/// Fixed-point, one decimal. The exact binary value of the float is rounded to
/// the nearest tenth with exact ties going to the even digit, and a negative
/// input keeps its sign when it rounds to zero.
pub fn format_one_decimal(value: f32) -> String {
    format!("{value:.1}")
}

/// Labels active for `sample`, in log order.
pub fn active_labels(sample: &InputSample) -> Vec<InputLabel> {
    let input = &sample.snapshot;
    let mut labels = Vec::new();

    if input.throttle > 0.0 {
        labels.push(InputLabel::DriveForward);
    }
    if input.throttle < 0.0 {
        labels.push(InputLabel::DriveBackward);
    }
    if input.dodge_forward == 1.0 {
        labels.push(InputLabel::DodgingForward);
    }
    if input.dodge_forward == -1.0 {
        labels.push(InputLabel::DodgingBackward);
    }
    if input.activate_boost > 0.0 {
        labels.push(InputLabel::Boost);
    }
    if input.pitch > 0.0 {
        labels.push(InputLabel::AnalogueDown(input.pitch));
    }
    if input.pitch < 0.0 {
        labels.push(InputLabel::AnalogueUp(input.pitch));
    }
    if input.roll > 0.0 {
        labels.push(InputLabel::RollRight(input.roll));
    }
    if input.roll < 0.0 {
        labels.push(InputLabel::RollLeft(input.roll));
    }
    if input.steer > 0.0 {
        labels.push(InputLabel::AnalogueRight(input.steer));
    }
    if input.steer < 0.0 {
        labels.push(InputLabel::AnalogueLeft(input.steer));
    }
    if input.handbrake > 0.0 {
        labels.push(InputLabel::Handbrake);
    }
    if sample.directional_air_roll {
        labels.push(InputLabel::DirectionalAirRoll);
    }
    if input.jump_pressed {
        labels.push(InputLabel::Jump);
    }

    labels
}

/// Renders the active labels as `"A, B, "`. Neutral input yields `""`.
pub fn classify(sample: &InputSample) -> String {
    active_labels(sample)
        .into_iter()
        .map(|label| format!("{label}{LABEL_SEPARATOR}"))
        .collect()
}
