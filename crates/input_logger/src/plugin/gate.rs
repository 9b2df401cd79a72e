use thiserror::Error;

use crate::host::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingEntity {
    #[error("Server undefined")]
    Session,
    #[error("Ball undefined")]
    Ball,
    #[error("Car undefined")]
    Car,
}

/// Why a tick was skipped. Only [`Ineligible::Missing`] is worth a log line;
/// the other two are the normal idle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligible {
    #[error("plugin disabled")]
    Disabled,
    #[error("not in custom training or freeplay")]
    UnsupportedMode,
    #[error(transparent)]
    Missing(#[from] MissingEntity),
}

/// Checks, in order: enabled, game mode, session, ball, car.
pub fn check_eligibility(enabled: bool, host: &dyn Host) -> Result<(), Ineligible> {
    if !enabled {
        return Err(Ineligible::Disabled);
    }

    if !host.is_in_custom_training() && !host.is_in_freeplay() {
        return Err(Ineligible::UnsupportedMode);
    }

    let session = host.current_session().ok_or(MissingEntity::Session)?;
    if !session.has_ball {
        return Err(MissingEntity::Ball.into());
    }
    if host.local_car().is_none() {
        return Err(MissingEntity::Car.into());
    }

    Ok(())
}
