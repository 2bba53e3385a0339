use crate::world::WorldError;

/// Contract violations raised while interacting.
///
/// Ordinary misses (nothing under the crosshair, target out of reach, target
/// not interactive) are reported as [`ActionOutcome`](super::ActionOutcome)s
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InteractionError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("the level has not been classified yet; call begin_play first")]
    NotClassified,
}
