//! Error types for the marionette core.

use thiserror::Error;

/// Errors surfaced by the core's fallible constructors.
///
/// All other failure modes in this crate are either prevented structurally
/// (a model leaf cannot exist without a drawable) or clamped before they
/// occur (camera pitch), so configuration is the only thing that can fail.
#[derive(Debug, Error)]
pub enum MarionetteError {
    /// An animation clock was configured with a duration that is not a
    /// positive, finite number of seconds.
    #[error("animation duration must be a positive number of seconds, got {0}")]
    NonPositiveDuration(f64),
}
