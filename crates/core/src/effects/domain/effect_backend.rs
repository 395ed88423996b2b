use super::effect_processor::{BackendError, ProcessorHandle};
use super::effect_selection::EffectOptions;

/// Domain interface for the accelerated processing backend.
///
/// Support is decided once when the backend is built and must not change
/// afterwards; callers cache the answer.
pub trait EffectBackend: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Constructs a processor of the family implied by `options`, configured
    /// with them. May allocate GPU resources.
    fn create_processor(&self, options: &EffectOptions) -> Result<ProcessorHandle, BackendError>;
}
