use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use super::effect_selection::{EffectFamily, EffectOptions};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to create {family} processor: {reason}")]
    Create { family: EffectFamily, reason: String },
    #[error("{processor} rejected options: {reason}")]
    Rejected {
        processor: &'static str,
        reason: String,
    },
    #[error("failed to load background image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("track already has {attached} attached")]
    AlreadyAttached { attached: String },
    #[error("track error: {0}")]
    Track(String),
}

/// A running background effect instance.
///
/// The same instance is shared between the processor cache and the track it
/// is attached to, so option updates go through `&self`.
pub trait EffectProcessor: Send + Sync {
    fn family(&self) -> EffectFamily;

    fn name(&self) -> &'static str {
        self.family().processor_name()
    }

    /// Options currently in effect.
    fn options(&self) -> EffectOptions;

    /// Applies new options in place. Options of another family are rejected.
    fn update_options(&self, options: &EffectOptions) -> Result<(), BackendError>;
}

pub type ProcessorHandle = Arc<dyn EffectProcessor>;
