use crate::effects::domain::effect_processor::{BackendError, ProcessorHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackSource {
    Camera,
    ScreenShare,
    Microphone,
}

/// Processor controls of a local video track.
///
/// A track holds at most one processor. Implementations refuse to attach a
/// second one rather than replacing it silently.
pub trait ProcessorControl {
    /// The currently attached processor, if any.
    fn processor(&self) -> Option<ProcessorHandle>;

    fn set_processor(&mut self, processor: ProcessorHandle) -> Result<(), BackendError>;

    /// Detaches the current processor. Detaching with nothing attached is a no-op.
    fn stop_processor(&mut self) -> Result<(), BackendError>;
}

/// A media track handed over by the session layer.
///
/// Only tracks that expose [`ProcessorControl`] can carry effects; remote
/// and audio tracks return `None`.
pub trait MediaTrack: Send {
    fn sid(&self) -> &str;

    fn kind(&self) -> TrackKind;

    fn source(&self) -> TrackSource;

    fn processor_control(&mut self) -> Option<&mut dyn ProcessorControl>;
}
