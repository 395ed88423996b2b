use crate::effects::domain::effect_processor::{BackendError, ProcessorHandle};
use crate::track::domain::media_track::{MediaTrack, ProcessorControl, TrackKind, TrackSource};

/// In-process local video track that owns its processor slot.
pub struct LocalVideoTrack {
    sid: String,
    source: TrackSource,
    processor: Option<ProcessorHandle>,
}

impl LocalVideoTrack {
    pub fn new(sid: impl Into<String>, source: TrackSource) -> Self {
        Self {
            sid: sid.into(),
            source,
            processor: None,
        }
    }

    pub fn camera(sid: impl Into<String>) -> Self {
        Self::new(sid, TrackSource::Camera)
    }
}

impl MediaTrack for LocalVideoTrack {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Video
    }

    fn source(&self) -> TrackSource {
        self.source
    }

    fn processor_control(&mut self) -> Option<&mut dyn ProcessorControl> {
        Some(self)
    }
}

impl ProcessorControl for LocalVideoTrack {
    fn processor(&self) -> Option<ProcessorHandle> {
        self.processor.clone()
    }

    fn set_processor(&mut self, processor: ProcessorHandle) -> Result<(), BackendError> {
        if let Some(attached) = &self.processor {
            return Err(BackendError::AlreadyAttached {
                attached: attached.name().to_string(),
            });
        }
        log::debug!("Track {}: attaching {}", self.sid, processor.name());
        self.processor = Some(processor);
        Ok(())
    }

    fn stop_processor(&mut self) -> Result<(), BackendError> {
        if let Some(processor) = self.processor.take() {
            log::debug!("Track {}: detached {}", self.sid, processor.name());
        }
        Ok(())
    }
}
