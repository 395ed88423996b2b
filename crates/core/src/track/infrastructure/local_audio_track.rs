use crate::track::domain::media_track::{MediaTrack, ProcessorControl, TrackKind, TrackSource};

/// Local microphone track. Video effects don't apply to audio, so it exposes
/// no processor controls.
pub struct LocalAudioTrack {
    sid: String,
}

impl LocalAudioTrack {
    pub fn microphone(sid: impl Into<String>) -> Self {
        Self { sid: sid.into() }
    }
}

impl MediaTrack for LocalAudioTrack {
    fn sid(&self) -> &str {
        &self.sid
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Audio
    }

    fn source(&self) -> TrackSource {
        TrackSource::Microphone
    }

    fn processor_control(&mut self) -> Option<&mut dyn ProcessorControl> {
        None
    }
}
