use crate::track::domain::media_track::{MediaTrack, ProcessorControl, TrackKind, TrackSource};

/// A subscribed track published by another participant. Effects can't be
/// applied to it.
pub struct RemoteVideoTrack {
    sid: String,
    source: TrackSource,
}

impl RemoteVideoTrack {
    pub fn new(sid: impl Into<String>, source: TrackSource) -> Self {
        Self {
            sid: sid.into(),
            source,
        }
    }
}

impl MediaTrack for RemoteVideoTrack {
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
        None
    }
}
