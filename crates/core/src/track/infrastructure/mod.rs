pub mod local_audio_track;
pub mod local_video_track;
pub mod remote_video_track;
