pub mod media_track;
