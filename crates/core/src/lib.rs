pub mod effects;
pub mod pipeline;
pub mod shared;
pub mod track;
