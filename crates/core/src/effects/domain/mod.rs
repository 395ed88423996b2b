pub mod effect_backend;
pub mod effect_preset;
pub mod effect_processor;
pub mod effect_selection;
