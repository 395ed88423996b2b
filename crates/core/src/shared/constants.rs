/// Blur radius used for the blur preset and for freshly created blur processors.
pub const DEFAULT_BLUR_RADIUS: f32 = 10.0;

/// Processor names reported by the accelerated backend.
pub const BLUR_PROCESSOR_NAME: &str = "background-blur";
pub const VIRTUAL_BACKGROUND_PROCESSOR_NAME: &str = "virtual-background";

pub const SETTINGS_DIR_NAME: &str = "Backdrop";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
