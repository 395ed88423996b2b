pub mod background_image;
pub mod gpu_blur_processor;
pub mod gpu_device;
pub mod gpu_effect_backend;
pub mod gpu_virtual_background_processor;
