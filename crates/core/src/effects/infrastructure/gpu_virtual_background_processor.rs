use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use crate::effects::domain::effect_processor::{BackendError, EffectProcessor};
use crate::effects::domain::effect_selection::{EffectFamily, EffectOptions};
use crate::shared::constants::VIRTUAL_BACKGROUND_PROCESSOR_NAME;

use super::background_image::BackgroundImage;
use super::gpu_device::GpuDevice;

struct Background {
    image_path: String,
    texture: Option<wgpu::Texture>,
}

/// Replaces the camera background with an image uploaded to a GPU texture.
///
/// Constructed with an empty path (no texture); each option update decodes
/// the new image and swaps the texture.
pub struct GpuVirtualBackgroundProcessor {
    gpu: Arc<GpuDevice>,
    background: Mutex<Background>,
}

impl GpuVirtualBackgroundProcessor {
    pub fn new(gpu: Arc<GpuDevice>, image_path: &str) -> Result<Self, BackendError> {
        let processor = Self {
            gpu,
            background: Mutex::new(Background {
                image_path: String::new(),
                texture: None,
            }),
        };
        processor.set_image(image_path)?;
        Ok(processor)
    }

    pub fn has_texture(&self) -> bool {
        self.lock().texture.is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Background> {
        self.background.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_image(&self, image_path: &str) -> Result<(), BackendError> {
        let texture = if image_path.is_empty() {
            None
        } else {
            let image = BackgroundImage::load(Path::new(image_path))?;
            Some(self.upload(&image)?)
        };

        let mut background = self.lock();
        background.image_path = image_path.to_string();
        background.texture = texture;
        Ok(())
    }

    fn upload(&self, image: &BackgroundImage) -> Result<wgpu::Texture, BackendError> {
        let max = self.gpu.max_texture_dimension();
        if image.width() > max || image.height() > max {
            return Err(BackendError::Rejected {
                processor: VIRTUAL_BACKGROUND_PROCESSOR_NAME,
                reason: format!(
                    "{} is {}x{}, device limit is {max}",
                    image.path().display(),
                    image.width(),
                    image.height()
                ),
            });
        }

        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };
        let texture = self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("virtual-background-image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width()),
                rows_per_image: Some(image.height()),
            },
            size,
        );
        Ok(texture)
    }
}

impl EffectProcessor for GpuVirtualBackgroundProcessor {
    fn family(&self) -> EffectFamily {
        EffectFamily::ImageReplacement
    }

    fn options(&self) -> EffectOptions {
        EffectOptions::ImageReplacement {
            image_path: self.lock().image_path.clone(),
        }
    }

    fn update_options(&self, options: &EffectOptions) -> Result<(), BackendError> {
        match options {
            EffectOptions::ImageReplacement { image_path } => self.set_image(image_path),
            other => Err(BackendError::Rejected {
                processor: VIRTUAL_BACKGROUND_PROCESSOR_NAME,
                reason: format!("expected image options, got {}", other.family()),
            }),
        }
    }
}
