use std::sync::{Arc, Mutex, PoisonError};

use crate::effects::domain::effect_processor::{BackendError, EffectProcessor};
use crate::effects::domain::effect_selection::{EffectFamily, EffectOptions};
use crate::shared::constants::BLUR_PROCESSOR_NAME;

use super::gpu_device::GpuDevice;

/// Packed params matching the blur shader's uniform layout (16 bytes).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuBackgroundBlurParams {
    pub blur_radius: f32,
    pub _pad0: f32,
    pub _pad1: f32,
    pub _pad2: f32,
}

/// Background blur running on the shared GPU device.
///
/// Radius changes are uploaded to the params uniform in place; the buffer is
/// allocated once at construction.
pub struct GpuBlurProcessor {
    gpu: Arc<GpuDevice>,
    params: wgpu::Buffer,
    blur_radius: Mutex<f32>,
}

impl GpuBlurProcessor {
    pub fn new(gpu: Arc<GpuDevice>, blur_radius: f32) -> Result<Self, BackendError> {
        validate_radius(blur_radius)?;
        let params = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("background-blur-params"),
            size: std::mem::size_of::<GpuBackgroundBlurParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let processor = Self {
            gpu,
            params,
            blur_radius: Mutex::new(blur_radius),
        };
        processor.upload(blur_radius);
        Ok(processor)
    }

    fn upload(&self, blur_radius: f32) {
        let params = GpuBackgroundBlurParams {
            blur_radius,
            _pad0: 0.0,
            _pad1: 0.0,
            _pad2: 0.0,
        };
        self.gpu
            .queue
            .write_buffer(&self.params, 0, bytemuck::bytes_of(&params));
    }
}

impl EffectProcessor for GpuBlurProcessor {
    fn family(&self) -> EffectFamily {
        EffectFamily::Blur
    }

    fn options(&self) -> EffectOptions {
        EffectOptions::Blur {
            blur_radius: *self.blur_radius.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    fn update_options(&self, options: &EffectOptions) -> Result<(), BackendError> {
        let EffectOptions::Blur { blur_radius } = *options else {
            return Err(BackendError::Rejected {
                processor: BLUR_PROCESSOR_NAME,
                reason: format!("expected blur options, got {}", options.family()),
            });
        };
        validate_radius(blur_radius)?;

        let mut current = self.blur_radius.lock().unwrap_or_else(PoisonError::into_inner);
        self.upload(blur_radius);
        *current = blur_radius;
        Ok(())
    }
}

fn validate_radius(blur_radius: f32) -> Result<(), BackendError> {
    if blur_radius.is_finite() && blur_radius >= 0.0 {
        Ok(())
    } else {
        Err(BackendError::Rejected {
            processor: BLUR_PROCESSOR_NAME,
            reason: format!("invalid blur radius {blur_radius}"),
        })
    }
}
