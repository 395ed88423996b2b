use std::sync::Arc;

use crate::effects::domain::effect_backend::EffectBackend;
use crate::effects::domain::effect_processor::{BackendError, ProcessorHandle};
use crate::effects::domain::effect_selection::EffectOptions;

use super::gpu_blur_processor::GpuBlurProcessor;
use super::gpu_device::GpuDevice;
use super::gpu_virtual_background_processor::GpuVirtualBackgroundProcessor;

/// Effect backend on a shared wgpu device.
pub struct GpuEffectBackend {
    gpu: Option<Arc<GpuDevice>>,
}

impl GpuEffectBackend {
    /// Probes for a GPU adapter once; the answer holds for the backend's lifetime.
    pub fn new() -> Self {
        Self {
            gpu: GpuDevice::probe().map(Arc::new),
        }
    }

    /// A backend that reports effects as unsupported without probing.
    pub fn unsupported() -> Self {
        Self { gpu: None }
    }

    pub fn adapter_name(&self) -> Option<&str> {
        self.gpu.as_deref().map(|gpu| gpu.adapter_name.as_str())
    }
}

impl Default for GpuEffectBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectBackend for GpuEffectBackend {
    fn is_supported(&self) -> bool {
        self.gpu.is_some()
    }

    fn create_processor(&self, options: &EffectOptions) -> Result<ProcessorHandle, BackendError> {
        let Some(gpu) = &self.gpu else {
            return Err(BackendError::Create {
                family: options.family(),
                reason: "no GPU adapter available".into(),
            });
        };
        match options {
            EffectOptions::Blur { blur_radius } => {
                Ok(Arc::new(GpuBlurProcessor::new(Arc::clone(gpu), *blur_radius)?))
            }
            EffectOptions::ImageReplacement { image_path } => Ok(Arc::new(
                GpuVirtualBackgroundProcessor::new(Arc::clone(gpu), image_path)?,
            )),
        }
    }
}

/// Creates the effect backend, probing the GPU unless `gpu_enabled` is false.
/// Logs which backend is selected.
pub fn create_backend(gpu_enabled: bool) -> Box<dyn EffectBackend> {
    if !gpu_enabled {
        log::info!("GPU disabled by configuration, background effects unavailable");
        return Box::new(GpuEffectBackend::unsupported());
    }
    let backend = GpuEffectBackend::new();
    match backend.adapter_name() {
        Some(name) => log::info!("Using GPU backend for background effects ({name})"),
        None => log::info!("No GPU available, background effects unavailable"),
    }
    Box::new(backend)
}
