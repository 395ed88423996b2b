use std::sync::Arc;

/// Shared wgpu device used by every effect processor.
///
/// Probed once per process; its absence means accelerated effects are
/// unsupported for the whole run.
pub struct GpuDevice {
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub adapter_name: String,
}

impl GpuDevice {
    /// Requests a high-performance adapter and device. Returns `None` if no
    /// suitable adapter is available.
    pub fn probe() -> Option<Self> {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))?;
        let adapter_name = adapter.get_info().name;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("effects-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))
        .ok()?;

        Some(Self {
            device: Arc::new(device),
            queue: Arc::new(queue),
            adapter_name,
        })
    }

    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_detection_does_not_panic() {
        // Result depends on hardware
        if let Some(gpu) = GpuDevice::probe() {
            assert!(gpu.max_texture_dimension() > 0);
        }
    }
}
