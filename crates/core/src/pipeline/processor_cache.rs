use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::effects::domain::effect_backend::EffectBackend;
use crate::effects::domain::effect_processor::{BackendError, ProcessorHandle};
use crate::effects::domain::effect_selection::EffectFamily;

/// Holds at most one processor per effect family, built on first demand.
///
/// Construction is expensive (GPU allocation) and only one instance per
/// family is ever attached at a time, so entries are never evicted.
pub struct ProcessorCache {
    backend: Box<dyn EffectBackend>,
    supported: bool,
    entries: Mutex<HashMap<EffectFamily, ProcessorHandle>>,
}

impl ProcessorCache {
    pub fn new(backend: Box<dyn EffectBackend>) -> Self {
        let supported = backend.is_supported();
        if !supported {
            log::info!("Accelerated effect backend unavailable, background effects disabled");
        }
        Self {
            backend,
            supported,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Whether background effects can run at all. Decided once at construction.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Returns the cached processor for `family`, creating it with the
    /// family's default options on first use.
    ///
    /// `Ok(None)` when the backend is unsupported. A failed construction is
    /// not cached, so the next call tries again.
    pub fn get_or_create(
        &self,
        family: EffectFamily,
    ) -> Result<Option<ProcessorHandle>, BackendError> {
        if !self.supported {
            return Ok(None);
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(processor) = entries.get(&family) {
            return Ok(Some(Arc::clone(processor)));
        }

        let processor = self.backend.create_processor(&family.default_options())?;
        log::info!("Created {} processor", processor.name());
        entries.insert(family, Arc::clone(&processor));
        Ok(Some(processor))
    }

    pub fn is_cached(&self, family: EffectFamily) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&family)
    }
}
