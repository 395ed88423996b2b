//! Recording backend, processor and track used by the pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender};

use crate::effects::domain::effect_backend::EffectBackend;
use crate::effects::domain::effect_processor::{BackendError, EffectProcessor, ProcessorHandle};
use crate::effects::domain::effect_selection::{EffectFamily, EffectOptions};
use crate::track::domain::media_track::{MediaTrack, ProcessorControl, TrackKind, TrackSource};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Create(EffectFamily),
    Update(EffectOptions),
    Attach(EffectFamily),
    Detach(EffectFamily),
}

/// Shared, ordered record of every backend and track call.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

fn take_failure(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn injected(processor: &'static str) -> BackendError {
    BackendError::Rejected {
        processor,
        reason: "injected failure".into(),
    }
}

pub struct RecordingProcessor {
    family: EffectFamily,
    options: Mutex<EffectOptions>,
    log: CallLog,
    fail_updates: Arc<AtomicUsize>,
}

impl EffectProcessor for RecordingProcessor {
    fn family(&self) -> EffectFamily {
        self.family
    }

    fn options(&self) -> EffectOptions {
        self.options.lock().unwrap().clone()
    }

    fn update_options(&self, options: &EffectOptions) -> Result<(), BackendError> {
        self.log.push(Call::Update(options.clone()));
        if take_failure(&self.fail_updates) || options.family() != self.family {
            return Err(injected(self.name()));
        }
        *self.options.lock().unwrap() = options.clone();
        Ok(())
    }
}

/// Pauses the first processor construction until the test releases it.
struct Gate {
    entered: Sender<()>,
    release: Receiver<()>,
}

pub struct RecordingBackend {
    log: CallLog,
    supported: bool,
    fail_creates: AtomicUsize,
    fail_updates: Arc<AtomicUsize>,
    gate: Mutex<Option<Gate>>,
}

impl RecordingBackend {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            supported: true,
            fail_creates: AtomicUsize::new(0),
            fail_updates: Arc::new(AtomicUsize::new(0)),
            gate: Mutex::new(None),
        }
    }

    pub fn unsupported(log: CallLog) -> Self {
        Self {
            supported: false,
            ..Self::new(log)
        }
    }

    pub fn failing_creates(self, count: usize) -> Self {
        self.fail_creates.store(count, Ordering::SeqCst);
        self
    }

    pub fn failing_updates(self, count: usize) -> Self {
        self.fail_updates.store(count, Ordering::SeqCst);
        self
    }

    /// Counter of upcoming update failures, shared with every processor
    /// this backend creates.
    pub fn update_failures(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fail_updates)
    }

    pub fn gated(self, entered: Sender<()>, release: Receiver<()>) -> Self {
        *self.gate.lock().unwrap() = Some(Gate { entered, release });
        self
    }
}

impl EffectBackend for RecordingBackend {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create_processor(&self, options: &EffectOptions) -> Result<ProcessorHandle, BackendError> {
        let family = options.family();
        self.log.push(Call::Create(family));

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.recv();
        }

        if take_failure(&self.fail_creates) {
            return Err(BackendError::Create {
                family,
                reason: "injected failure".into(),
            });
        }
        Ok(Arc::new(RecordingProcessor {
            family,
            options: Mutex::new(options.clone()),
            log: self.log.clone(),
            fail_updates: Arc::clone(&self.fail_updates),
        }))
    }
}

/// Local video track that records attach/detach and counts any attempt to
/// attach over an existing processor.
pub struct RecordingTrack {
    processor: Option<ProcessorHandle>,
    log: CallLog,
    fail_attaches: usize,
    fail_detaches: usize,
    pub double_attaches: usize,
}

impl RecordingTrack {
    pub fn new(log: CallLog) -> Self {
        Self {
            processor: None,
            log,
            fail_attaches: 0,
            fail_detaches: 0,
            double_attaches: 0,
        }
    }

    pub fn failing_attaches(mut self, count: usize) -> Self {
        self.fail_attaches = count;
        self
    }

    pub fn failing_detaches(mut self, count: usize) -> Self {
        self.fail_detaches = count;
        self
    }

    pub fn attached_family(&self) -> Option<EffectFamily> {
        self.processor.as_ref().map(|p| p.family())
    }

    pub fn attached_options(&self) -> Option<EffectOptions> {
        self.processor.as_ref().map(|p| p.options())
    }
}

impl MediaTrack for RecordingTrack {
    fn sid(&self) -> &str {
        "TR_recording"
    }

    fn kind(&self) -> TrackKind {
        TrackKind::Video
    }

    fn source(&self) -> TrackSource {
        TrackSource::Camera
    }

    fn processor_control(&mut self) -> Option<&mut dyn ProcessorControl> {
        Some(self)
    }
}

impl ProcessorControl for RecordingTrack {
    fn processor(&self) -> Option<ProcessorHandle> {
        self.processor.clone()
    }

    fn set_processor(&mut self, processor: ProcessorHandle) -> Result<(), BackendError> {
        self.log.push(Call::Attach(processor.family()));
        if let Some(attached) = &self.processor {
            self.double_attaches += 1;
            return Err(BackendError::AlreadyAttached {
                attached: attached.name().to_string(),
            });
        }
        if self.fail_attaches > 0 {
            self.fail_attaches -= 1;
            return Err(BackendError::Track("injected attach failure".into()));
        }
        self.processor = Some(processor);
        Ok(())
    }

    fn stop_processor(&mut self) -> Result<(), BackendError> {
        let Some(processor) = self.processor.as_ref() else {
            return Ok(());
        };
        self.log.push(Call::Detach(processor.family()));
        if self.fail_detaches > 0 {
            self.fail_detaches -= 1;
            return Err(BackendError::Track("injected detach failure".into()));
        }
        self.processor = None;
        Ok(())
    }
}
