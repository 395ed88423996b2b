use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::effects::domain::effect_processor::BackendError;
use crate::effects::domain::effect_selection::{EffectFamily, EffectSelection};
use crate::pipeline::processor_cache::ProcessorCache;
use crate::track::domain::media_track::{MediaTrack, ProcessorControl};

/// Step of a reconcile that talked to the backend or the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileStage {
    Update,
    Detach,
    Create,
    Attach,
}

impl fmt::Display for ReconcileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            ReconcileStage::Update => "update",
            ReconcileStage::Detach => "detach",
            ReconcileStage::Create => "create",
            ReconcileStage::Attach => "attach",
        };
        f.write_str(verb)
    }
}

#[derive(Error, Debug)]
#[error("failed to {stage} {family} processor: {source}")]
pub struct ReconcileError {
    pub stage: ReconcileStage,
    pub family: EffectFamily,
    #[source]
    pub source: BackendError,
}

/// What a reconcile did to the track.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The track already matched the selection; no calls were made.
    Unchanged,
    /// The attached processor took the new options in place.
    Updated(EffectFamily),
    /// A processor was attached, after detaching `replaced` if present.
    Attached {
        family: EffectFamily,
        replaced: Option<EffectFamily>,
    },
    /// The attached processor was removed and nothing replaced it.
    Detached(EffectFamily),
    /// The track has no processor controls (remote or audio track).
    UnsupportedTrack,
    /// Accelerated processing isn't available on this device.
    BackendUnavailable,
    /// The selection can't configure a processor, e.g. an image
    /// replacement without an image.
    InvalidSelection { detached: Option<EffectFamily> },
    /// A backend or track call failed. The track's final state is not
    /// guaranteed; the next selection change recovers.
    Failed(ReconcileError),
}

impl ReconcileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Unchanged
                | ReconcileOutcome::Updated(_)
                | ReconcileOutcome::Attached { .. }
                | ReconcileOutcome::Detached(_)
        )
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Unchanged => write!(f, "unchanged"),
            ReconcileOutcome::Updated(family) => write!(f, "updated {family}"),
            ReconcileOutcome::Attached {
                family,
                replaced: Some(old),
            } => write!(f, "replaced {old} with {family}"),
            ReconcileOutcome::Attached { family, .. } => write!(f, "attached {family}"),
            ReconcileOutcome::Detached(family) => write!(f, "detached {family}"),
            ReconcileOutcome::UnsupportedTrack => write!(f, "track does not support processors"),
            ReconcileOutcome::BackendUnavailable => write!(f, "effects unsupported on this device"),
            ReconcileOutcome::InvalidSelection { .. } => write!(f, "invalid selection"),
            ReconcileOutcome::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Brings a track's attached processor in line with an [`EffectSelection`].
///
/// Reuses the attached processor when only its options change, and always
/// detaches before attaching so the track never carries two processors.
/// Callers must not reconcile the same track from two places at once; see
/// [`SelectionDispatcher`](crate::pipeline::selection_dispatcher::SelectionDispatcher).
#[derive(Clone)]
pub struct ProcessorReconciler {
    cache: Arc<ProcessorCache>,
}

impl ProcessorReconciler {
    pub fn new(cache: Arc<ProcessorCache>) -> Self {
        Self { cache }
    }

    /// Applies `selection` to `track`. Never fails: backend errors are
    /// logged and reported as [`ReconcileOutcome::Failed`].
    pub fn reconcile(
        &self,
        track: &mut dyn MediaTrack,
        selection: &EffectSelection,
    ) -> ReconcileOutcome {
        let sid = track.sid().to_string();
        let (kind, source) = (track.kind(), track.source());
        let Some(control) = track.processor_control() else {
            log::debug!("Track {sid} ({kind:?}, {source:?}) has no processor controls, ignoring {selection}");
            return ReconcileOutcome::UnsupportedTrack;
        };

        let outcome = self.apply(control, selection);
        match &outcome {
            ReconcileOutcome::Failed(e) => log::error!("Track {sid}: {e}"),
            outcome => log::debug!("Track {sid}: {selection} -> {outcome}"),
        }
        outcome
    }

    fn apply(
        &self,
        control: &mut dyn ProcessorControl,
        selection: &EffectSelection,
    ) -> ReconcileOutcome {
        let current = control.processor();

        let Some(options) = selection.options() else {
            let Some(current) = current else {
                return ReconcileOutcome::Unchanged;
            };
            let family = current.family();
            return match control.stop_processor() {
                Ok(()) => ReconcileOutcome::Detached(family),
                Err(source) => failed(ReconcileStage::Detach, family, source),
            };
        };

        if !self.cache.is_supported() {
            return ReconcileOutcome::BackendUnavailable;
        }

        let family = options.family();
        if let Some(current) = current.as_ref().filter(|p| p.family() == family) {
            if !selection.is_valid() {
                log::warn!("Ignoring {selection}: no image to apply");
                return ReconcileOutcome::InvalidSelection { detached: None };
            }
            if current.options() == options {
                return ReconcileOutcome::Unchanged;
            }
            return match current.update_options(&options) {
                Ok(()) => ReconcileOutcome::Updated(family),
                Err(source) => failed(ReconcileStage::Update, family, source),
            };
        }

        let replaced = match current {
            Some(current) => {
                let old = current.family();
                if let Err(source) = control.stop_processor() {
                    return failed(ReconcileStage::Detach, old, source);
                }
                Some(old)
            }
            None => None,
        };

        if !selection.is_valid() {
            log::warn!("Ignoring {selection}: no image to apply");
            return ReconcileOutcome::InvalidSelection { detached: replaced };
        }

        let processor = match self.cache.get_or_create(family) {
            Ok(Some(processor)) => processor,
            Ok(None) => return ReconcileOutcome::BackendUnavailable,
            Err(source) => return failed(ReconcileStage::Create, family, source),
        };
        if let Err(source) = processor.update_options(&options) {
            return failed(ReconcileStage::Update, family, source);
        }
        if let Err(source) = control.set_processor(processor) {
            return failed(ReconcileStage::Attach, family, source);
        }

        ReconcileOutcome::Attached { family, replaced }
    }
}

fn failed(stage: ReconcileStage, family: EffectFamily, source: BackendError) -> ReconcileOutcome {
    ReconcileOutcome::Failed(ReconcileError {
        stage,
        family,
        source,
    })
}
