use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::effects::domain::effect_selection::EffectSelection;
use crate::pipeline::processor_reconciler::{ProcessorReconciler, ReconcileOutcome};
use crate::track::domain::media_track::MediaTrack;

/// Result of one dispatched reconcile.
#[derive(Debug)]
pub struct DispatchedOutcome {
    pub selection: EffectSelection,
    pub outcome: ReconcileOutcome,
}

enum Command {
    Select(EffectSelection),
    Shutdown,
}

/// Serializes effect changes for one track on a worker thread.
///
/// The worker owns the track, so reconciles never overlap. Selections that
/// queue up while a reconcile is running are coalesced: only the newest one
/// is applied once the worker is free.
pub struct SelectionDispatcher {
    commands: Sender<Command>,
    outcomes: Receiver<DispatchedOutcome>,
    worker: Option<JoinHandle<Box<dyn MediaTrack>>>,
}

impl SelectionDispatcher {
    pub fn spawn(track: Box<dyn MediaTrack>, reconciler: ProcessorReconciler) -> Self {
        let (command_tx, command_rx) = crossbeam_channel::unbounded::<Command>();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<DispatchedOutcome>();

        let worker = thread::spawn(move || run(track, &reconciler, &command_rx, &outcome_tx));

        Self {
            commands: command_tx,
            outcomes: outcome_rx,
            worker: Some(worker),
        }
    }

    /// Queues a selection. Returns `false` if the worker is gone.
    pub fn select(&self, selection: EffectSelection) -> bool {
        self.commands.send(Command::Select(selection)).is_ok()
    }

    /// Outcomes in the order the worker applied them.
    pub fn outcomes(&self) -> &Receiver<DispatchedOutcome> {
        &self.outcomes
    }

    /// Applies the newest pending selection, stops the worker and hands the
    /// track back. `None` if the worker panicked.
    pub fn shutdown(mut self) -> Option<Box<dyn MediaTrack>> {
        self.stop()
    }

    fn stop(&mut self) -> Option<Box<dyn MediaTrack>> {
        let worker = self.worker.take()?;
        let _ = self.commands.send(Command::Shutdown);
        match worker.join() {
            Ok(track) => Some(track),
            Err(_) => {
                log::error!("Selection dispatcher worker panicked");
                None
            }
        }
    }
}

impl Drop for SelectionDispatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    mut track: Box<dyn MediaTrack>,
    reconciler: &ProcessorReconciler,
    commands: &Receiver<Command>,
    outcomes: &Sender<DispatchedOutcome>,
) -> Box<dyn MediaTrack> {
    while let Ok(command) = commands.recv() {
        let mut pending = None;
        let mut stop = false;
        for command in std::iter::once(command).chain(commands.try_iter()) {
            match command {
                Command::Select(selection) => {
                    if let Some(superseded) = pending.replace(selection) {
                        log::debug!("Dropping superseded selection {superseded}");
                    }
                }
                Command::Shutdown => stop = true,
            }
        }

        if let Some(selection) = pending {
            let outcome = reconciler.reconcile(track.as_mut(), &selection);
            let _ = outcomes.send(DispatchedOutcome { selection, outcome });
        }
        if stop {
            break;
        }
    }
    track
}
