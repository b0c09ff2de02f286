//! Frame driver: owns the shared clock and one sketch, and serializes
//! parameter updates between ticks.
//!
//! Updates may come from another thread through a [`ParamSender`]. They are
//! queued and only merged at the start of [`Animator::tick`], before the
//! sketch steps, so no step ever sees a half-applied parameter set. Each
//! submitter gets the merge result back on its own reply channel.

use crate::SketchKind;
use serde_json::Value;
use sketchbook_core::{Frame, FrameClock, InputState, Renderer, Sketch, SketchError};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{trace, warn};

/// Clock advance per tick.
const TICK: f64 = 1.0;

type Reply = Result<(), SketchError>;

/// One queued partial update and where to send its result.
struct Submission {
    partial: Value,
    reply: Sender<Reply>,
}

/// Cloneable handle for submitting parameter updates to an [`Animator`].
#[derive(Clone)]
pub struct ParamSender {
    tx: Sender<Submission>,
}

impl ParamSender {
    /// Queues `partial` for the next tick and returns the channel its merge
    /// result will arrive on.
    ///
    /// If the animator has been dropped the update is discarded and the
    /// returned receiver reports disconnection.
    pub fn submit(&self, partial: Value) -> Receiver<Reply> {
        let (reply, rx) = mpsc::channel();
        // A send error drops the submission together with its reply sender.
        let _ = self.tx.send(Submission { partial, reply });
        rx
    }
}

/// Runs one sketch frame by frame.
pub struct Animator<S: Sketch = SketchKind> {
    sketch: S,
    clock: FrameClock,
    tx: Sender<Submission>,
    rx: Receiver<Submission>,
}

impl<S: Sketch> Animator<S> {
    pub fn new(sketch: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            sketch,
            clock: FrameClock::new(),
            tx,
            rx,
        }
    }

    /// Handle for queuing updates from elsewhere.
    pub fn sender(&self) -> ParamSender {
        ParamSender {
            tx: self.tx.clone(),
        }
    }

    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Merges `partial` immediately. Only callable between ticks.
    pub fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        self.sketch.update_params(partial)
    }

    /// Applies every queued update in submission order. Returns how many
    /// were accepted.
    fn drain_updates(&mut self) -> usize {
        let mut accepted = 0;
        while let Ok(Submission { partial, reply }) = self.rx.try_recv() {
            let result = self.sketch.update_params(&partial);
            match &result {
                Ok(()) => accepted += 1,
                Err(e) => warn!(sketch = self.sketch.name(), error = %e, "rejected parameter update"),
            }
            // The submitter may have stopped listening.
            let _ = reply.send(result);
        }
        accepted
    }

    /// Merges queued updates, advances the clock, and steps the sketch once.
    ///
    /// Fails only if the sketch breaks one of its own invariants, which is a
    /// bug rather than a recoverable condition.
    pub fn tick(&mut self, input: &InputState) -> Result<Frame, SketchError> {
        let accepted = self.drain_updates();
        self.clock.advance(TICK);
        let frame = self.sketch.step(&self.clock, input);
        self.sketch.verify()?;
        trace!(
            tick = self.clock.ticks(),
            primitives = frame.len(),
            population = self.sketch.population(),
            accepted,
            "tick"
        );
        Ok(frame)
    }

    /// Ticks `frames` times, handing each frame to `renderer`. `input` is
    /// called with the index of the tick about to run.
    pub fn run<R, F>(&mut self, frames: usize, renderer: &mut R, mut input: F) -> Result<(), R::Error>
    where
        R: Renderer,
        R::Error: From<SketchError>,
        F: FnMut(u64) -> InputState,
    {
        for _ in 0..frames {
            let state = input(self.clock.ticks() + 1);
            let frame = self.tick(&state)?;
            renderer.render(&frame)?;
        }
        Ok(())
    }
}
