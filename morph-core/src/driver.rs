//! Per-frame tick loop.
//!
//! [`AnimationDriver::spawn`] runs a dedicated thread that ticks the shared
//! [`Morph`](crate::Morph) once per frame interval and then notifies the
//! renderer. The returned [`DriverHandle`] owns the thread: cancelling it,
//! joining it, or simply dropping it stops the loop.
//!
//! Hosts with their own repaint callback (such as an egui app) should call
//! [`Morph::tick`](crate::Morph::tick) from that callback instead; this loop
//! is for headless hosts that have no display refresh to hook into.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{
    error::{MorphError, Result},
    morph::{self, SharedMorph},
    scheduler::Frame,
};

pub struct AnimationDriver;

impl AnimationDriver {
    /// Starts ticking `shared` every `frame_interval`.
    ///
    /// Each iteration holds the state lock only for the tick itself; the
    /// `on_frame` callback runs after the lock is released. A slow frame is
    /// not made up for: every iteration advances exactly one logical step.
    ///
    /// ### Parameters
    /// - `shared` - Animation state shared with the renderer.
    /// - `frame_interval` - Target time between ticks.
    /// - `on_frame` - Called after every tick, e.g. to request a repaint.
    ///
    /// ### Returns
    /// A handle that stops the loop when cancelled or dropped.
    pub fn spawn<F>(shared: SharedMorph, frame_interval: Duration, mut on_frame: F) -> Result<DriverHandle>
    where
        F: FnMut(&Frame) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let ticks = Arc::new(AtomicU64::new(0));

        let thread = {
            let stop = stop.clone();
            let ticks = ticks.clone();
            thread::Builder::new()
                .name("morph-driver".into())
                .spawn(move || {
                    tracing::info!(interval_ms = frame_interval.as_millis() as u64, "animation driver started");
                    while !stop.load(Ordering::Acquire) {
                        let started = Instant::now();

                        let frame = match morph::lock(&shared) {
                            Ok(mut state) => state.tick(),
                            Err(err) => {
                                tracing::warn!(%err, "stopping animation driver");
                                break;
                            }
                        };
                        ticks.fetch_add(1, Ordering::Relaxed);
                        on_frame(&frame);

                        if let Some(rest) = frame_interval.checked_sub(started.elapsed()) {
                            thread::park_timeout(rest);
                        }
                    }
                    tracing::info!(ticks = ticks.load(Ordering::Relaxed), "animation driver stopped");
                })
                .map_err(|e| MorphError::Spawn(e.to_string()))?
        };

        Ok(DriverHandle {
            stop,
            ticks,
            thread: Some(thread),
        })
    }
}

/// Cancellation handle for a running [`AnimationDriver`].
pub struct DriverHandle {
    stop: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Asks the loop to stop after its current iteration.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = &self.thread {
            thread.thread().unpark();
        }
    }

    /// Whether the loop thread is still alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Number of ticks this driver has performed.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Cancels the loop and waits for the thread to exit.
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.cancel();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::warn!("animation driver thread panicked");
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
