//! Lifecycle of the engine on one attached surface

use smoothwheel_core::{FrameClock, Result, TunableSource};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::engine::ScrollEngine;
use crate::store::ScrollStore;
use crate::timer::FrameTimer;
use crate::velocity::WheelEvent;

/// Events the host forwards from an editing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Mouse wheel moved over the surface
    Wheel(WheelEvent),
    /// The host's scroll animation finished
    Settled,
    /// Surface gained focus or was opened
    FocusGained,
    /// Surface lost focus; motion pauses until focus returns
    FocusLost,
    /// Surface closed
    Detach,
}

/// Engine, scroll store and frame timer for one surface
///
/// All handlers run on the task that drives [`ScrollSession::run`], one at a
/// time, which is what lets the engine state go without a lock.
pub struct ScrollSession<S, C> {
    engine: ScrollEngine<C>,
    store: S,
    timer: FrameTimer,
}

impl<S: ScrollStore, C: TunableSource> ScrollSession<S, C> {
    /// Attach to a surface and start animating
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(mut store: S, source: C, clock: FrameClock) -> Self {
        let engine = ScrollEngine::attach(&mut store, source, clock);
        let mut timer = FrameTimer::new(clock.tick_interval());
        timer.start();

        Self {
            engine,
            store,
            timer,
        }
    }

    pub fn focus_gained(&mut self) {
        self.timer.start();
    }

    pub fn focus_lost(&mut self) {
        self.timer.stop();
    }

    /// Apply one surface event. Returns `false` once the surface detached.
    pub fn handle(&mut self, event: SurfaceEvent) -> bool {
        match event {
            SurfaceEvent::Wheel(wheel) => {
                if let Err(e) = self.engine.on_wheel_event(&wheel) {
                    warn!("Ignoring wheel event: {}", e);
                }
            }
            SurfaceEvent::Settled => self.engine.on_scroll_settled(),
            SurfaceEvent::FocusGained => self.focus_gained(),
            SurfaceEvent::FocusLost => self.focus_lost(),
            SurfaceEvent::Detach => {
                self.timer.stop();
                return false;
            }
        }
        true
    }

    /// Run one animation frame against the store
    pub fn tick(&mut self) -> Result<Option<i32>> {
        self.engine.on_timer_tick(&mut self.store)
    }

    /// Dispatch surface events and timer ticks until the surface detaches,
    /// the event channel closes or shutdown is signalled
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<SurfaceEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        debug!("Scroll session running");

        loop {
            tokio::select! {
                // Handle shutdown signal
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Scroll session received shutdown signal");
                        break;
                    }
                }

                event = events.recv() => {
                    match event {
                        Some(event) => {
                            if !self.handle(event) {
                                debug!("Surface detached");
                                break;
                            }
                        }
                        None => break,
                    }
                }

                Some(_) = self.timer.tick() => {
                    if let Err(e) = self.tick() {
                        warn!("Skipping animation frame: {}", e);
                    }
                }
            }
        }

        self.timer.stop();
    }

    /// Stop animating and hand the store back to the host
    pub fn detach(mut self) -> S {
        self.timer.stop();
        self.store
    }

    pub fn engine(&self) -> &ScrollEngine<C> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.timer.is_running()
    }
}
