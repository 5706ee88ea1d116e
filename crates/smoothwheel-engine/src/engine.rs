//! Per-surface scroll engine

use smoothwheel_core::{DecayTunables, FrameClock, Result, TunableSource, WheelTunables};
use tracing::{debug, trace};

use crate::store::{Axis, ScrollStore};
use crate::velocity::{apply_delta, VelocityHistory, VelocityState, WheelEvent, WheelOutcome};

/// Inertial scrolling for one editing surface
///
/// Wheel events shape the velocity, timer ticks integrate it into the
/// host's scroll offsets and apply friction once input stops.
///
/// The engine is single-threaded: every entry point takes `&mut self` and
/// the host is expected to call them from one dispatch thread, one handler
/// at a time. A multi-threaded host must put the engine behind a mutex.
#[derive(Debug)]
pub struct ScrollEngine<C> {
    state: VelocityState,
    source: C,
    clock: FrameClock,
}

impl<C: TunableSource> ScrollEngine<C> {
    /// Attach to a surface, taking over its scroll animation
    pub fn attach<S: ScrollStore + ?Sized>(store: &mut S, source: C, clock: FrameClock) -> Self {
        store.disable_builtin_animation();
        debug!(
            "Attached scroll engine at {} FPS ({}ms per frame)",
            clock.frames_per_second(),
            clock.millis()
        );

        Self {
            state: VelocityState::new(),
            source,
            clock,
        }
    }

    /// Handle a mouse-wheel event, reporting what it did to the velocity
    ///
    /// Tunables are read before anything changes, so a configuration error
    /// leaves the engine untouched.
    pub fn on_wheel_event(&mut self, event: &WheelEvent) -> Result<WheelOutcome> {
        let tunables = WheelTunables::read(&self.source)?;

        self.state.begin_input(event.horizontal);
        let outcome = self.state.apply_wheel(
            event.rotation,
            event.scroll_amount,
            &tunables,
            self.clock.millis(),
        );

        match outcome {
            WheelOutcome::Reversed => debug!("Wheel direction changed, velocity reset"),
            WheelOutcome::Stopped => debug!("Velocity clamped below threshold, stopped"),
            WheelOutcome::Filtered | WheelOutcome::Moving => {}
        }

        Ok(outcome)
    }

    /// Advance one animation frame, returning the offset written (if any)
    pub fn on_timer_tick<S: ScrollStore + ?Sized>(
        &mut self,
        store: &mut S,
    ) -> Result<Option<i32>> {
        let tunables = DecayTunables::read(&self.source)?;

        let Some(delta) = self.state.advance(&tunables, self.clock.millis()) else {
            return Ok(None);
        };

        let axis = self.state.axis();
        let offset = apply_delta(store.offset(axis), delta);
        store.set_offset(axis, offset);
        trace!(?axis, offset, velocity = self.state.velocity(), "Scrolled");

        Ok(Some(offset))
    }

    /// The host's scroll animation finished
    pub fn on_scroll_settled(&mut self) {
        self.state.settle();
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.state.velocity()
    }

    #[inline]
    pub fn history(&self) -> &VelocityHistory {
        self.state.history()
    }

    #[inline]
    pub fn is_actively_scrolling(&self) -> bool {
        self.state.is_actively_scrolling()
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.state.axis()
    }

    /// Still moving, ticks will write offsets
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state.velocity() != 0.0
    }

    pub fn state(&self) -> &VelocityState {
        &self.state
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use smoothwheel_core::{Error, ScrollTunables, Tunable};

    use super::*;
    use crate::store::MemoryStore;

    fn clock() -> FrameClock {
        FrameClock::new(60).unwrap()
    }

    fn unit_tunables() -> ScrollTunables {
        ScrollTunables {
            threshold: 0.01,
            speed_limit: 1e9,
            acceleration_limit: 1e9,
            multiplier: 16.0,
            friction: 0.1,
        }
    }

    #[test]
    fn test_attach_disables_builtin_animation() {
        let mut store = MemoryStore::default();
        let engine = ScrollEngine::attach(&mut store, unit_tunables(), clock());

        assert!(store.is_builtin_animation_disabled());
        assert!(!engine.is_actively_scrolling());
        assert!((engine.clock().millis() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_then_ticks_scroll_down() {
        let mut store = MemoryStore::with_offsets(0, 100);
        let mut engine = ScrollEngine::attach(&mut store, unit_tunables(), clock());

        engine.on_wheel_event(&WheelEvent::vertical(1.0, 1)).unwrap();
        engine.on_wheel_event(&WheelEvent::vertical(1.0, 1)).unwrap();
        assert!(engine.is_actively_scrolling());
        assert!((engine.velocity() - 1.0).abs() < 1e-12);

        // live input: no friction, 1.0 * 16ms per frame
        assert_eq!(engine.on_timer_tick(&mut store).unwrap(), Some(116));
        assert_eq!(engine.on_timer_tick(&mut store).unwrap(), Some(132));
        assert_eq!(store.offset(Axis::Horizontal), 0);
    }

    #[test]
    fn test_modifier_scrolls_horizontally() {
        let mut store = MemoryStore::with_offsets(50, 0);
        let mut engine = ScrollEngine::attach(&mut store, unit_tunables(), clock());

        engine.on_wheel_event(&WheelEvent::horizontal(1.0, 1)).unwrap();
        engine.on_wheel_event(&WheelEvent::horizontal(1.0, 1)).unwrap();
        engine.on_timer_tick(&mut store).unwrap();

        assert_eq!(engine.axis(), Axis::Horizontal);
        assert_eq!(store.offset(Axis::Horizontal), 66);
        assert_eq!(store.offset(Axis::Vertical), 0);
    }

    #[test]
    fn test_offset_never_negative() {
        let mut store = MemoryStore::default();
        let mut engine = ScrollEngine::attach(&mut store, unit_tunables(), clock());
        engine.state.velocity = -3.0;

        assert_eq!(engine.on_timer_tick(&mut store).unwrap(), Some(0));
        assert_eq!(store.writes(), &[(Axis::Vertical, 0)]);
    }

    #[test]
    fn test_filtered_event_still_marks_input() {
        let mut store = MemoryStore::default();
        let tunables = ScrollTunables {
            threshold: 2.0,
            multiplier: 1.0,
            ..unit_tunables()
        };
        let mut engine = ScrollEngine::attach(&mut store, tunables, clock());

        engine.on_wheel_event(&WheelEvent::vertical(0.5, 16)).unwrap();
        engine.on_scroll_settled();
        assert!(!engine.is_actively_scrolling());

        // 16 * 1 * 1 / 16 = 1.0, under the 2.0 threshold
        let outcome = engine.on_wheel_event(&WheelEvent::horizontal(1.0, 16)).unwrap();
        assert_eq!(outcome, WheelOutcome::Filtered);
        assert!(engine.is_actively_scrolling());
        assert_eq!(engine.axis(), Axis::Horizontal);
        assert_eq!(engine.state().last_wheel_delta(), 1.0);
        assert_eq!(engine.velocity(), 0.0);
    }

    #[test]
    fn test_settled_then_decays_to_rest() {
        let mut store = MemoryStore::default();
        let mut engine = ScrollEngine::attach(&mut store, unit_tunables(), clock());
        engine.state.velocity = 10.0;
        engine.state.active = true;
        engine.on_scroll_settled();

        let mut previous = engine.velocity();
        for _ in 0..100 {
            if !engine.is_moving() {
                break;
            }
            engine.on_timer_tick(&mut store).unwrap();
            assert!(engine.velocity() < previous);
            previous = engine.velocity();
        }

        assert_eq!(engine.velocity(), 0.0);
        assert!(engine.history().is_empty());
        assert!(store.offset(Axis::Vertical) > 0);

        // at rest a tick writes nothing
        let writes = store.writes().len();
        assert_eq!(engine.on_timer_tick(&mut store).unwrap(), None);
        assert_eq!(store.writes().len(), writes);
    }

    #[test]
    fn test_missing_tunable_leaves_state_untouched() {
        let mut store = MemoryStore::default();
        let mut source = HashMap::new();
        source.insert(Tunable::Threshold, 0.01);
        let mut engine = ScrollEngine::attach(&mut store, source, clock());

        let err = engine
            .on_wheel_event(&WheelEvent::horizontal(1.0, 3))
            .unwrap_err();
        assert!(matches!(err, Error::MissingTunable(Tunable::SpeedLimit)));
        assert!(!engine.is_actively_scrolling());
        assert_eq!(engine.state().last_wheel_delta(), 0.0);

        engine.state.velocity = 5.0;
        assert!(engine.on_timer_tick(&mut store).is_err());
        assert_eq!(engine.velocity(), 5.0);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_live_tuning_applies_on_next_tick() {
        let (tx, rx) = tokio::sync::watch::channel(unit_tunables());
        let mut store = MemoryStore::default();
        let mut engine = ScrollEngine::attach(&mut store, rx, clock());
        engine.state.velocity = 1.0;

        tx.send_modify(|t| t.threshold = 2.0);
        assert_eq!(engine.on_timer_tick(&mut store).unwrap(), None);
        assert_eq!(engine.velocity(), 0.0);
    }
}
