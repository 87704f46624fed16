//! InjectInputUseCase: maps control-event positions into device space and
//! injects them.
//!
//! This use case sits at the application layer and delegates to an
//! [`InputInjector`] trait object for the actual device injection.  The
//! injector implementations live in the infrastructure layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mirror_core::{Point, Position, PositionMapper};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::update_geometry::{DisplayGeometry, SharedMapper};

/// Error type for injection operations.
#[derive(Debug, Error, PartialEq)]
pub enum InjectionError {
    #[error("injection failed: {0}")]
    Platform(String),
    #[error("injector not ready")]
    NotReady,
}

/// Phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// Device-side input injection.
///
/// Points are already in device coordinates when they reach the injector.
#[cfg_attr(test, mockall::automock)]
pub trait InputInjector: Send + Sync {
    /// Injects one touch event for `pointer_id` at `point`.
    fn inject_touch(
        &self,
        action: TouchAction,
        pointer_id: u64,
        point: Point,
        pressure: f32,
    ) -> Result<(), InjectionError>;

    /// Injects a scroll of `h_scroll`/`v_scroll` notches at `point`.
    fn inject_scroll(&self, point: Point, h_scroll: f32, v_scroll: f32)
        -> Result<(), InjectionError>;
}

/// A decoded control event.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Touch {
        action: TouchAction,
        pointer_id: u64,
        position: Position,
        pressure: f32,
    },
    Scroll {
        position: Position,
        h_scroll: f32,
        v_scroll: f32,
    },
    /// Starts a new geometry epoch.
    SetGeometry(DisplayGeometry),
}

/// Counters describing what the use case has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectStats {
    /// Events successfully handed to the injector.
    pub injected: u64,
    /// Positions whose claimed frame size did not match the video size.
    pub rescaled: u64,
    /// Mapper swaps caused by geometry changes.
    pub geometry_changes: u64,
}

#[derive(Default)]
struct Counters {
    injected: AtomicU64,
    rescaled: AtomicU64,
    geometry_changes: AtomicU64,
}

/// The Inject Input use case.
pub struct InjectInputUseCase {
    injector: Arc<dyn InputInjector>,
    mapper: Arc<SharedMapper>,
    counters: Counters,
}

impl InjectInputUseCase {
    /// Creates a new use case reading mappers from `mapper`.
    pub fn new(injector: Arc<dyn InputInjector>, mapper: Arc<SharedMapper>) -> Self {
        Self {
            injector,
            mapper,
            counters: Counters::default(),
        }
    }

    /// The mapper slot this use case reads from.
    pub fn mapper(&self) -> &Arc<SharedMapper> {
        &self.mapper
    }

    /// Handles one control event.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the injector fails.  Mapping itself never
    /// fails.
    pub fn handle(&self, event: &ControlEvent) -> Result<(), InjectionError> {
        match event {
            ControlEvent::Touch {
                action,
                pointer_id,
                position,
                pressure,
            } => {
                let point = self.map_position(position);
                let pressure = match action {
                    TouchAction::Up => 0.0,
                    _ => clamp_pressure(*pressure),
                };
                debug!(?action, pointer_id, from = %position.point, to = %point, "injecting touch");
                self.injector
                    .inject_touch(*action, *pointer_id, point, pressure)?;
            }
            ControlEvent::Scroll {
                position,
                h_scroll,
                v_scroll,
            } => {
                let point = self.map_position(position);
                debug!(from = %position.point, to = %point, h_scroll, v_scroll, "injecting scroll");
                self.injector.inject_scroll(point, *h_scroll, *v_scroll)?;
            }
            ControlEvent::SetGeometry(geometry) => {
                self.mapper.apply_geometry(geometry);
                self.counters.geometry_changes.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }
        }
        self.counters.injected.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> InjectStats {
        InjectStats {
            injected: self.counters.injected.load(Ordering::Relaxed),
            rescaled: self.counters.rescaled.load(Ordering::Relaxed),
            geometry_changes: self.counters.geometry_changes.load(Ordering::Relaxed),
        }
    }

    fn map_position(&self, position: &Position) -> Point {
        let mapper: Arc<PositionMapper> = self.mapper.current();
        if mapper.needs_rescale(position) {
            self.counters.rescaled.fetch_add(1, Ordering::Relaxed);
        }
        mapper.map(position)
    }
}

/// Clamps pressure to `[0, 1]`; a non-finite value counts as full pressure.
fn clamp_pressure(pressure: f32) -> f32 {
    if pressure.is_finite() {
        pressure.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::{AffineMatrix, Size};
    use mockall::predicate::eq;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    fn use_case(injector: MockInputInjector, geometry: DisplayGeometry) -> InjectInputUseCase {
        InjectInputUseCase::new(
            Arc::new(injector),
            Arc::new(SharedMapper::from_geometry(&geometry)),
        )
    }

    fn touch(action: TouchAction, x: i32, y: i32, w: u32, h: u32) -> ControlEvent {
        ControlEvent::Touch {
            action,
            pointer_id: 0,
            position: Position::new(Point::new(x, y), size(w, h)),
            pressure: 1.0,
        }
    }

    // ── touch ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_touch_with_passthrough_geometry_injects_same_point() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Down), eq(0), eq(Point::new(500, 1200)), eq(1.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(1080, 1920)));

        uc.handle(&touch(TouchAction::Down, 500, 1200, 1080, 1920)).unwrap();

        assert_eq!(uc.stats().injected, 1);
        assert_eq!(uc.stats().rescaled, 0);
    }

    #[test]
    fn test_touch_with_stale_size_is_rescaled_and_counted() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Move), eq(0), eq(Point::new(200, 100)), eq(1.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(1000, 500)));

        uc.handle(&touch(TouchAction::Move, 100, 50, 500, 250)).unwrap();

        assert_eq!(uc.stats().rescaled, 1);
    }

    #[test]
    fn test_touch_is_rotated_by_filter() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Down), eq(0), eq(Point::new(400, 200)), eq(1.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(
            injector,
            DisplayGeometry {
                video_size: size(1000, 500),
                target_size: size(500, 1000),
                filter: Some(AffineMatrix::rotate_quarter_turns(1)),
            },
        );

        uc.handle(&touch(TouchAction::Down, 200, 100, 1000, 500)).unwrap();
    }

    #[test]
    fn test_touch_up_is_injected_with_zero_pressure() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Up), eq(0), eq(Point::new(1, 2)), eq(0.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(10, 10)));

        uc.handle(&touch(TouchAction::Up, 1, 2, 10, 10)).unwrap();
    }

    #[test]
    fn test_touch_pressure_is_clamped() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Move), eq(3), eq(Point::new(1, 2)), eq(1.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(10, 10)));

        uc.handle(&ControlEvent::Touch {
            action: TouchAction::Move,
            pointer_id: 3,
            position: Position::new(Point::new(1, 2), size(10, 10)),
            pressure: 7.5,
        })
        .unwrap();
    }

    #[test]
    fn test_injector_failure_is_propagated_and_not_counted() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .returning(|_, _, _, _| Err(InjectionError::Platform("device gone".to_string())));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(10, 10)));

        let result = uc.handle(&touch(TouchAction::Down, 1, 1, 10, 10));

        assert_eq!(result, Err(InjectionError::Platform("device gone".to_string())));
        assert_eq!(uc.stats().injected, 0);
    }

    // ── scroll ────────────────────────────────────────────────────────────────

    #[test]
    fn test_scroll_position_is_mapped() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_scroll()
            .with(eq(Point::new(20, 20)), eq(0.0), eq(-1.0))
            .times(1)
            .returning(|_, _, _| Ok(()));
        let uc = use_case(
            injector,
            DisplayGeometry {
                video_size: size(100, 100),
                target_size: size(200, 200),
                filter: None,
            },
        );

        uc.handle(&ControlEvent::Scroll {
            position: Position::new(Point::new(10, 10), size(100, 100)),
            h_scroll: 0.0,
            v_scroll: -1.0,
        })
        .unwrap();

        assert_eq!(uc.stats().injected, 1);
    }

    // ── geometry ──────────────────────────────────────────────────────────────

    #[test]
    fn test_set_geometry_swaps_mapper_for_following_events() {
        let mut injector = MockInputInjector::new();
        injector
            .expect_inject_touch()
            .with(eq(TouchAction::Down), eq(0), eq(Point::new(20, 20)), eq(1.0))
            .times(1)
            .returning(|_, _, _, _| Ok(()));
        let uc = use_case(injector, DisplayGeometry::passthrough(size(100, 100)));

        uc.handle(&ControlEvent::SetGeometry(DisplayGeometry {
            video_size: size(100, 100),
            target_size: size(200, 200),
            filter: None,
        }))
        .unwrap();
        uc.handle(&touch(TouchAction::Down, 10, 10, 100, 100)).unwrap();

        let stats = uc.stats();
        assert_eq!(stats.geometry_changes, 1);
        assert_eq!(stats.injected, 1);
        assert_eq!(uc.mapper().current().video_size(), size(100, 100));
    }

    #[test]
    fn test_clamp_pressure_handles_nan() {
        assert_eq!(clamp_pressure(f32::NAN), 1.0);
        assert_eq!(clamp_pressure(-0.5), 0.0);
        assert_eq!(clamp_pressure(0.25), 0.25);
    }
}
