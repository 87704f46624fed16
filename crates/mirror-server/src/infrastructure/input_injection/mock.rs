//! Recording injector for tests.
//!
//! # Why a recording injector?
//!
//! A real injector makes the device act on every event, which cannot be
//! observed from Rust test code.  `RecordingInjector` replaces the device with
//! simple in-memory recording: each call is pushed into a `Mutex<Vec<...>>` so
//! test assertions can inspect exactly what was injected and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let injector = Arc::new(RecordingInjector::new());
//! let use_case = InjectInputUseCase::new(injector.clone(), mapper);
//!
//! use_case.handle(&event).unwrap();
//!
//! let touches = injector.touches.lock().unwrap();
//! assert_eq!(touches[0].point, Point::new(400, 200));
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! `InjectionError::Platform`, to exercise error-handling paths in callers.

use std::sync::Mutex;

use mirror_core::Point;

use crate::application::inject_input::{InjectionError, InputInjector, TouchAction};

/// One recorded `inject_touch` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTouch {
    pub action: TouchAction,
    pub pointer_id: u64,
    pub point: Point,
    pub pressure: f32,
}

/// One recorded `inject_scroll` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedScroll {
    pub point: Point,
    pub h_scroll: f32,
    pub v_scroll: f32,
}

/// An injector that records all calls without touching any device.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    pub touches: Mutex<Vec<RecordedTouch>>,
    pub scrolls: Mutex<Vec<RecordedScroll>>,
    /// When `true`, every method returns `InjectionError::Platform`.
    pub should_fail: bool,
}

impl RecordingInjector {
    /// Creates an injector with empty records and `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an injector whose every call fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Points of all recorded touches, in injection order.
    pub fn touch_points(&self) -> Vec<Point> {
        self.touches
            .lock()
            .map(|touches| touches.iter().map(|t| t.point).collect())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("injected failure".to_string()));
        }
        Ok(())
    }
}

impl InputInjector for RecordingInjector {
    fn inject_touch(
        &self,
        action: TouchAction,
        pointer_id: u64,
        point: Point,
        pressure: f32,
    ) -> Result<(), InjectionError> {
        self.check()?;
        self.touches
            .lock()
            .map_err(|e| InjectionError::Platform(e.to_string()))?
            .push(RecordedTouch {
                action,
                pointer_id,
                point,
                pressure,
            });
        Ok(())
    }

    fn inject_scroll(
        &self,
        point: Point,
        h_scroll: f32,
        v_scroll: f32,
    ) -> Result<(), InjectionError> {
        self.check()?;
        self.scrolls
            .lock()
            .map_err(|e| InjectionError::Platform(e.to_string()))?
            .push(RecordedScroll {
                point,
                h_scroll,
                v_scroll,
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_touches_in_order() {
        let injector = RecordingInjector::new();
        injector
            .inject_touch(TouchAction::Down, 0, Point::new(1, 1), 1.0)
            .unwrap();
        injector
            .inject_touch(TouchAction::Up, 0, Point::new(2, 2), 0.0)
            .unwrap();

        assert_eq!(injector.touch_points(), vec![Point::new(1, 1), Point::new(2, 2)]);
        assert_eq!(injector.touches.lock().unwrap()[1].action, TouchAction::Up);
    }

    #[test]
    fn test_failing_injector_records_nothing() {
        let injector = RecordingInjector::failing();
        assert!(injector.inject_scroll(Point::new(0, 0), 1.0, 0.0).is_err());
        assert!(injector.scrolls.lock().unwrap().is_empty());
    }
}
