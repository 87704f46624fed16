//! Implementations of [`InputInjector`](crate::application::inject_input::InputInjector).
//!
//! Injecting into the device (uinput, the platform input manager, an
//! accessibility service) is owned by the device-side runtime, not by this
//! crate.  The server ships two stand-ins:
//!
//! | Type                | Purpose                                                |
//! |---------------------|--------------------------------------------------------|
//! | `TracingInjector`   | Logs every mapped event; default for the binary        |
//! | `RecordingInjector` | Records every call in memory for assertions in tests   |

pub mod mock;

use mirror_core::Point;
use tracing::info;

use crate::application::inject_input::{InjectionError, InputInjector, TouchAction};

/// An injector that only reports what it would inject.
#[derive(Debug, Default)]
pub struct TracingInjector;

impl TracingInjector {
    pub fn new() -> Self {
        Self
    }
}

impl InputInjector for TracingInjector {
    fn inject_touch(
        &self,
        action: TouchAction,
        pointer_id: u64,
        point: Point,
        pressure: f32,
    ) -> Result<(), InjectionError> {
        info!(?action, pointer_id, x = point.x, y = point.y, pressure, "touch");
        Ok(())
    }

    fn inject_scroll(
        &self,
        point: Point,
        h_scroll: f32,
        v_scroll: f32,
    ) -> Result<(), InjectionError> {
        info!(x = point.x, y = point.y, h_scroll, v_scroll, "scroll");
        Ok(())
    }
}
