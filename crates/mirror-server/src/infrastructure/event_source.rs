//! Line-oriented control protocol.
//!
//! Each line carries one command: a prefix followed by a JSON document.
//!
//! ```text
//! LAEvent:{"event":"ActionDown","data":{"x":500,"y":1200}}
//! LAEvent:{"event":"ActionMove","data":{"x":450,"y":1200,"width":1080,"height":1920}}
//! LAEvent:{"event":"ActionUp","data":{"x":50,"y":1200}}
//! LAEvent:{"event":"Scroll","data":{"x":10,"y":20,"hscroll":0.0,"vscroll":-1.0}}
//! LAGeometry:{"video":{"width":1920,"height":1080},"target":{"width":1080,"height":1920},"filter":[0,1,-1,0,0,0]}
//! ```
//!
//! `width`/`height` on an event are the size of the frame the client measured
//! the point against.  They come as a pair: when both are omitted the current
//! video size is assumed, and a line carrying only one of them is rejected.

use mirror_core::{AffineMatrix, GeometryError, Point, Position, Size};
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::application::inject_input::{ControlEvent, InjectInputUseCase, TouchAction};
use crate::application::update_geometry::DisplayGeometry;

/// Prefix of input event lines.
pub const EVENT_PREFIX: &str = "LAEvent:";
/// Prefix of geometry change lines.
pub const GEOMETRY_PREFIX: &str = "LAGeometry:";

/// Error type for control line decoding.
#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("line does not start with a known prefix")]
    MissingPrefix,
    #[error("malformed control JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid claimed frame size: {0}")]
    Geometry(#[from] GeometryError),
    #[error("claimed frame size needs both width and height (got width={width:?}, height={height:?})")]
    PartialSize {
        width: Option<u32>,
        height: Option<u32>,
    },
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data")]
enum WireEvent {
    ActionDown(WireTouch),
    ActionMove(WireTouch),
    ActionUp(WireTouch),
    Scroll(WireScroll),
}

#[derive(Debug, Deserialize)]
struct WireTouch {
    x: i32,
    y: i32,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    pointer_id: u64,
    #[serde(default = "default_pressure")]
    pressure: f32,
}

#[derive(Debug, Deserialize)]
struct WireScroll {
    x: i32,
    y: i32,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    hscroll: f32,
    #[serde(default)]
    vscroll: f32,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    video: Size,
    #[serde(default)]
    target: Option<Size>,
    #[serde(default)]
    filter: Option<AffineMatrix>,
}

fn default_pressure() -> f32 {
    1.0
}

/// Builds the claimed position; the size is stated in full or not at all.
fn claimed_position(
    x: i32,
    y: i32,
    width: Option<u32>,
    height: Option<u32>,
    default_size: Size,
) -> Result<Position, EventParseError> {
    let size = match (width, height) {
        (Some(w), Some(h)) => Size::new(w, h)?,
        (None, None) => default_size,
        (width, height) => return Err(EventParseError::PartialSize { width, height }),
    };
    Ok(Position::new(Point::new(x, y), size))
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes one control line.
///
/// Returns `Ok(None)` for blank lines.  `default_size` is used for events that
/// do not state the frame size they were measured against.
///
/// # Errors
///
/// Returns [`EventParseError::MissingPrefix`] for unrecognized lines,
/// [`EventParseError::Json`] for malformed payloads,
/// [`EventParseError::Geometry`] for a zero claimed frame dimension, and
/// [`EventParseError::PartialSize`] when only one of `width`/`height` is given.
pub fn parse_line(line: &str, default_size: Size) -> Result<Option<ControlEvent>, EventParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if let Some(json) = line.strip_prefix(EVENT_PREFIX) {
        let wire: WireEvent = serde_json::from_str(json)?;
        return Ok(Some(decode_event(wire, default_size)?));
    }

    if let Some(json) = line.strip_prefix(GEOMETRY_PREFIX) {
        let wire: WireGeometry = serde_json::from_str(json)?;
        return Ok(Some(ControlEvent::SetGeometry(DisplayGeometry {
            video_size: wire.video,
            target_size: wire.target.unwrap_or(wire.video),
            filter: wire.filter,
        })));
    }

    Err(EventParseError::MissingPrefix)
}

fn decode_event(wire: WireEvent, default_size: Size) -> Result<ControlEvent, EventParseError> {
    let (action, touch) = match wire {
        WireEvent::ActionDown(t) => (TouchAction::Down, t),
        WireEvent::ActionMove(t) => (TouchAction::Move, t),
        WireEvent::ActionUp(t) => (TouchAction::Up, t),
        WireEvent::Scroll(s) => {
            return Ok(ControlEvent::Scroll {
                position: claimed_position(s.x, s.y, s.width, s.height, default_size)?,
                h_scroll: s.hscroll,
                v_scroll: s.vscroll,
            });
        }
    };

    Ok(ControlEvent::Touch {
        action,
        pointer_id: touch.pointer_id,
        position: claimed_position(touch.x, touch.y, touch.width, touch.height, default_size)?,
        pressure: touch.pressure,
    })
}

// ── Event loop ────────────────────────────────────────────────────────────────

/// Reads control lines from `reader` until EOF and feeds them to `use_case`.
///
/// Malformed lines and injection failures are logged and skipped; one bad
/// event never stops the stream.  Returns the number of events handled
/// successfully.
///
/// # Errors
///
/// Returns an I/O error only if reading from `reader` fails.
pub async fn run_event_loop<R>(reader: R, use_case: &InjectInputUseCase) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0u64;

    while let Some(line) = lines.next_line().await? {
        let default_size = use_case.mapper().current().video_size();
        let event = match parse_line(&line, default_size) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, line = %line, "ignoring malformed control line");
                continue;
            }
        };

        if let ControlEvent::SetGeometry(geometry) = &event {
            debug!(
                video_size = %geometry.video_size,
                target_size = %geometry.target_size,
                "geometry change requested"
            );
        }

        match use_case.handle(&event) {
            Ok(()) => handled += 1,
            Err(e) => warn!(error = %e, "failed to inject control event"),
        }
    }

    debug!(handled, "control stream closed");
    Ok(handled)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
