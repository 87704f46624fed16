//! UpdateGeometryUseCase: builds a mapper per geometry epoch and swaps it in.
//!
//! # Geometry epochs (for beginners)
//!
//! The mapping from client coordinates to device coordinates depends on three
//! things: the size the video is encoded at, the size of the device-side
//! target frame, and an optional filter transform (rotation, crop,
//! letterbox).  Whenever any of them changes a new *epoch* starts.
//!
//! Mappers are never edited in place.  [`build_mapper`] builds a fresh one and
//! [`SharedMapper::replace`] swaps the `Arc` in a single step, so an event that
//! is being mapped concurrently sees either the whole old mapper or the whole
//! new one.

use std::sync::{Arc, PoisonError, RwLock};

use mirror_core::{AffineMatrix, PositionMapper, Size};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The inputs of one geometry epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// Size the video stream is currently encoded at.
    pub video_size: Size,
    /// Size of the device-side frame positions should land in.
    pub target_size: Size,
    /// Rotation/crop compensation in normalized coordinates, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<AffineMatrix>,
}

impl DisplayGeometry {
    /// A geometry with no filter where video and target sizes are equal.
    pub fn passthrough(size: Size) -> Self {
        Self {
            video_size: size,
            target_size: size,
            filter: None,
        }
    }
}

/// Builds the [`PositionMapper`] for `geometry`.
pub fn build_mapper(geometry: &DisplayGeometry) -> PositionMapper {
    let mapper = PositionMapper::create(geometry.video_size, geometry.filter, geometry.target_size);
    info!(
        video_size = %geometry.video_size,
        target_size = %geometry.target_size,
        filtered = geometry.filter.is_some(),
        passthrough = mapper.video_to_device_matrix().is_none(),
        "built position mapper"
    );
    mapper
}

/// The session's "current mapper" slot.
///
/// Readers take a cheap `Arc` snapshot and map without holding the lock.
pub struct SharedMapper {
    current: RwLock<Arc<PositionMapper>>,
}

impl SharedMapper {
    /// Creates a slot holding `mapper`.
    pub fn new(mapper: PositionMapper) -> Self {
        Self {
            current: RwLock::new(Arc::new(mapper)),
        }
    }

    /// Creates a slot holding the mapper for `geometry`.
    pub fn from_geometry(geometry: &DisplayGeometry) -> Self {
        Self::new(build_mapper(geometry))
    }

    /// Returns a snapshot of the current mapper.
    pub fn current(&self) -> Arc<PositionMapper> {
        // The guarded value is an `Arc` that is only ever replaced whole, so a
        // poisoned lock still holds a valid mapper.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Swaps in `mapper` and returns the one it supersedes.
    pub fn replace(&self, mapper: PositionMapper) -> Arc<PositionMapper> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(mapper))
    }

    /// Starts a new geometry epoch.
    pub fn apply_geometry(&self, geometry: &DisplayGeometry) -> Arc<PositionMapper> {
        self.replace(build_mapper(geometry))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
