//! Host scroll-position store

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    #[default]
    Vertical,
}

impl Axis {
    /// Any held modifier turns the wheel sideways
    #[inline]
    pub fn from_modifiers(modifiers_held: bool) -> Self {
        if modifiers_held {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

/// Scroll position of an editing surface, owned by the host
///
/// The engine borrows the store for each call and never keeps it. When the
/// host finishes a discrete scroll animation it reports that through
/// `ScrollEngine::on_scroll_settled`.
pub trait ScrollStore {
    /// Current non-negative offset along `axis`
    fn offset(&self, axis: Axis) -> i32;

    /// Move to `offset` along `axis`
    fn set_offset(&mut self, axis: Axis, offset: i32);

    /// Turn off the host's own scroll animation so the engine is the only driver
    fn disable_builtin_animation(&mut self);
}

/// In-memory store that records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    horizontal: i32,
    vertical: i32,
    builtin_animation_disabled: bool,
    writes: Vec<(Axis, i32)>,
}

impl MemoryStore {
    pub fn with_offsets(horizontal: i32, vertical: i32) -> Self {
        Self {
            horizontal,
            vertical,
            ..Default::default()
        }
    }

    /// Every `set_offset` call in order
    pub fn writes(&self) -> &[(Axis, i32)] {
        &self.writes
    }

    pub fn is_builtin_animation_disabled(&self) -> bool {
        self.builtin_animation_disabled
    }
}

impl ScrollStore for MemoryStore {
    fn offset(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    fn set_offset(&mut self, axis: Axis, offset: i32) {
        match axis {
            Axis::Horizontal => self.horizontal = offset,
            Axis::Vertical => self.vertical = offset,
        }
        self.writes.push((axis, offset));
    }

    fn disable_builtin_animation(&mut self) {
        self.builtin_animation_disabled = true;
    }
}
