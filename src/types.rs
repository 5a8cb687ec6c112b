use core::fmt;

/// A half-open `[start, end)` range of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Range {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Alignment used by [`crate::VirtualList::scroll_to_index`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Leaves the scroll position alone when the item is fully visible, otherwise
    /// scrolls the minimal distance to reveal it.
    Auto,
}

/// One of the two sentinel spacers bounding the rendered region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spacer {
    Top,
    Bottom,
}

/// A non-negative length in logical pixels, rounded to 3 decimal places.
///
/// `Display` renders CSS text, e.g. `Px(12.5)` → `"12.5px"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Px(f64);

impl Px {
    pub const ZERO: Self = Self(0.0);

    /// Normalizes `value`: non-finite and negative inputs become `0`, everything else is
    /// rounded to 3 decimal places.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        // `f64::round` is not available in `core`; values here are positive, so
        // truncating after a half-unit bias rounds half-up.
        let scaled = value * 1000.0 + 0.5;
        if scaled >= u64::MAX as f64 {
            return Self(value);
        }
        Self((scaled as u64) as f64 / 1000.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub(crate) fn differs_from(self, other: Px, threshold: f64) -> bool {
        let d = self.0 - other.0;
        d >= threshold || d <= -threshold
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Extra context handed to mount/unmount hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountMeta<'a> {
    /// The stable key the target was tagged with.
    pub key: &'a str,
    /// The range being applied when the hook fires.
    pub range: Range,
}

/// Opaque handle returned by a [`crate::FrameScheduler`] for a deferred callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHandle(pub u64);

/// A lightweight summary of a list's state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListSnapshot {
    pub range: Range,
    pub len: usize,
    pub total_height: f64,
    /// Number of live render targets.
    pub mounted: usize,
    /// Number of slots whose height came from a real measurement.
    pub measured: usize,
    pub top_spacer: Px,
    pub bottom_spacer: Px,
}
