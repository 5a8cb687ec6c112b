use alloc::string::String;

use virtual_list::{Container, FrameScheduler, ScrollElement, VirtualList};

/// Pins the viewport to an item identity so the visible content stays put while data changes,
/// e.g. when older chat messages are loaded above the current ones.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub key: String,
    /// How far the scroll offset was past the anchored item's start.
    pub offset_in_viewport: f64,
}

/// Anchors the first item visible at `scroll_top`.
///
/// The key is read from the list's key provider, so capture before the data changes.
/// Returns `None` if nothing is visible.
pub fn capture_anchor<C: Container, F: FrameScheduler>(
    list: &VirtualList<C, F>,
    scroll_top: f64,
    viewport_height: f64,
) -> Option<ScrollAnchor> {
    let visible = list.visible_range_for(scroll_top, viewport_height);
    if visible.is_empty() {
        return None;
    }
    let index = visible.start;
    let start = list.get_offset_for_index(index);
    let key = (list.options().get_item_key)(index);
    Some(ScrollAnchor {
        key,
        offset_in_viewport: (scroll_top - start).max(0.0),
    })
}

/// Scrolls `element` back to `anchor` and schedules a window update.
///
/// `key_to_index` resolves keys against the new data. The list's length is re-synced first.
///
/// Returns the applied (clamped) offset, or `None` if the key is gone.
pub fn apply_anchor<C: Container, F: FrameScheduler>(
    list: &mut VirtualList<C, F>,
    element: &mut impl ScrollElement,
    anchor: &ScrollAnchor,
    mut key_to_index: impl FnMut(&str) -> Option<usize>,
) -> Option<f64> {
    let index = key_to_index(&anchor.key)?;
    let len = (list.options().get_item_count)();
    list.set_data_length(len);
    if index >= len {
        return None;
    }

    let start = list.get_offset_for_index(index);
    let view = element.viewport_height();
    let view = if view.is_finite() { view.max(0.0) } else { 0.0 };
    let max = (list.get_total_height() - view).max(0.0);
    let offset = (start + anchor.offset_in_viewport).max(0.0).min(max);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "virtual_list",
        key = %anchor.key,
        index,
        offset,
        "apply_anchor"
    );

    element.set_scroll_top(offset);
    list.handle_scroll_event();
    Some(offset)
}
