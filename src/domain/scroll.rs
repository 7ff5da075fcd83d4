use serde::{Deserialize, Serialize};

/// How far the list scrolls when the active option leaves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollStrategy {
    /// Scroll by one option height; targets further away are aligned with the
    /// nearest edge.
    Step,
    /// Scroll so the option is visible with a margin of a third of its height.
    #[default]
    Precise,
}

/// Scrollable container, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub top: i32,
    pub height: i32,
    pub scroll_top: i32,
    pub scroll_height: i32,
}

impl Viewport {
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }
}

/// An item inside the container, positioned relative to the content origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemBox {
    pub offset_top: i32,
    pub height: i32,
}

impl ItemBox {
    /// Visible top edge given the container's current scroll position.
    pub fn top_in(&self, viewport: &Viewport) -> i32 {
        viewport.top + self.offset_top - viewport.scroll_top
    }

    pub fn bottom_in(&self, viewport: &Viewport) -> i32 {
        self.top_in(viewport) + self.height
    }
}

/// Returns the scroll position that brings `target` into view, or `None`
/// when no scroll is needed.
pub fn reconcile(viewport: &Viewport, target: &ItemBox, strategy: ScrollStrategy) -> Option<i32> {
    let next = match strategy {
        ScrollStrategy::Step => step(viewport, target),
        ScrollStrategy::Precise => precise(viewport, target),
    }?;
    (next != viewport.scroll_top).then_some(next)
}

/// Applies `reconcile` in place. Returns whether the viewport moved.
pub fn scroll_into_view(viewport: &mut Viewport, target: &ItemBox, strategy: ScrollStrategy) -> bool {
    match reconcile(viewport, target, strategy) {
        Some(next) => {
            viewport.scroll_top = next;
            true
        }
        None => false,
    }
}

fn step(viewport: &Viewport, target: &ItemBox) -> Option<i32> {
    let max_scroll = (viewport.scroll_height - viewport.height).max(0);
    // One item height, unless that still leaves the target outside; then the
    // target's edge is aligned with the viewport edge.
    let (stepped, aligned) = if target.bottom_in(viewport) > viewport.bottom() {
        (
            viewport.scroll_top + target.height,
            target.offset_top + target.height - viewport.height,
        )
    } else if target.top_in(viewport) < viewport.top {
        (viewport.scroll_top - target.height, target.offset_top)
    } else {
        return None;
    };
    let stepped = stepped.clamp(0, max_scroll);
    let moved = Viewport {
        scroll_top: stepped,
        ..*viewport
    };
    let next = if is_visible(&moved, target) {
        stepped
    } else {
        aligned
    };
    Some(next.clamp(0, max_scroll))
}

fn is_visible(viewport: &Viewport, target: &ItemBox) -> bool {
    target.top_in(viewport) >= viewport.top && target.bottom_in(viewport) <= viewport.bottom()
}

fn precise(viewport: &Viewport, target: &ItemBox) -> Option<i32> {
    // A third of the item, rounded up so two-row items still get a margin.
    let over_scroll = (target.height + 2) / 3;
    if target.bottom_in(viewport) + over_scroll > viewport.bottom() {
        let wanted = target.offset_top + target.height - viewport.height + over_scroll;
        Some(wanted.min(viewport.scroll_height).max(0))
    } else if target.top_in(viewport) - over_scroll < viewport.top {
        Some((target.offset_top - over_scroll).max(0))
    } else {
        None
    }
}
