//! Scroll offsets with optional smooth animation.

use wayfind_core::{ScrollAlignment, ScrollBehavior};

/// One scrollable axis: where it is now and where it is heading.
///
/// Smooth scrolls close a third of the remaining distance per
/// [`tick`](ScrollAxis::tick) (at least one cell), so long jumps ease out and
/// short ones finish in a frame or two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollAxis {
    current: i32,
    target: i32,
}

impl ScrollAxis {
    pub fn new() -> Self {
        Self::default()
    }

    /// The offset used for layout right now.
    pub fn offset(&self) -> i32 {
        self.current
    }

    /// The offset the axis is animating towards.
    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Head for `target`, jumping there immediately for
    /// [`ScrollBehavior::Instant`].
    pub fn scroll_to(&mut self, target: i32, behavior: ScrollBehavior) {
        self.target = target;
        if behavior == ScrollBehavior::Instant {
            self.current = target;
        }
    }

    /// Clamp both offsets into `0..=max`.
    pub fn clamp(&mut self, max: i32) {
        let max = max.max(0);
        self.current = self.current.clamp(0, max);
        self.target = self.target.clamp(0, max);
    }

    /// Advance one animation step. Returns `true` if the offset changed.
    pub fn tick(&mut self) -> bool {
        let remaining = self.target - self.current;
        if remaining == 0 {
            return false;
        }
        let step = (remaining.abs() / 3).max(1);
        self.current += step * remaining.signum();
        true
    }
}

/// Offset that places the span `start..start + len` (in content
/// coordinates) according to `align` within a viewport of `viewport` cells
/// currently scrolled to `current`. The result is not clamped.
pub fn aligned_offset(
    start: i32,
    len: i32,
    viewport: i32,
    current: i32,
    align: ScrollAlignment,
) -> i32 {
    match align {
        ScrollAlignment::Start => start,
        ScrollAlignment::Center => start + len / 2 - viewport / 2,
        ScrollAlignment::End => start + len - viewport,
        ScrollAlignment::Nearest => {
            if start < current {
                start
            } else if start + len > current + viewport {
                start + len - viewport
            } else {
                current
            }
        }
    }
}
