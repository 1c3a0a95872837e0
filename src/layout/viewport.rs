//! Viewport state for the scroll container.

use serde::{Deserialize, Serialize};

use crate::config::non_negative;

/// Viewport state - the visible area of the table body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    /// Vertical scroll position in content coordinates
    pub scroll_top: f32,
    /// Horizontal scroll position in content coordinates
    pub scroll_left: f32,
    /// Container width in pixels
    pub width: f32,
    /// Container height in pixels
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Viewport {
    /// Create a viewport of the given size scrolled to the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            scroll_left: 0.0,
            width,
            height,
        }
    }

    /// Same viewport scrolled to `scroll_top`
    #[must_use]
    pub fn at(mut self, scroll_top: f32) -> Self {
        self.scroll_top = scroll_top;
        self
    }

    /// Copy with every measurement mapped into `[0, inf)`.
    ///
    /// Hosts occasionally report negative scroll (overscroll bounce) or NaN
    /// before the first layout; both behave like zero.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            scroll_top: non_negative(self.scroll_top),
            scroll_left: non_negative(self.scroll_left),
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }

    /// Largest valid `scroll_top` for content of the given height
    pub fn max_scroll_top(&self, content_height: f32) -> f32 {
        (content_height - self.height).max(0.0)
    }

    /// Largest valid `scroll_left` for content of the given width
    pub fn max_scroll_left(&self, content_width: f32) -> f32 {
        (content_width - self.width).max(0.0)
    }

    /// Clamp scroll position to `[0, content - viewport]` on both axes.
    pub fn clamp_scroll(&mut self, content_width: f32, content_height: f32) {
        *self = self.sanitized();
        self.scroll_left = self
            .scroll_left
            .clamp(0.0, self.max_scroll_left(non_negative(content_width)));
        self.scroll_top = self
            .scroll_top
            .clamp(0.0, self.max_scroll_top(non_negative(content_height)));
    }

    /// Scroll by delta amounts, returning the applied delta if anything moved.
    pub fn scroll_by(
        &mut self,
        delta_x: f32,
        delta_y: f32,
        content_width: f32,
        content_height: f32,
    ) -> Option<(f32, f32)> {
        let before = (self.scroll_left, self.scroll_top);
        self.scroll_left += delta_x;
        self.scroll_top += delta_y;
        self.clamp_scroll(content_width, content_height);
        let dx = self.scroll_left - before.0;
        let dy = self.scroll_top - before.1;
        if dx.abs() > f32::EPSILON || dy.abs() > f32::EPSILON {
            Some((dx, dy))
        } else {
            None
        }
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, content_width: f32, content_height: f32) {
        self.scroll_left = x;
        self.scroll_top = y;
        self.clamp_scroll(content_width, content_height);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}
