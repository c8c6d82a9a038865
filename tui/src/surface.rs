//! Scrollable page surface for the analysis view.
//!
//! The draw pass records where each anchored section starts; the navigator
//! looks targets up here and requests scrolls. Smooth scrolls ease toward the
//! target over a short animation advanced by the frame loop.

use std::time::Duration;

use vigil_engine::{RenderSurface, ScrollAlign, ScrollBehavior, ScrollRequest};

const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(240);

#[derive(Debug, Clone)]
struct ScrollAnimation {
    from: u16,
    to: u16,
    elapsed: Duration,
    duration: Duration,
}

impl ScrollAnimation {
    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn position(&self) -> u16 {
        let t = ease_out_cubic(self.progress());
        let from = f32::from(self.from);
        let to = f32::from(self.to);
        (from + (to - from) * t).round() as u16
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Line-addressed document with named anchors and a scroll offset.
#[derive(Debug, Clone, Default)]
pub struct PageSurface {
    anchors: Vec<(String, u16)>,
    content_height: u16,
    viewport_height: u16,
    offset: u16,
    animation: Option<ScrollAnimation>,
}

impl PageSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendered layout: section anchors and total line count.
    pub fn set_layout(&mut self, anchors: Vec<(String, u16)>, content_height: u16) {
        self.anchors = anchors;
        self.content_height = content_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Forget the layout; nothing is a scroll target until the next draw.
    pub fn clear_layout(&mut self) {
        self.anchors.clear();
        self.content_height = 0;
        self.offset = 0;
        self.animation = None;
    }

    pub fn set_viewport(&mut self, height: u16) {
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    #[must_use]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    #[must_use]
    pub fn anchor(&self, id: &str) -> Option<u16> {
        self.anchors
            .iter()
            .find(|(anchor, _)| anchor == id)
            .map(|(_, line)| *line)
    }

    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// First visible line.
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.animation
            .as_ref()
            .map_or(self.offset, ScrollAnimation::position)
            .min(self.max_offset())
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Manual scroll by `lines`; interrupts any smooth scroll.
    pub fn scroll_by(&mut self, lines: i32) {
        let current = i32::from(self.offset());
        let max = i32::from(self.max_offset());
        self.animation = None;
        self.offset = (current + lines).clamp(0, max) as u16;
    }

    pub fn scroll_to_top(&mut self) {
        self.animation = None;
        self.offset = 0;
    }

    /// Advance a smooth scroll in progress.
    pub fn advance(&mut self, delta: Duration) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        animation.elapsed = animation.elapsed.saturating_add(delta);
        if animation.is_finished() {
            self.offset = animation.to.min(self.max_offset());
            self.animation = None;
        }
    }

    fn aligned_offset(&self, line: u16, align: ScrollAlign) -> u16 {
        let target = match align {
            ScrollAlign::Start => line,
            ScrollAlign::Center => line.saturating_sub(self.viewport_height / 2),
            ScrollAlign::End => line
                .saturating_add(1)
                .saturating_sub(self.viewport_height),
        };
        target.min(self.max_offset())
    }
}

impl RenderSurface for PageSurface {
    fn contains_target(&self, id: &str) -> bool {
        self.anchor(id).is_some()
    }

    fn scroll_into_view(&mut self, id: &str, request: ScrollRequest) {
        let Some(line) = self.anchor(id) else {
            return;
        };
        let to = self.aligned_offset(line, request.align);
        match request.behavior {
            ScrollBehavior::Instant => {
                self.animation = None;
                self.offset = to;
            }
            ScrollBehavior::Smooth => {
                let from = self.offset();
                self.offset = from;
                self.animation = Some(ScrollAnimation {
                    from,
                    to,
                    elapsed: Duration::ZERO,
                    duration: SMOOTH_SCROLL_DURATION,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> PageSurface {
        let mut surface = PageSurface::new();
        surface.set_viewport(10);
        surface.set_layout(
            vec![
                ("modules".into(), 5),
                ("demo".into(), 20),
                ("cases".into(), 40),
                ("about".into(), 95),
            ],
            100,
        );
        surface
    }

    #[test]
    fn contains_only_laid_out_anchors() {
        let mut surface = surface();
        assert!(surface.contains_target("demo"));
        assert!(!surface.contains_target("missing"));
        surface.clear_layout();
        assert!(!surface.contains_target("demo"));
    }

    #[test]
    fn smooth_scroll_eases_to_section_start() {
        let mut surface = surface();
        surface.scroll_into_view("cases", ScrollRequest::SMOOTH_START);
        assert!(surface.is_animating());
        assert_eq!(surface.offset(), 0);

        surface.advance(SMOOTH_SCROLL_DURATION / 2);
        let midway = surface.offset();
        assert!(midway > 0 && midway < 40, "midway offset {midway}");

        surface.advance(SMOOTH_SCROLL_DURATION);
        assert!(!surface.is_animating());
        assert_eq!(surface.offset(), 40);
    }

    #[test]
    fn instant_scroll_jumps() {
        let mut surface = surface();
        surface.scroll_into_view(
            "demo",
            ScrollRequest {
                behavior: ScrollBehavior::Instant,
                align: ScrollAlign::Start,
            },
        );
        assert_eq!(surface.offset(), 20);
    }

    #[test]
    fn scroll_target_is_clamped_to_content() {
        let mut surface = surface();
        surface.scroll_into_view(
            "about",
            ScrollRequest {
                behavior: ScrollBehavior::Instant,
                align: ScrollAlign::Start,
            },
        );
        assert_eq!(surface.offset(), 90);
    }

    #[test]
    fn manual_scroll_interrupts_animation() {
        let mut surface = surface();
        surface.scroll_into_view("cases", ScrollRequest::SMOOTH_START);
        surface.advance(SMOOTH_SCROLL_DURATION / 4);
        let before = surface.offset();
        surface.scroll_by(-1);
        assert!(!surface.is_animating());
        assert_eq!(surface.offset(), before.saturating_sub(1));

        surface.scroll_by(-1000);
        assert_eq!(surface.offset(), 0);
        surface.scroll_by(1000);
        assert_eq!(surface.offset(), surface.max_offset());
    }

    #[test]
    fn center_alignment() {
        let mut surface = surface();
        surface.scroll_into_view(
            "cases",
            ScrollRequest {
                behavior: ScrollBehavior::Instant,
                align: ScrollAlign::Center,
            },
        );
        assert_eq!(surface.offset(), 35);
    }
}
