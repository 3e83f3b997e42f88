//! Screen-space rectangles and layout queries
//!
//! All coordinates are viewport pixels with the origin at the top-left and
//! y growing downward, matching `getBoundingClientRect`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rectangle of the given size whose center is `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}

/// On-screen elements the evasion logic cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// The button that runs away
    DeclineButton,
    /// The button that advances to the celebration
    AcceptButton,
    /// Question heading
    Title,
    /// Taunt message line
    Message,
    /// Round portrait above the question
    Image,
}

impl Element {
    /// Elements the decline button must keep clear of
    pub const AVOID: [Element; 4] = [
        Element::AcceptButton,
        Element::Title,
        Element::Message,
        Element::Image,
    ];

    /// DOM id of the element in the page
    pub fn dom_id(&self) -> &'static str {
        match self {
            Element::DeclineButton => "decline-btn",
            Element::AcceptButton => "accept-btn",
            Element::Title => "question-title",
            Element::Message => "taunt",
            Element::Image => "question-image",
        }
    }
}

/// Read-only access to live layout geometry
pub trait GeometryProvider {
    /// Current viewport size
    fn viewport(&self) -> Vec2;

    /// Current bounding rectangle of `element`, or `None` if it is not mounted
    fn rect(&self, element: Element) -> Option<Rect>;
}

/// A static layout snapshot, for headless runs
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    viewport: Vec2,
    rects: HashMap<Element, Rect>,
}

impl FixedLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            rects: HashMap::new(),
        }
    }

    pub fn with(mut self, element: Element, rect: Rect) -> Self {
        self.set(element, rect);
        self
    }

    pub fn set(&mut self, element: Element, rect: Rect) {
        self.rects.insert(element, rect);
    }
}

impl GeometryProvider for FixedLayout {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn rect(&self, element: Element) -> Option<Rect> {
        self.rects.get(&element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(100.0, 400.0, 80.0, 40.0);
        assert_eq!(r.right(), 180.0);
        assert_eq!(r.bottom(), 440.0);
        assert_eq!(r.center(), Vec2::new(140.0, 420.0));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(50.0, 100.0, 300.0, 80.0).inflate(30.0);
        assert_eq!(r, Rect::new(20.0, 70.0, 360.0, 140.0));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(20.0, 0.0, 10.0, 10.0)));
        // Touching edges is not an overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_from_center_round_trips_center() {
        let r = Rect::from_center(Vec2::new(50.0, 60.0), Vec2::new(20.0, 10.0));
        assert_eq!(r.left, 40.0);
        assert_eq!(r.top, 55.0);
        assert_eq!(r.center(), Vec2::new(50.0, 60.0));
    }

    #[test]
    fn test_fixed_layout_lookup() {
        let mut layout = FixedLayout::new(360.0, 640.0)
            .with(Element::Title, Rect::new(50.0, 100.0, 300.0, 80.0));
        assert_eq!(layout.viewport(), Vec2::new(360.0, 640.0));
        assert!(layout.rect(Element::Title).is_some());
        assert!(layout.rect(Element::Image).is_none());

        layout.set(Element::Title, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(layout.rect(Element::Title), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
