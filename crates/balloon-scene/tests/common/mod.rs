#![allow(dead_code)]

use std::collections::HashMap;

use balloon_scene::{LayoutHost, TargetId};
use engine_core::Rect;

pub const HEADER_GREY: [u8; 3] = [0xcc, 0xcc, 0xcc];
pub const BODY_GREY: [u8; 3] = [0xee, 0xee, 0xee];

/// Layout host with fixed rects that tests move around by hand.
pub struct MockHost {
    pub viewport: Rect,
    pub content: Rect,
    pub header: Rect,
    pub targets: HashMap<TargetId, Rect>,
    pub device_pixel_ratio: f32,
    pub primary: Option<String>,
}

impl MockHost {
    pub fn new(device_pixel_ratio: f32) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            viewport: Rect::new(0.0, 0.0, 1024.0, 768.0),
            content: Rect::new(0.0, 0.0, 280.0, 146.0),
            header: Rect::new(0.0, 0.0, 280.0, 40.0),
            targets: HashMap::new(),
            device_pixel_ratio,
            primary: None,
        }
    }

    pub fn with_target(mut self, id: u64, rect: Rect) -> Self {
        self.targets.insert(TargetId(id), rect);
        self
    }
}

impl LayoutHost for MockHost {
    fn viewport_rect(&self) -> Rect {
        self.viewport
    }

    fn target_rect(&self, target: TargetId) -> Option<Rect> {
        self.targets.get(&target).copied()
    }

    fn content_rect(&self) -> Rect {
        self.content
    }

    fn header_rect(&self) -> Rect {
        self.header
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn primary_color(&self) -> Option<String> {
        self.primary.clone()
    }
}

pub fn assert_rgb_near(actual: [u8; 4], expected: [u8; 3], at: (u32, u32)) {
    assert_eq!(actual[3], 255, "pixel {at:?} not opaque: {actual:?}");
    for channel in 0..3 {
        let diff = (actual[channel] as i16 - expected[channel] as i16).abs();
        assert!(diff <= 1, "pixel {at:?} is {actual:?}, expected {expected:?}");
    }
}
