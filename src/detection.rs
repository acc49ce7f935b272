use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Distance, Position};

/// Axis-aligned box in pixel coordinates, serialized as `[x_min, y_min, x_max, y_max]`
/// to stay byte-compatible with the existing frontend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min).max(0.0) * (self.y_max - self.y_min).max(0.0)
    }

    /// Clamp all coordinates to the frame so out-of-frame boxes never
    /// produce area ratios above 1.0 or centers outside the frame.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Self {
        let w = frame_width as f32;
        let h = frame_height as f32;
        Self {
            x_min: self.x_min.clamp(0.0, w),
            y_min: self.y_min.clamp(0.0, h),
            x_max: self.x_max.clamp(0.0, w),
            y_max: self.y_max.clamp(0.0, h),
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x_min, b.y_min, b.x_max, b.y_max]
    }
}

/// One object instance reported by the upstream detection model for a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDetection {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid frame dimensions {width}x{height}: both must be positive")]
    InvalidFrameContext { width: u32, height: u32 },
}

pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.4;

/// Coordinate space and acceptance threshold for one request.
///
/// Constructing one validates the dimensions, so everything downstream can
/// assume a non-degenerate frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    frame_width: u32,
    frame_height: u32,
    min_confidence: f32,
}

impl FrameContext {
    pub fn new(frame_width: u32, frame_height: u32, min_confidence: f32) -> Result<Self, EngineError> {
        if frame_width == 0 || frame_height == 0 {
            return Err(EngineError::InvalidFrameContext {
                width: frame_width,
                height: frame_height,
            });
        }
        Ok(Self {
            frame_width,
            frame_height,
            min_confidence,
        })
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn frame_area(&self) -> f32 {
        self.frame_width as f32 * self.frame_height as f32
    }
}

/// A detection that passed filtering, annotated with everything the
/// composer and the frontend need. Read-only once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDetection {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
    pub center: (f32, f32),
    pub position: Position,
    pub distance: Distance,
    pub priority: i32,
    pub bbox_area: f32,
}

/// The spoken output for one frame or query. `text` is always a complete,
/// non-empty sentence kept short enough for a single TTS utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl GuidanceMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            query: None,
        }
    }

    pub fn with_query(text: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            query: Some(query.into()),
        }
    }
}
