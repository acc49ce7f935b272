use serde::{Deserialize, Serialize};

use crate::detection::{BoundingBox, FrameContext};

/// Horizontal third of the frame the object's center falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    Right,
}

/// Coarse distance bucket estimated from how much of the frame the box covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    Close,
    Medium,
    Far,
}

impl Distance {
    /// Sort key: closer objects rank earlier.
    pub fn rank(&self) -> u8 {
        match self {
            Distance::Close => 0,
            Distance::Medium => 1,
            Distance::Far => 2,
        }
    }
}

/// Area-ratio cutoffs for the distance buckets. These are heuristic and
/// depend on camera field of view, so they live in config rather than code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeometryThresholds {
    /// Box covering more than this fraction of the frame reads as close.
    pub close_area_ratio: f32,
    /// Above this fraction (and below close) reads as medium.
    pub medium_area_ratio: f32,
}

pub const DEFAULT_CLOSE_AREA_RATIO: f32 = 0.25;
pub const DEFAULT_MEDIUM_AREA_RATIO: f32 = 0.08;

impl Default for GeometryThresholds {
    fn default() -> Self {
        Self {
            close_area_ratio: DEFAULT_CLOSE_AREA_RATIO,
            medium_area_ratio: DEFAULT_MEDIUM_AREA_RATIO,
        }
    }
}

impl GeometryThresholds {
    /// Classify a bounding box within a validated frame.
    ///
    /// Returns the position bucket, distance bucket, and the box center
    /// (computed after clamping to frame bounds). Degenerate boxes have
    /// zero area and classify as far.
    pub fn classify(&self, bbox: &BoundingBox, frame: &FrameContext) -> (Position, Distance, (f32, f32)) {
        let clamped = bbox.clamped(frame.frame_width(), frame.frame_height());
        let center = clamped.center();

        let width = frame.frame_width() as f32;
        let position = if center.0 < width / 3.0 {
            Position::Left
        } else if center.0 > 2.0 * width / 3.0 {
            Position::Right
        } else {
            Position::Center
        };

        let area_ratio = clamped.area() / frame.frame_area();
        let distance = if area_ratio > self.close_area_ratio {
            Distance::Close
        } else if area_ratio > self.medium_area_ratio {
            Distance::Medium
        } else {
            Distance::Far
        };

        (position, distance, center)
    }
}
