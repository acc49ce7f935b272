use std::cmp::Ordering;

use tracing::debug;

use crate::detection::{AnnotatedDetection, FrameContext, RawDetection};
use crate::geometry::GeometryThresholds;
use crate::priority::PriorityTable;

pub const DEFAULT_MAX_DETECTIONS: usize = 10;

/// Filters raw detections down to the navigation-relevant ones and orders
/// them by importance.
#[derive(Debug, Clone)]
pub struct DetectionRanker {
    table: PriorityTable,
    thresholds: GeometryThresholds,
    max_detections: usize,
}

impl DetectionRanker {
    pub fn new(table: PriorityTable, thresholds: GeometryThresholds, max_detections: usize) -> Self {
        Self {
            table,
            thresholds,
            max_detections,
        }
    }

    /// Rank a frame's detections: drop low-confidence and irrelevant classes,
    /// annotate the rest with position/distance/priority, sort by
    /// (priority desc, distance asc, area desc) and cap the result.
    ///
    /// The original input index is the final tie-breaker, so identical inputs
    /// always produce identical output.
    pub fn rank(&self, detections: &[RawDetection], frame: &FrameContext) -> Vec<AnnotatedDetection> {
        let total = detections.len();

        let mut annotated: Vec<(usize, AnnotatedDetection)> = detections
            .iter()
            .enumerate()
            .filter(|(_, det)| det.confidence >= frame.min_confidence())
            .filter_map(|(idx, det)| {
                let priority = self.table.priority_of(&det.class_name)?;
                let (position, distance, center) = self.thresholds.classify(&det.bbox, frame);
                let bbox = det.bbox.clamped(frame.frame_width(), frame.frame_height());
                Some((
                    idx,
                    AnnotatedDetection {
                        class_name: det.class_name.clone(),
                        confidence: det.confidence,
                        bbox,
                        center,
                        position,
                        distance,
                        priority,
                        bbox_area: bbox.area(),
                    },
                ))
            })
            .collect();

        annotated.sort_by(|(idx_a, a), (idx_b, b)| {
            b.priority
                .cmp(&a.priority)
                .then(a.distance.rank().cmp(&b.distance.rank()))
                .then(b.bbox_area.partial_cmp(&a.bbox_area).unwrap_or(Ordering::Equal))
                .then(idx_a.cmp(idx_b))
        });
        annotated.truncate(self.max_detections);

        debug!(
            total,
            relevant = annotated.len(),
            "ranked frame detections"
        );

        annotated.into_iter().map(|(_, det)| det).collect()
    }
}
