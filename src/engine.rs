use serde::{Deserialize, Serialize};
use tracing::info;

use crate::detection::{AnnotatedDetection, EngineError, FrameContext, RawDetection};
use crate::geometry::GeometryThresholds;
use crate::message::MessageComposer;
use crate::priority::PriorityTable;
use crate::query::QueryInterpreter;
use crate::ranker::DetectionRanker;

/// Response for a plain detection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub message: String,
    pub detections: Vec<AnnotatedDetection>,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// Response for a detection request carrying a user question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDetectResponse {
    pub message: String,
    pub query: String,
    pub detections: Vec<AnnotatedDetection>,
}

/// The detection interpretation engine: rank the frame's detections, then
/// compose guidance text (or answer a question about the frame).
///
/// Pure and stateless across requests; nothing here blocks or performs I/O,
/// so one engine value can serve concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct GuidanceEngine {
    ranker: DetectionRanker,
    composer: MessageComposer,
    interpreter: QueryInterpreter,
}

impl GuidanceEngine {
    pub fn new(table: PriorityTable, thresholds: GeometryThresholds, max_detections: usize, max_spoken: usize) -> Self {
        let composer = MessageComposer::new(max_spoken);
        Self {
            ranker: DetectionRanker::new(table, thresholds, max_detections),
            interpreter: QueryInterpreter::new(composer.clone()),
            composer,
        }
    }

    pub fn detect(
        &self,
        detections: &[RawDetection],
        frame_width: u32,
        frame_height: u32,
        min_confidence: f32,
    ) -> Result<DetectResponse, EngineError> {
        let frame = FrameContext::new(frame_width, frame_height, min_confidence)?;
        let ranked = self.ranker.rank(detections, &frame);
        let message = self.composer.compose(&ranked);

        info!(
            raw = detections.len(),
            relevant = ranked.len(),
            "composed guidance message"
        );

        Ok(DetectResponse {
            message: message.text,
            detections: ranked,
            frame_width,
            frame_height,
        })
    }

    pub fn detect_with_query(
        &self,
        detections: &[RawDetection],
        frame_width: u32,
        frame_height: u32,
        min_confidence: f32,
        query: &str,
    ) -> Result<QueryDetectResponse, EngineError> {
        let frame = FrameContext::new(frame_width, frame_height, min_confidence)?;
        let ranked = self.ranker.rank(detections, &frame);
        let message = self.interpreter.answer(query, &ranked);

        info!(
            raw = detections.len(),
            relevant = ranked.len(),
            query,
            "answered frame query"
        );

        Ok(QueryDetectResponse {
            message: message.text,
            query: message.query.unwrap_or_else(|| query.to_string()),
            detections: ranked,
        })
    }
}

impl Default for GuidanceEngine {
    fn default() -> Self {
        Self::new(
            PriorityTable::default(),
            GeometryThresholds::default(),
            crate::ranker::DEFAULT_MAX_DETECTIONS,
            crate::message::DEFAULT_MAX_SPOKEN_OBJECTS,
        )
    }
}
