pub mod api;
pub mod config;
pub mod detection;
pub mod engine;
pub mod geometry;
pub mod message;
pub mod priority;
pub mod query;
pub mod ranker;

pub use detection::{AnnotatedDetection, BoundingBox, EngineError, FrameContext, GuidanceMessage, RawDetection};
pub use engine::{DetectResponse, GuidanceEngine, QueryDetectResponse};
