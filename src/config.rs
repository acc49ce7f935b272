use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::engine::GuidanceEngine;
use crate::geometry::GeometryThresholds;
use crate::message::DEFAULT_MAX_SPOKEN_OBJECTS;
use crate::priority::PriorityTable;
use crate::ranker::DEFAULT_MAX_DETECTIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavGuideConfig {
    pub geometry: GeometryThresholds,
    pub ranking: RankingConfig,
    pub server: ServerConfig,
    /// Class name → navigational priority. Classes missing here are never
    /// surfaced; add a class to extend coverage without code changes.
    pub priorities: PriorityTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Maximum detections returned per frame
    pub max_detections: usize,
    /// Maximum ranked entries narrated in the spoken message
    pub max_spoken_objects: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP layer
    pub host: String,
    /// Listen port
    pub port: u16,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_detections: DEFAULT_MAX_DETECTIONS,
            max_spoken_objects: DEFAULT_MAX_SPOKEN_OBJECTS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for NavGuideConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryThresholds::default(),
            ranking: RankingConfig::default(),
            server: ServerConfig::default(),
            priorities: PriorityTable::default(),
        }
    }
}

impl NavGuideConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            // Create default config file
            let default_config = Self::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            fs::write(path, toml_content).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn build_engine(&self) -> GuidanceEngine {
        GuidanceEngine::new(
            self.priorities.clone(),
            self.geometry,
            self.ranking.max_detections,
            self.ranking.max_spoken_objects,
        )
    }
}
