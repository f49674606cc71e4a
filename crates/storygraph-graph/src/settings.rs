use crate::curvature::CurvatureAssigner;
use crate::summarize::{DEFAULT_MAX_KEYWORDS, KeywordExtractor, TextSummarizer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Keywords kept in a summarized choice label.
    pub max_keywords: usize,
    /// Roundness of the innermost fanned edges.
    pub base_roundness: f32,
    /// Extra roundness per unit of distance from the fan center.
    pub roundness_step: f32,
    pub self_loop_roundness: f32,
    pub failure_label: String,
    /// Placed between a choice summary and its first requirement.
    pub annotation_separator: String,
    /// Draw lone conditional edges as straight lines.
    pub straight_conditionals: bool,
    pub extra_stopwords: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            base_roundness: 0.2,
            roundness_step: 0.2,
            self_loop_roundness: 0.6,
            failure_label: "(fail)".to_string(),
            annotation_separator: " | ".to_string(),
            straight_conditionals: false,
            extra_stopwords: Vec::new(),
        }
    }
}

impl PlannerSettings {
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Invalid planner settings")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        Self::from_json_str(&content)
    }

    pub fn curvature(&self) -> CurvatureAssigner {
        CurvatureAssigner {
            base_roundness: self.base_roundness,
            roundness_step: self.roundness_step,
            self_loop_roundness: self.self_loop_roundness,
        }
    }

    pub fn summarizer(&self) -> TextSummarizer {
        TextSummarizer::new(self.max_keywords).with_extractor(
            KeywordExtractor::english().with_extra_stopwords(&self.extra_stopwords),
        )
    }
}
