//! Widget configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Difficulty, LineTone};

/// Stroke colours per line tone
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub correct: String,
    pub incorrect: String,
    pub pending: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            correct: "#22c55e".to_string(),
            incorrect: "#ef4444".to_string(),
            pending: "#facc15".to_string(),
        }
    }
}

impl Palette {
    pub fn color(&self, tone: LineTone) -> &str {
        match tone {
            LineTone::Correct => &self.correct,
            LineTone::Incorrect => &self.incorrect,
            LineTone::Pending => &self.pending,
        }
    }
}

/// Session and overlay settings; every field has a default
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizConfig {
    /// Fixed shuffle seed; entropy when absent
    pub seed: Option<u64>,
    pub starting_tier: Difficulty,
    pub palette: Palette,
    pub stroke_width: f64,
    pub arrowheads: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            seed: None,
            starting_tier: Difficulty::Easy,
            palette: Palette::default(),
            stroke_width: 5.0,
            arrowheads: true,
        }
    }
}

impl QuizConfig {
    /// Parse a config document. An empty string yields the defaults.
    ///
    /// @param json - e.g. `{"seed":7,"startingTier":"medium","strokeWidth":3}`
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: QuizConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stroke_width.is_nan() || self.stroke_width <= 0.0 {
            return Err(ConfigError::StrokeWidth(self.stroke_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(QuizConfig::from_json("").unwrap(), QuizConfig::default());
        assert_eq!(QuizConfig::from_json("{}").unwrap(), QuizConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config =
            QuizConfig::from_json(r##"{"seed": 9, "startingTier": "hard", "palette": {"pending": "#000"}}"##)
                .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.starting_tier, Difficulty::Hard);
        assert_eq!(config.palette.pending, "#000");
        assert_eq!(config.palette.correct, "#22c55e");
        assert_eq!(config.stroke_width, 5.0);
        assert!(config.arrowheads);
    }

    #[test]
    fn rejects_bad_stroke_width() {
        assert!(matches!(
            QuizConfig::from_json(r#"{"strokeWidth": 0}"#),
            Err(ConfigError::StrokeWidth(_))
        ));
        assert!(matches!(
            QuizConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
