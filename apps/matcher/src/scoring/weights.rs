use serde::{Deserialize, Serialize};

/// Component weights of the composite score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub semantic: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill: 0.40,
            experience: 0.25,
            education: 0.15,
            semantic: 0.20,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.skill + self.experience + self.education + self.semantic
    }

    /// Weighted sum of component scores, clamped to [0, 100].
    pub fn combine(&self, skill: f64, experience: f64, education: f64, semantic: f64) -> f64 {
        (self.skill * skill
            + self.experience * experience
            + self.education * education
            + self.semantic * semantic)
            .clamp(0.0, 100.0)
    }
}
