use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the student prefers to learn. Biases prompt phrasing; `Auditory`
/// additionally triggers roadmap narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    #[serde(rename = "Reading/Writing")]
    ReadingWriting,
    Kinesthetic,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::ReadingWriting => "Reading/Writing",
            LearningStyle::Kinesthetic => "Kinesthetic",
        }
    }

    pub fn is_auditory(&self) -> bool {
        matches!(self, LearningStyle::Auditory)
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The profile collected by the intake form. Lives only in session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[validate(length(min = 10, message = "Please provide more details."))]
    pub academic_background: String,
    /// Comma-separated.
    #[validate(length(min = 3, message = "Please list at least one interest."))]
    pub interests: String,
    /// Comma-separated.
    #[validate(length(min = 3, message = "Please list at least one skill."))]
    pub skills: String,
    #[validate(length(min = 10, message = "Please describe your career goals."))]
    pub goals: String,
    pub learning_style: LearningStyle,
}

impl StudentProfile {
    /// Splits the comma-separated skills field into trimmed, non-empty entries.
    pub fn skill_list(&self) -> Vec<String> {
        split_list(&self.skills)
    }

    /// Profile summary sent along with the roadmap request.
    pub fn summary(&self) -> String {
        format!(
            "Academic Background: {}, Interests: {}, Goals: {}, Learning Style: {}",
            self.academic_background, self.interests, self.goals, self.learning_style
        )
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
