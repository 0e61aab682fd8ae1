//! Intake forms for the standalone tools, plus the shared validation entry point.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, FieldError};
use crate::models::profile::LearningStyle;

/// Runs the form's length rules and converts failures into per-field errors.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), AppError> {
    form.validate()
        .map_err(|errors| AppError::Validation(field_errors(&errors)))
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: camel_case(field),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code)),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// School-track intake: college-entrance roadmap and alternatives.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SchoolForm {
    #[validate(length(min = 10, message = "Please provide more details."))]
    pub academic_background: String,
    #[validate(length(min = 3, message = "Please list at least one interest."))]
    pub interests: String,
    #[validate(length(min = 3, message = "e.g. IIT, AIIMS, Ivy League"))]
    pub target: String,
    pub learning_style: LearningStyle,
}

impl SchoolForm {
    pub fn student_profile(&self) -> String {
        format!(
            "Academic Background: {}, Interests: {}, Target Colleges/Courses: {}",
            self.academic_background, self.interests, self.target
        )
    }
}

/// Career-exploration intake. Goals and background are optional here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerForm {
    #[validate(length(min = 3, message = "Please enter at least one interest."))]
    pub interests: String,
    #[validate(length(min = 3, message = "Please enter at least one skill."))]
    pub skills: String,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub academic_background: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSearchForm {
    #[validate(length(min = 3, message = "Please enter a course."))]
    pub course: String,
    #[validate(length(min = 3, message = "Please enter your target degree level."))]
    pub degree_level: String,
    #[validate(length(min = 3, message = "Please enter at least one interest."))]
    pub interests: String,
    /// Location or a benchmark college to compare against.
    #[serde(default)]
    pub preferences: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanySearchForm {
    #[validate(length(min = 3, message = "Please enter a career path."))]
    pub career_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CollegeAlternativesForm {
    #[validate(length(min = 3, message = "Please describe the student profile."))]
    pub student_profile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAlternativesForm {
    #[validate(length(min = 3, message = "Please describe the student profile."))]
    pub student_profile: String,
    #[validate(length(min = 3, message = "Please enter a career goal."))]
    pub career_goal: String,
}
