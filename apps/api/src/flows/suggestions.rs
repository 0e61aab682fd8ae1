//! College and company suggestions.
//!
//! Two capabilities each: a search from the student's stated criteria, and
//! alternatives compared against the student's own target.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flows::prompts::{
    interpolate, COLLEGE_ALTERNATIVES_PROMPT_TEMPLATE, COLLEGE_SEARCH_PROMPT_TEMPLATE,
    COMPANY_ALTERNATIVES_PROMPT_TEMPLATE, COMPANY_SEARCH_PROMPT_TEMPLATE,
};
use crate::flows::{run_flow, schema, OutputShape};
use crate::llm_client::{GenerativeModel, LlmError};
use crate::models::forms::{CollegeSearchForm, CompanyAlternativesForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstitutionType {
    Public,
    Private,
}

const INSTITUTION_TYPES: &[&str] = &["Public", "Private"];

// ────────────────────────────────────────────────────────────────────────────
// Colleges
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeSuggestion {
    pub college_name: String,
    pub location: String,
    pub notable_for: String,
    pub website: String,
    pub required_exams: String,
    pub previous_year_cutoff: String,
    pub cost_breakdown: String,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeSuggestions {
    pub colleges: Vec<CollegeSuggestion>,
}

impl OutputShape for CollegeSuggestions {
    fn schema() -> Value {
        schema::object(vec![(
            "colleges",
            schema::array(
                schema::object(vec![
                    ("collegeName", schema::string("The name of the college.")),
                    ("location", schema::string("City and country.")),
                    (
                        "notableFor",
                        schema::string("What the college is known for regarding the target course."),
                    ),
                    ("website", schema::string("The official website.")),
                    (
                        "requiredExams",
                        schema::string("Entrance exams required for admission."),
                    ),
                    (
                        "previousYearCutoff",
                        schema::string("Required score, rank, or percentile from previous years."),
                    ),
                    (
                        "costBreakdown",
                        schema::string("Estimated annual tuition and major fees."),
                    ),
                    (
                        "type",
                        schema::enumeration(INSTITUTION_TYPES, "Public or Private."),
                    ),
                ]),
                "A list of 5-10 suggested colleges.",
            ),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeAlternative {
    pub name: String,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
    pub required_exams: String,
    pub previous_year_rank: String,
    pub cost_breakdown: String,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub eligibility_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeAlternatives {
    pub alternatives: Vec<CollegeAlternative>,
}

impl OutputShape for CollegeAlternatives {
    fn schema() -> Value {
        schema::object(vec![(
            "alternatives",
            schema::array(
                schema::object(vec![
                    ("name", schema::string("The name of the college.")),
                    (
                        "type",
                        schema::enumeration(INSTITUTION_TYPES, "Public or Private."),
                    ),
                    ("requiredExams", schema::string("Entrance exams required.")),
                    (
                        "previousYearRank",
                        schema::string("Required rank or marks based on previous years."),
                    ),
                    ("costBreakdown", schema::string("Estimated annual cost.")),
                    (
                        "advantages",
                        schema::string_list("Advantages compared to the student's target."),
                    ),
                    (
                        "disadvantages",
                        schema::string_list("Disadvantages compared to the student's target."),
                    ),
                    (
                        "eligibilityCriteria",
                        schema::string("Eligibility criteria for admission."),
                    ),
                ]),
                "A list of alternative college suggestions.",
            ),
        )])
    }
}

pub fn build_college_search_prompt(form: &CollegeSearchForm) -> String {
    let preferences = if form.preferences.trim().is_empty() {
        "None"
    } else {
        form.preferences.as_str()
    };
    interpolate(
        COLLEGE_SEARCH_PROMPT_TEMPLATE,
        &[
            ("course", form.course.as_str()),
            ("degree_level", form.degree_level.as_str()),
            ("interests", form.interests.as_str()),
            ("preferences", preferences),
        ],
    )
}

pub async fn suggest_colleges(
    model: &dyn GenerativeModel,
    form: &CollegeSearchForm,
) -> Result<CollegeSuggestions, LlmError> {
    run_flow(model, "college_search", &build_college_search_prompt(form)).await
}

pub async fn suggest_college_alternatives(
    model: &dyn GenerativeModel,
    student_profile: &str,
) -> Result<CollegeAlternatives, LlmError> {
    let prompt = interpolate(
        COLLEGE_ALTERNATIVES_PROMPT_TEMPLATE,
        &[("student_profile", student_profile)],
    );
    run_flow(model, "college_alternatives", &prompt).await
}

// ────────────────────────────────────────────────────────────────────────────
// Companies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySuggestion {
    pub company_name: String,
    pub industry: String,
    pub why: String,
    pub salary_range: String,
    pub hiring_insights: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySuggestions {
    pub companies: Vec<CompanySuggestion>,
}

impl OutputShape for CompanySuggestions {
    fn schema() -> Value {
        schema::object(vec![(
            "companies",
            schema::array(
                schema::object(vec![
                    ("companyName", schema::string("The name of the company.")),
                    ("industry", schema::string("The company's industry.")),
                    (
                        "why",
                        schema::string("Why this company is a good choice for this career path."),
                    ),
                    (
                        "salaryRange",
                        schema::string("Typical CTC range for entry-to-mid level roles."),
                    ),
                    (
                        "hiringInsights",
                        schema::string("Key skills, preferred qualifications, or interview focus areas."),
                    ),
                ]),
                "A list of 5-10 suggested companies.",
            ),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAlternative {
    pub name: String,
    pub sector: String,
    pub required_skills: String,
    pub typical_qualifications: String,
    pub estimated_ctc: String,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub eligibility_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAlternatives {
    pub alternatives: Vec<CompanyAlternative>,
}

impl OutputShape for CompanyAlternatives {
    fn schema() -> Value {
        schema::object(vec![(
            "alternatives",
            schema::array(
                schema::object(vec![
                    ("name", schema::string("The name of the company.")),
                    (
                        "sector",
                        schema::string("The sector (e.g., Public, Private, Startup)."),
                    ),
                    (
                        "requiredSkills",
                        schema::string("Key skills or entrance exams required."),
                    ),
                    (
                        "typicalQualifications",
                        schema::string("Typical qualifications or experience level needed."),
                    ),
                    ("estimatedCtc", schema::string("Estimated annual CTC package.")),
                    (
                        "advantages",
                        schema::string_list("Advantages compared to the student's goal."),
                    ),
                    (
                        "disadvantages",
                        schema::string_list("Disadvantages compared to the student's goal."),
                    ),
                    (
                        "eligibilityCriteria",
                        schema::string("Eligibility criteria for applying."),
                    ),
                ]),
                "A list of alternative company suggestions.",
            ),
        )])
    }
}

pub async fn suggest_companies(
    model: &dyn GenerativeModel,
    career_path: &str,
) -> Result<CompanySuggestions, LlmError> {
    let prompt = interpolate(COMPANY_SEARCH_PROMPT_TEMPLATE, &[("career_path", career_path)]);
    run_flow(model, "company_search", &prompt).await
}

pub async fn suggest_company_alternatives(
    model: &dyn GenerativeModel,
    form: &CompanyAlternativesForm,
) -> Result<CompanyAlternatives, LlmError> {
    let prompt = interpolate(
        COMPANY_ALTERNATIVES_PROMPT_TEMPLATE,
        &[
            ("student_profile", form.student_profile.as_str()),
            ("career_goal", form.career_goal.as_str()),
        ],
    );
    run_flow(model, "company_alternatives", &prompt).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;

    #[tokio::test]
    async fn test_college_search_parses_type_field() {
        let model = ScriptedModel::new().push_json(json!({
            "colleges": [{
                "collegeName": "IISc Bangalore",
                "location": "Bengaluru, India",
                "notableFor": "Research in CS",
                "website": "https://iisc.ac.in",
                "requiredExams": "GATE",
                "previousYearCutoff": "GATE score 750+",
                "costBreakdown": "~INR 40,000/year",
                "type": "Public"
            }]
        }));
        let form = CollegeSearchForm {
            course: "M.Tech CSE".to_string(),
            degree_level: "Postgraduate".to_string(),
            interests: "systems".to_string(),
            preferences: String::new(),
        };
        let result = suggest_colleges(&model, &form).await.unwrap();
        assert_eq!(result.colleges[0].institution_type, InstitutionType::Public);
        assert!(model.json_calls()[0].contains("Preferences: None"));
        assert!(model.json_calls()[0].contains("Degree Level: Postgraduate"));
    }

    #[tokio::test]
    async fn test_college_type_outside_enum_is_rejected() {
        let model = ScriptedModel::new().push_json(json!({
            "alternatives": [{
                "name": "X", "type": "Deemed", "requiredExams": "", "previousYearRank": "",
                "costBreakdown": "", "advantages": [], "disadvantages": [], "eligibilityCriteria": ""
            }]
        }));
        let result = suggest_college_alternatives(&model, "Class 12, PCB").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_company_search_prompt_names_career() {
        let model = ScriptedModel::new().push_json(json!({
            "companies": [{
                "companyName": "Infosys",
                "industry": "IT services",
                "why": "Large training programme",
                "salaryRange": "INR 3.6-6 LPA",
                "hiringInsights": "Aptitude test and interviews"
            }]
        }));
        let result = suggest_companies(&model, "Software Tester").await.unwrap();
        assert_eq!(result.companies[0].company_name, "Infosys");
        assert!(model.json_calls()[0].contains("Career Path: Software Tester"));
    }

    #[tokio::test]
    async fn test_company_alternatives_prompt_carries_goal() {
        let model = ScriptedModel::new().push_json(json!({ "alternatives": [] }));
        let form = CompanyAlternativesForm {
            student_profile: "B.Tech ECE".to_string(),
            career_goal: "ISRO scientist".to_string(),
        };
        let result = suggest_company_alternatives(&model, &form).await.unwrap();
        assert!(result.alternatives.is_empty());
        let prompt = &model.json_calls()[0];
        assert!(prompt.contains("Student Profile: B.Tech ECE"));
        assert!(prompt.contains("Career Goal: ISRO scientist"));
    }

    #[tokio::test]
    async fn test_company_alternatives_profile_is_not_rewritten() {
        let model = ScriptedModel::new().push_json(json!({ "alternatives": [] }));
        let form = CompanyAlternativesForm {
            student_profile: "Wants a role matching {career_goal}".to_string(),
            career_goal: "SDE at Zoho".to_string(),
        };
        suggest_company_alternatives(&model, &form).await.unwrap();
        let prompt = &model.json_calls()[0];
        assert!(prompt.contains("Student Profile: Wants a role matching {career_goal}"));
        assert_eq!(prompt.matches("SDE at Zoho").count(), 1);
    }

    #[test]
    fn test_schemas_declare_type_enum() {
        let shape = CollegeAlternatives::schema();
        assert_eq!(
            shape["properties"]["alternatives"]["items"]["properties"]["type"]["enum"],
            json!(["Public", "Private"])
        );
    }
}
