// All LLM prompt templates for the flows.
// Placeholders are `{name}`; callers fill them with `str::replace` before sending.
// Cross-cutting fragments live in llm_client::prompts.

/// Career recommendation. Replace: {market_instruction}, {academic_background},
/// {interests}, {skills}, {goals}, {learning_style}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are a career counselor specializing in recommending career paths to students based on their profile.
Analyze the following student profile and suggest 3-5 career options tailored to their profile.
{market_instruction}

Academic Background: {academic_background}
Interests: {interests}
Skills: {skills}
Goals: {goals}
Learning Style: {learning_style}

Return the career options as a list of short career titles in `careerOptions`."#;

/// Career exploration. Replace: {market_instruction}, {interests}, {skills},
/// {goals}, {academic_background}
pub const EXPLORATION_PROMPT_TEMPLATE: &str = r#"You are a career counselor specializing in recommending career paths to students based on their profiles.
Use the following information to suggest 3-5 career options aligned with the student profile, and for each recommended career path list the technical and soft skills the student is missing based on their current skill set.
{market_instruction}

Interests: {interests}
Skills: {skills}
Goals: {goals}
Academic Background: {academic_background}

Return each career path with its missing skills in `recommendations`."#;

/// Skill-gap analysis. Replace: {career_path}, {student_skills}
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = r#"You are a career advisor specializing in identifying skill gaps.
You will receive a recommended career path and the student's current skills. Identify the missing technical and soft skills required for the student to succeed in the recommended career path.

Career Path: {career_path}
Student Skills: {student_skills}

Focus on skills that are crucial for the career path but not present in the student's current skills.
Return technical skills in `missingTechnicalSkills` and soft skills in `missingSoftSkills`. Either list may be empty."#;

/// Career roadmap. Replace: {market_instruction}, {learning_style_rules},
/// {student_profile}, {career_path}, {current_skills}, {skill_gaps}, {learning_style}
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are a career coach expert in the job market.
Based on the student profile, chosen career path, current skills, identified skill gaps, and learning style, generate a 6-12 month actionable roadmap for the student.
{market_instruction}
The roadmap must be broken down into monthly milestones, ordered chronologically starting at month 1. Each milestone has a short title and a list of specific tasks, including resources (courses, certifications, projects).
{learning_style_rules}

Student Profile: {student_profile}
Career Path: {career_path}
Current Skills: {current_skills}
Skill Gaps: {skill_gaps}
Learning Style: {learning_style}

Return the milestones in `milestones`."#;

/// College-entrance roadmap. Replace: {learning_style_rules}, {student_profile},
/// {learning_style}
pub const SCHOOL_ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert academic advisor for high school students aiming for top colleges in India and abroad.
Based on the student's profile and learning style, generate a 6-12 month actionable roadmap for college entrance preparation.
The roadmap must be broken down into quarterly milestones, ordered chronologically starting at quarter 1. Each milestone has a short title and a list of specific actions, subjects to focus on, entrance exams to prepare for (like JEE, NEET, SAT), and recommended study resources.
{learning_style_rules}

Student Profile: {student_profile}
Learning Style: {learning_style}

Return the milestones in `milestones`."#;

/// College search. Replace: {course}, {degree_level}, {interests}, {preferences}
pub const COLLEGE_SEARCH_PROMPT_TEMPLATE: &str = r#"You are an expert higher education and admissions advisor for students in India and abroad.
Based on the student's profile, suggest 5-10 relevant colleges. Include a mix of public and private institutions where applicable.
For each college, you MUST provide:
1. Its name, location, and official website.
2. What it is notable for regarding the specified course and degree level.
3. The required entrance exams (e.g., GATE, GRE, CAT, JEE Advanced, SAT, NEET).
4. An overview of the required score, rank, or percentile based on recent trends.
5. An estimated annual cost breakdown (tuition, fees).
6. Whether it is a 'Public' or 'Private' institution.
If the student mentions a specific college in their preferences, use it as a benchmark and suggest strong alternatives.

Target Course: {course}
Degree Level: {degree_level}
Interests: {interests}
Preferences: {preferences}"#;

/// College alternatives. Replace: {student_profile}
pub const COLLEGE_ALTERNATIVES_PROMPT_TEMPLATE: &str = r#"You are an expert career counselor for students in India.
Based on the provided student profile, suggest 3-5 alternative colleges (a mix of public and private).
For each college, provide the required entrance exams, the typical marks or rank needed based on previous years, and an estimated cost breakdown.
Also list the advantages and disadvantages of each college compared to the student's choice, and the eligibility criteria.

Student Profile: {student_profile}"#;

/// Company search. Replace: {career_path}
pub const COMPANY_SEARCH_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and industry analyst.
Based on the provided career path, suggest 5-10 top companies (in India and globally) that hire for this role.
For each company, provide:
1. Its name and industry.
2. Why it is a great place for this career.
3. A typical CTC (Cost to Company) salary range for entry-to-mid level roles.
4. Hiring insights, such as required key skills, qualifications (e.g., "strong portfolio of projects"), or the typical interview process.

Career Path: {career_path}"#;

/// Company alternatives. Replace: {student_profile}, {career_goal}
pub const COMPANY_ALTERNATIVES_PROMPT_TEMPLATE: &str = r#"You are an expert career counselor and recruitment specialist for students and graduates in India.
Based on the provided student profile, suggest 3-5 alternative companies (a mix of public sector, private sector, and startups).
For each company, provide the required skills or exams, typical qualifications needed, and an estimated CTC package range.
Also list the advantages and disadvantages of each company compared to the student's ideal role or company, and the eligibility criteria.

Student Profile: {student_profile}
Career Goal: {career_goal}"#;

/// Spoken summary of a career roadmap. Replace: {milestones}
pub const CAREER_NARRATION_TEMPLATE: &str = "Read the following as a career coach, in a conversational and encouraging tone, speaking directly to the student.
Here is your roadmap.
{milestones}";

/// Spoken summary of a college-prep roadmap. Replace: {milestones}
pub const SCHOOL_NARRATION_TEMPLATE: &str = "Read the following as an academic advisor, in a clear and encouraging tone, speaking directly to the student.
Here is your college preparation roadmap.
{milestones}";

/// Fills `{name}` placeholders in one left-to-right pass over `template`.
///
/// Inserted values are never rescanned, so user text containing `{...}` is
/// copied verbatim. Unknown placeholders are left as they are.
pub fn interpolate(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
