// Shared prompt constants and prompt-building utilities.
// Each capability defines its own templates in flows/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only, matching the declared response schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Market framing shared by every counselling prompt.
pub const MARKET_INSTRUCTION: &str =
    "Tailor every suggestion to the Indian and global job and education markets.";

/// Learning-style tailoring rules for career roadmaps.
pub const CAREER_LEARNING_STYLE_RULES: &str = "\
Crucially, you MUST tailor the recommended resources and tasks to the student's learning style.
- For Visual learners, suggest video tutorials, diagrams, mind maps, and visual-heavy courses.
- For Auditory learners, recommend podcasts, audiobooks, lectures, and group discussions.
- For Reading/Writing learners, focus on books, articles, blogs, and tasks involving writing summaries or notes.
- For Kinesthetic learners, emphasize hands-on projects, workshops, coding exercises, and real-world application of skills.";

/// Learning-style tailoring rules for college-entrance roadmaps.
pub const SCHOOL_LEARNING_STYLE_RULES: &str = "\
Crucially, you MUST tailor the recommended study resources and tasks to the student's learning style.
- For Visual learners, suggest video lectures, visual aids like charts and diagrams, and platforms like Khan Academy or YouTube.
- For Auditory learners, recommend audio-based study materials, recorded lectures, and forming study groups for discussion.
- For Reading/Writing learners, focus on textbooks, reference books, note-taking, and practicing with past exam papers.
- For Kinesthetic learners, emphasize interactive online labs, hands-on experiments or projects, and practical problem-solving sessions.";
