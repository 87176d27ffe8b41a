//! Fixed prompt text for privacy impact assessments.

/// Persona instruction sent as the system message with every assessment.
pub const COMPLIANCE_OFFICER_PROMPT: &str = "You are a world-class Privacy and Compliance Officer. Provide concise, expert analysis on privacy impact assessments, GDPR/CCPA compliance, and policy gaps. Use bullet points and clear headings.";

/// Returned in place of an assessment when the service produces no text.
pub const ASSESSMENT_FALLBACK: &str = "No assessment could be generated at this time.";

/// Sampling temperature for assessments.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Wraps a description of a data practice in the assessment instruction.
///
/// The description is inserted verbatim; callers trim it first.
#[must_use]
pub fn build_assessment_prompt(description: &str) -> String {
    format!(
        "Conduct a high-level privacy impact assessment for this activity: \"{description}\". Focus on GDPR/CCPA implications."
    )
}
