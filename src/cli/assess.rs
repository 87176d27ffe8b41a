//! CLI command for a one-shot privacy impact assessment.

use crate::services::AssessmentGateway;
use crate::workspace::Workspace;

/// Runs the assessment panel once with `description`.
///
/// Returns the report-area text: the assessment, or the inline failure
/// message. Returns `None` if the description is blank and nothing was sent.
pub async fn cmd_assess(
    workspace: &mut Workspace,
    gateway: &AssessmentGateway,
    description: &str,
) -> Option<String> {
    let panel = workspace.panel_mut();
    panel.open();
    panel.set_prompt(description);
    if !panel.submit(gateway).await {
        return None;
    }
    panel.report().map(ToString::to_string)
}
