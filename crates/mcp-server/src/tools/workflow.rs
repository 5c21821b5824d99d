//! Caller-driven migration workflow.
//!
//! The server keeps no session: every call receives the previous state object, applies at
//! most one transition from [`transition`], and returns the new state. Inputs that do not
//! match the table return the state unchanged with a re-prompt for the current step.

use super::context::ToolContext;
use super::errors::{
    invalid_argument, invalid_state, report_value, serialization, to_payload, ToolOutcome,
};
use super::migration::{
    analysis_failed, analyze, compute_all_migration_data, compute_log_summary, save_analysis,
    verification_report,
};
use super::schemas::migration::{LogMigrationSummaryRequest, LogMigrationSummaryResult};
use super::schemas::workflow::RunMigrationWorkflowRequest;
use modus_migrate_catalog::AnalysisReport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Step {
    #[default]
    Start,
    #[serde(alias = "analysis_saved")]
    Analysis,
    MigrationData,
    Verification,
    LogPreview,
    Logged,
    /// Any step name this server does not know. Never advances.
    #[serde(other)]
    Unknown,
}

impl Step {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Step::Start => "start",
            Step::Analysis => "analysis",
            Step::MigrationData => "migration_data",
            Step::Verification => "verification",
            Step::LogPreview => "log_preview",
            Step::Logged => "logged",
            Step::Unknown => "unknown",
        }
    }

    /// What to say when the reply does not fit this step.
    fn reprompt(self) -> &'static str {
        match self {
            Step::Start => "Reply 'analyze' with file_content to start the migration.",
            Step::Analysis => {
                "Reply 'proceed' to continue to migration data generation, or 'save' to persist the analysis."
            }
            Step::MigrationData => {
                "Reply 'verify' (with migrated_file_content) to verify the migrated code."
            }
            Step::Verification => "Reply 'log' to log the migration summary.",
            Step::LogPreview => "Reply 'save' to write the migration log.",
            Step::Logged => {
                "Workflow complete. Call again without previous_state to migrate another file."
            }
            Step::Unknown => {
                "Unrecognized workflow step. Valid replies are 'analyze', 'proceed', 'save', 'verify' and 'log'; call without previous_state to start over."
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allow-listed reply keywords. Anything else is [`InputClass::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputClass {
    Begin,
    Affirmative,
    Save,
    Verify,
    Log,
    Other,
}

pub(crate) fn classify(user_input: &str) -> InputClass {
    match user_input.trim().to_lowercase().as_str() {
        "analyze" | "analyse" | "start" => InputClass::Begin,
        "proceed" | "migrate" | "yes" => InputClass::Affirmative,
        "save" => InputClass::Save,
        "verify" => InputClass::Verify,
        "log" => InputClass::Log,
        _ => InputClass::Other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    RunAnalysis,
    SaveAnalysis,
    LoadMigrationData,
    Verify,
    PreviewLog,
    SaveLog,
}

impl Transition {
    pub(crate) fn next_step(self) -> Step {
        match self {
            Transition::RunAnalysis | Transition::SaveAnalysis => Step::Analysis,
            Transition::LoadMigrationData => Step::MigrationData,
            Transition::Verify => Step::Verification,
            Transition::PreviewLog => Step::LogPreview,
            Transition::SaveLog => Step::Logged,
        }
    }

    /// State fields the transition reads.
    pub(crate) fn required_fields(self) -> &'static [&'static str] {
        match self {
            Transition::RunAnalysis => &[],
            Transition::SaveAnalysis | Transition::LoadMigrationData => {
                &["file_content", "analysis_report"]
            }
            Transition::Verify => &["file_content", "analysis_report", "migration_data"],
            Transition::PreviewLog | Transition::SaveLog => {
                &["analysis_report", "migration_data", "verification_report"]
            }
        }
    }
}

/// The whole dispatch table. `None` means "re-prompt, stay put".
pub(crate) fn transition(step: Step, input: InputClass) -> Option<Transition> {
    match (step, input) {
        (Step::Start, InputClass::Begin) => Some(Transition::RunAnalysis),
        (Step::Analysis, InputClass::Affirmative) => Some(Transition::LoadMigrationData),
        (Step::Analysis, InputClass::Save) => Some(Transition::SaveAnalysis),
        (Step::MigrationData, InputClass::Verify) => Some(Transition::Verify),
        (Step::Verification, InputClass::Log) => Some(Transition::PreviewLog),
        (Step::LogPreview, InputClass::Save) => Some(Transition::SaveLog),
        _ => None,
    }
}

/// State round-tripped through the caller between workflow calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct WorkflowState {
    #[serde(default)]
    pub(crate) step: Step,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) file_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) analysis_report: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) analysis_saved: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) migration_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) migrated_file_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) verification_rules: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) verification_report: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_preview: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_report: Option<Value>,
    #[serde(default)]
    pub(crate) prompt: String,
}

impl WorkflowState {
    fn has(&self, field: &str) -> bool {
        match field {
            "file_content" => self.file_content.is_some(),
            "analysis_report" => self.analysis_report.is_some(),
            "migration_data" => self.migration_data.is_some(),
            "verification_report" => self.verification_report.is_some(),
            _ => true,
        }
    }

    fn missing(&self, transition: Transition) -> Vec<&'static str> {
        transition
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !self.has(field))
            .collect()
    }

}

/// Decode `previous_state` (object or JSON string). `None` for a fresh workflow.
fn decode_previous(raw: Option<&Value>) -> ToolOutcome<Option<(WorkflowState, Value)>> {
    let Some(raw) = raw.filter(|raw| !raw.is_null()) else {
        return Ok(None);
    };
    let value = report_value(raw).map_err(|err| serialization("previous_state JSON", &err))?;
    let state: WorkflowState = serde_json::from_value(value.clone())
        .map_err(|err| serialization("previous_state", &err))?;
    Ok(Some((state, value)))
}

fn stored_report(state: &WorkflowState) -> ToolOutcome<AnalysisReport> {
    let raw = state.analysis_report.clone().unwrap_or_default();
    serde_json::from_value(raw).map_err(|err| serialization("analysis_report in previous_state", &err))
}

fn log_request(state: &WorkflowState, save: bool) -> LogMigrationSummaryRequest {
    LogMigrationSummaryRequest {
        analysis_report: state.analysis_report.clone(),
        generation_report: state.migration_data.clone(),
        verification_report: state.verification_report.clone(),
        additional_info: None,
        save_log: Some(save),
    }
}

/// The caller's state as received, with only `prompt` replaced.
fn reprompt(received: Value, step: Step) -> Value {
    let mut echoed = match received {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    echoed.insert("prompt".to_string(), Value::from(step.reprompt()));
    Value::Object(echoed)
}

/// Run one workflow step.
pub(crate) fn compute_workflow_step(
    ctx: &ToolContext,
    request: RunMigrationWorkflowRequest,
) -> ToolOutcome<Value> {
    let input = classify(&request.user_input);
    let previous = decode_previous(request.previous_state.as_ref())?;

    let fresh = previous
        .as_ref()
        .map_or(true, |(_, raw)| raw.get("step").is_none());
    let (mut state, received) = previous.unwrap_or_default();

    let action = if fresh {
        Some(Transition::RunAnalysis)
    } else {
        transition(state.step, input)
    };
    let Some(action) = action else {
        log::info!(
            "workflow: {:?} does not advance step {}",
            request.user_input,
            state.step
        );
        return Ok(reprompt(received, state.step));
    };

    if let Some(migrated) = request.migrated_file_content {
        state.migrated_file_content = Some(migrated);
    }
    if state.file_content.is_none() {
        state.file_content = request.file_content.clone();
    }

    let missing = state.missing(action);
    if !missing.is_empty() {
        log::warn!("workflow: {action:?} missing {missing:?}");
        return Err(invalid_state(
            format!(
                "Invalid previous_state for '{}' at step '{}'. Missing {}.",
                request.user_input.trim(),
                state.step,
                missing.join(", ")
            ),
            &missing,
            &received,
        ));
    }

    log::info!("workflow: {} -> {}", state.step, action.next_step());
    match action {
        Transition::RunAnalysis => {
            let file_content = request
                .file_content
                .or(state.file_content.take())
                .ok_or_else(|| {
                    invalid_argument("file_content is required to start the migration workflow")
                })?;
            let report = analyze(ctx, &file_content);
            let prompt = if analysis_failed(&report) {
                format!(
                    "Analysis failed: {}. Fix the data and start again.",
                    report.error.as_deref().unwrap_or("unknown error")
                )
            } else {
                "Analysis complete. Reply 'proceed' to continue to migration data generation, or 'save' to persist the analysis."
                    .to_string()
            };
            state = WorkflowState {
                step: Step::Analysis,
                file_content: Some(file_content),
                analysis_report: Some(to_payload(&report)?),
                prompt,
                ..WorkflowState::default()
            };
        }
        Transition::SaveAnalysis => {
            let saved = save_analysis(ctx, stored_report(&state)?)?;
            state.analysis_saved = Some(to_payload(&saved)?);
            state.prompt =
                "Analysis saved. Reply 'proceed' to continue to migration data generation."
                    .to_string();
        }
        Transition::LoadMigrationData => {
            let data = compute_all_migration_data(ctx)?;
            state.verification_rules = Some(data.verification_rules.clone());
            state.migration_data = Some(to_payload(&data)?);
            state.prompt = "Migration data ready. Generate the migrated markup, then reply 'verify' with migrated_file_content."
                .to_string();
        }
        Transition::Verify => {
            let migrated = state.migrated_file_content.clone().unwrap_or_default();
            let report = verification_report(ctx, &migrated);
            state.verification_report = Some(to_payload(&report)?);
            state.prompt = "Verification complete. Reply 'log' to log the migration summary.".to_string();
        }
        Transition::PreviewLog => {
            let preview = compute_log_summary(ctx, log_request(&state, false))?;
            if let LogMigrationSummaryResult::Preview { prompt, .. } = &preview {
                state.prompt = prompt.clone();
            }
            state.log_preview = Some(to_payload(&preview)?);
        }
        Transition::SaveLog => {
            let saved = compute_log_summary(ctx, log_request(&state, true))?;
            if let LogMigrationSummaryResult::Saved { prompt, .. } = &saved {
                state.prompt = prompt.clone();
            }
            state.log_report = Some(to_payload(&saved)?);
        }
    }
    state.step = action.next_step();
    to_payload(&state)
}
