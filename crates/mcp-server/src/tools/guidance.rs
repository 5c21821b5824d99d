use super::context::ToolContext;
use super::errors::{invalid_argument, ToolOutcome};
use super::schemas::guidance::GuidanceRequest;
use modus_migrate_protocol::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Modus,
    Mui,
}

impl Family {
    pub(crate) fn parse(raw: Option<&str>) -> ToolOutcome<Self> {
        match raw.map(|f| f.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("modus") => Ok(Family::Modus),
            Some("mui") => Ok(Family::Mui),
            Some(other) => Err(invalid_argument(format!("Unknown guidance family '{other}'"))
                .with_detail("known_families", json!(["modus", "mui"]))),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Family::Modus => "modus",
            Family::Mui => "mui",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuidanceStep {
    Analyze,
    Migrate,
    Verify,
    Log,
    Workflow,
}

const STEPS: [GuidanceStep; 5] = [
    GuidanceStep::Analyze,
    GuidanceStep::Migrate,
    GuidanceStep::Verify,
    GuidanceStep::Log,
    GuidanceStep::Workflow,
];

impl GuidanceStep {
    pub(crate) fn parse(raw: &str) -> ToolOutcome<Self> {
        match raw.trim().to_lowercase().as_str() {
            "analyze" | "analyse" | "analysis" => Ok(GuidanceStep::Analyze),
            "migrate" | "migration" => Ok(GuidanceStep::Migrate),
            "verify" | "verification" => Ok(GuidanceStep::Verify),
            "log" | "logging" => Ok(GuidanceStep::Log),
            "workflow" => Ok(GuidanceStep::Workflow),
            other => Err(
                invalid_argument(format!("Unknown guidance step '{other}'")).with_detail(
                    "known_steps",
                    json!(["analyze", "migrate", "verify", "log", "workflow"]),
                ),
            ),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            GuidanceStep::Analyze => "analyze",
            GuidanceStep::Migrate => "migrate",
            GuidanceStep::Verify => "verify",
            GuidanceStep::Log => "log",
            GuidanceStep::Workflow => "workflow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataSource {
    SourceComponents,
    TargetComponents,
    ComponentMapping,
    MuiMapping,
    MuiComponents,
}

impl DataSource {
    fn key(self) -> &'static str {
        match self {
            DataSource::SourceComponents => "source_components",
            DataSource::TargetComponents => "target_components",
            DataSource::ComponentMapping => "component_mapping",
            DataSource::MuiMapping => "mui_to_modus_mapping",
            DataSource::MuiComponents => "mui_components",
        }
    }

    fn relative_path(self, ctx: &ToolContext) -> &str {
        let config = ctx.config();
        match self {
            DataSource::SourceComponents => &config.source.components_file,
            DataSource::TargetComponents => &config.target.components_file,
            DataSource::ComponentMapping => &config.files.component_mapping,
            DataSource::MuiMapping => &config.files.mui_mapping,
            DataSource::MuiComponents => &config.files.mui_components,
        }
    }
}

/// What one guidance step bundles.
struct GuidanceEntry {
    markdown: &'static str,
    data: &'static [DataSource],
    directories: &'static [(&'static str, &'static str)],
    gold_standard: bool,
    all_documents: bool,
}

const MUI_DATA: &[DataSource] = &[
    DataSource::MuiMapping,
    DataSource::MuiComponents,
    DataSource::TargetComponents,
];

fn markdown_for(family: Family, step: GuidanceStep) -> &'static str {
    match (family, step) {
        (Family::Modus, GuidanceStep::Analyze) => "analysis.md",
        (Family::Modus, GuidanceStep::Migrate) => "migrate.md",
        (Family::Modus, GuidanceStep::Verify) => "verify.md",
        (Family::Modus, GuidanceStep::Log) => "log.md",
        (Family::Modus, GuidanceStep::Workflow) => "workflow.md",
        (Family::Mui, GuidanceStep::Analyze) => "analyze_mui.md",
        (Family::Mui, GuidanceStep::Migrate) => "migrate_mui.md",
        (Family::Mui, GuidanceStep::Verify) => "verify_mui.md",
        (Family::Mui, GuidanceStep::Log) => "log_mui.md",
        (Family::Mui, GuidanceStep::Workflow) => "workflow_mui.md",
    }
}

fn entry(family: Family, step: GuidanceStep) -> GuidanceEntry {
    let markdown = markdown_for(family, step);
    match (family, step) {
        (Family::Modus, GuidanceStep::Analyze) => GuidanceEntry {
            markdown,
            data: &[DataSource::SourceComponents, DataSource::ComponentMapping],
            directories: &[("analysis_reports", "analysis_reports/modus")],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Modus, GuidanceStep::Migrate) => GuidanceEntry {
            markdown,
            data: &[DataSource::ComponentMapping, DataSource::TargetComponents],
            directories: &[],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Modus, GuidanceStep::Verify) => GuidanceEntry {
            markdown,
            data: &[DataSource::TargetComponents],
            directories: &[],
            gold_standard: true,
            all_documents: false,
        },
        (Family::Modus, GuidanceStep::Log) => GuidanceEntry {
            markdown,
            data: &[],
            directories: &[("migration_logs", "migration_logs/modus")],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Modus, GuidanceStep::Workflow) => GuidanceEntry {
            markdown,
            data: &[
                DataSource::SourceComponents,
                DataSource::ComponentMapping,
                DataSource::TargetComponents,
            ],
            directories: &[
                ("analysis_reports", "analysis_reports/modus"),
                ("migration_logs", "migration_logs/modus"),
                ("verification_reports", "verification_reports/modus"),
            ],
            gold_standard: true,
            all_documents: true,
        },
        (Family::Mui, GuidanceStep::Analyze) => GuidanceEntry {
            markdown,
            data: MUI_DATA,
            directories: &[("analysis_reports", "analysis_reports/mui")],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Mui, GuidanceStep::Migrate) => GuidanceEntry {
            markdown,
            data: MUI_DATA,
            directories: &[],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Mui, GuidanceStep::Verify) => GuidanceEntry {
            markdown,
            data: MUI_DATA,
            directories: &[],
            gold_standard: true,
            all_documents: false,
        },
        (Family::Mui, GuidanceStep::Log) => GuidanceEntry {
            markdown,
            data: &[],
            directories: &[("migration_logs", "migration_logs/mui")],
            gold_standard: false,
            all_documents: false,
        },
        (Family::Mui, GuidanceStep::Workflow) => GuidanceEntry {
            markdown,
            data: MUI_DATA,
            directories: &[
                ("analysis_reports", "analysis_reports/mui"),
                ("migration_logs", "migration_logs/mui"),
                ("verification_reports", "verification_reports/mui"),
            ],
            gold_standard: true,
            all_documents: true,
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GuidancePayload {
    pub(crate) family: &'static str,
    pub(crate) step: &'static str,
    pub(crate) guidance_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) component_data: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) directories: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) gold_standard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) all_guidance_documents: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) warnings: Vec<String>,
}

/// Assemble the payload for one step.
///
/// Missing markdown reads as a placeholder and a missing data table is skipped with a
/// warning; the call only fails when every requested table is missing.
pub(crate) fn compute_guidance(
    ctx: &ToolContext,
    request: GuidanceRequest,
) -> ToolOutcome<GuidancePayload> {
    let family = Family::parse(request.family.as_deref())?;
    let step = GuidanceStep::parse(&request.step)?;
    let entry = entry(family, step);
    let mut warnings = Vec::new();

    let component_data = if entry.data.is_empty() {
        None
    } else {
        let mut data = Map::new();
        for source in entry.data {
            match ctx.document(source.relative_path(ctx)) {
                Ok(document) => {
                    data.insert(source.key().to_string(), (*document).clone());
                }
                Err(err) => {
                    log::warn!("guidance {}/{}: {err}", family.as_str(), step.as_str());
                    warnings.push(format!("{} unavailable: {err}", source.key()));
                }
            }
        }
        if data.is_empty() {
            return Err(ErrorEnvelope::new(
                ErrorCode::DataLoad,
                format!(
                    "No component data available for {} {} guidance",
                    family.as_str(),
                    step.as_str()
                ),
            )
            .with_detail("warnings", json!(warnings)));
        }
        Some(data)
    };

    let directories = if entry.directories.is_empty() {
        None
    } else {
        let mut dirs = Map::new();
        for (name, relative) in entry.directories {
            let path = ctx.output_path(relative);
            if let Err(err) = fs::create_dir_all(&path) {
                log::error!("creating {}: {err}", path.display());
                warnings.push(format!("Could not create {}: {err}", path.display()));
            }
            dirs.insert(name.to_string(), json!(path.display().to_string()));
        }
        Some(dirs)
    };

    let all_guidance_documents = entry.all_documents.then(|| {
        STEPS
            .iter()
            .map(|s| {
                (
                    s.as_str().to_string(),
                    Value::String(ctx.prompt(markdown_for(family, *s))),
                )
            })
            .collect()
    });

    Ok(GuidancePayload {
        family: family.as_str(),
        step: step.as_str(),
        guidance_text: ctx.prompt(entry.markdown),
        component_data,
        directories,
        gold_standard: entry.gold_standard.then(|| ctx.gold_standard()),
        all_guidance_documents,
        warnings,
    })
}
