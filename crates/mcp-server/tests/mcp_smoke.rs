use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::{RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use rmcp::RoleClient;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

mod support;

type Client = RunningService<RoleClient, ()>;

async fn start(root: &Path, output: &Path) -> Result<Client> {
    let bin = support::locate_modus_migrate_mcp_bin()?;
    let mut cmd = Command::new(bin);
    cmd.env("MODUS_MIGRATE_ROOT", root);
    cmd.env("MODUS_MIGRATE_OUTPUT_DIR", output);
    cmd.env_remove("MODUS_MIGRATE_CONFIG");
    cmd.env_remove("MODUS_MIGRATE_DATA_DIR");
    cmd.env_remove("MODUS_MIGRATE_PROMPTS_DIR");
    cmd.env("RUST_LOG", "warn");

    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;
    Ok(service)
}

async fn call(service: &Client, name: &str, args: Value) -> Result<CallToolResult> {
    tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments: args.as_object().cloned(),
        }),
    )
    .await
    .with_context(|| format!("timeout calling {name}"))?
    .with_context(|| format!("call {name}"))
}

fn payload(result: &CallToolResult) -> Result<Value> {
    result
        .structured_content
        .clone()
        .context("missing structured_content")
}

#[tokio::test]
async fn mcp_exposes_migration_tools_and_rewrites_markup() -> Result<()> {
    let root = tempfile::tempdir().context("tempdir")?;
    support::write_install(root.path())?;
    let output = root.path().join("out");
    let service = start(root.path(), &output).await?;

    let tools = tokio::time::timeout(
        Duration::from_secs(10),
        service.list_tools(Default::default()),
    )
    .await
    .context("timeout listing tools")??;
    let tool_names: HashSet<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    for expected in [
        "server_capabilities",
        "list_components",
        "get_component",
        "get_component_migration_data",
        "get_all_migration_data",
        "analyze_code_for_migration",
        "generate_migrated_code",
        "get_verification_rules",
        "log_migration_summary",
        "run_migration_workflow",
        "get_guidance",
    ] {
        assert!(tool_names.contains(expected), "missing tool {expected}");
    }

    let listing = call(&service, "list_components", json!({"version": "1.0"})).await?;
    assert_ne!(listing.is_error, Some(true), "list_components returned error");
    let listing = payload(&listing)?;
    assert_eq!(listing["total_count"], json!(3));
    assert_eq!(listing["components"][0]["name"], json!("alert"));
    assert_eq!(listing["components"][0]["tag_name"], json!("modus-alert"));

    let component = call(&service, "get_component", json!({"component_name": "Button"})).await?;
    let component = payload(&component)?;
    assert_eq!(component["tag_name"], json!("modus-wc-button"));

    let markup = "<modus-button disabled>Save</modus-button>\n<modus-old-thing></modus-old-thing>";
    let analysis = call(
        &service,
        "analyze_code_for_migration",
        json!({"file_content": markup}),
    )
    .await?;
    let report = payload(&analysis)?["analysis_report"].clone();
    assert_eq!(report["status"], json!("Analysis Complete"));

    let generated = call(
        &service,
        "generate_migrated_code",
        json!({"file_content": markup, "analysis_report": report}),
    )
    .await?;
    assert_ne!(generated.is_error, Some(true), "generate returned error");
    let migrated = payload(&generated)?["migrated_file_content"]
        .as_str()
        .context("migrated_file_content is a string")?
        .to_string();
    assert!(migrated.starts_with("<modus-wc-button disabled>Save</modus-wc-button>"));
    assert!(migrated.contains("<modus-old-thing>"));

    let verification = call(
        &service,
        "get_verification_rules",
        json!({"migrated_file_content": migrated}),
    )
    .await?;
    let verification = payload(&verification)?;
    assert_eq!(
        verification["verification_report"]["remaining_source_tags"],
        json!(["modus-old-thing"])
    );

    let blocked = call(
        &service,
        "generate_migrated_code",
        json!({"file_content": markup, "analysis_report": "{not json"}),
    )
    .await?;
    assert_eq!(blocked.is_error, Some(true));
    assert_eq!(payload(&blocked)?["code"], json!("serialization"));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn workflow_runs_to_a_saved_log() -> Result<()> {
    let root = tempfile::tempdir().context("tempdir")?;
    support::write_install(root.path())?;
    let output = root.path().join("out");
    let service = start(root.path(), &output).await?;

    let state = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({"user_input": "analyze", "file_content": "<modus-alert message=\"hi\"></modus-alert>"}),
        )
        .await?,
    )?;
    assert_eq!(state["step"], json!("analysis"));

    // An input that does not fit the step keeps the state.
    let same = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({"user_input": "log", "previous_state": state}),
        )
        .await?,
    )?;
    assert_eq!(same["step"], json!("analysis"));

    let state = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({"user_input": "proceed", "previous_state": same}),
        )
        .await?,
    )?;
    assert_eq!(state["step"], json!("migration_data"));

    let state = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({
                "user_input": "verify",
                "previous_state": state,
                "migrated_file_content": "<modus-wc-alert alert-title=\"hi\"></modus-wc-alert>"
            }),
        )
        .await?,
    )?;
    assert_eq!(state["step"], json!("verification"));
    assert_eq!(
        state["verification_report"]["remaining_source_tags"],
        json!([])
    );

    let state = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({"user_input": "log", "previous_state": state}),
        )
        .await?,
    )?;
    assert_eq!(state["step"], json!("log_preview"));

    let state = payload(
        &call(
            &service,
            "run_migration_workflow",
            json!({"user_input": "save", "previous_state": state}),
        )
        .await?,
    )?;
    assert_eq!(state["step"], json!("logged"));
    assert!(output.join("migration_log.json").is_file());

    let invalid = call(
        &service,
        "run_migration_workflow",
        json!({"user_input": "verify", "previous_state": {"step": "migration_data"}}),
    )
    .await?;
    assert_eq!(invalid.is_error, Some(true));
    assert_eq!(payload(&invalid)?["code"], json!("invalid_state"));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}
