use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub fn locate_modus_migrate_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_modus-migrate-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` -> `.../target/{debug|release}/modus-migrate-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("modus-migrate-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in [
        "target/debug/modus-migrate-mcp",
        "target/release/modus-migrate-mcp",
    ] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!(
        "failed to locate modus-migrate-mcp binary; build with: cargo build -p modus-migrate-mcp"
    )
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("mkdir {}", parent.display()))?;
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("write {}", path.display()))
}

/// Minimal install root: two component tables, a mapping, MUI data and prompts.
#[allow(dead_code)]
pub fn write_install(root: &Path) -> Result<()> {
    let analysis = root.join("data").join("component_analysis");
    write_json(
        &analysis.join("v1_components.json"),
        &json!({
            "modus-button.js": {
                "props": [{"name": "buttonStyle", "type": "string"}, {"name": "disabled", "type": "boolean"}],
                "events": [{"name": "buttonClick"}],
                "documentation": "Clickable button."
            },
            "modus-alert.js": {"props": [{"name": "message"}], "documentation": ""},
            "modus-old-thing.js": {"props": []}
        }),
    )?;
    write_json(
        &analysis.join("v2_components.json"),
        &json!({
            "modus-wc-button.tsx": {
                "props": [{"name": "variant", "type": "string"}, {"name": "disabled", "type": "boolean"}],
                "events": [{"name": "buttonClick"}],
                "documentation": "Use next to a modus-wc-alert."
            },
            "modus-wc-alert.tsx": {"props": [{"name": "alert-title"}], "documentation": ""}
        }),
    )?;
    write_json(
        &analysis.join("component_mapping.json"),
        &json!({
            "Mapping_v1_v2": {
                "modus-button": "modus-wc-button",
                "modus-alert": "modus-wc-alert",
                "modus-old-thing": "Not Found"
            },
            "migration_plan": [{"phase": 1, "components": ["modus-button"]}],
            "verification_rules": [{"rule": "No v1 tags remain"}]
        }),
    )?;
    let mui = root.join("data").join("mui");
    write_json(
        &mui.join("mui_to_modus_mapping.json"),
        &json!({
            "mapping": {"Button": {"modus_component": "modus-wc-button"}},
            "no_direct_mapping": ["Grid"],
            "migration_notes": {"general": "Use web components."}
        }),
    )?;
    write_json(&mui.join("mui_v7_components.json"), &json!({}))?;

    let prompts = root.join("md_prompts");
    fs::create_dir_all(&prompts).context("mkdir md_prompts")?;
    for name in ["analysis.md", "migrate.md", "verify.md", "log.md", "workflow.md"] {
        fs::write(prompts.join(name), format!("# {name}\n"))
            .with_context(|| format!("write {name}"))?;
    }
    Ok(())
}
