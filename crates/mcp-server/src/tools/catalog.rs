use serde_json::json;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) summary: &'static str,
}

pub(crate) const TOOL_CATALOG: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "server_capabilities",
        summary: "Handshake: server version, resolved data paths, and start route.",
    },
    ToolDescriptor {
        name: "list_components",
        summary: "Components of one library version with descriptions and capabilities.",
    },
    ToolDescriptor {
        name: "get_component",
        summary: "Props, events, slots and docs for one component (fuzzy name match).",
    },
    ToolDescriptor {
        name: "get_component_migration_data",
        summary: "Source + target records, mapping, prop suggestions, related components, rules.",
    },
    ToolDescriptor {
        name: "get_migration_guide",
        summary: "Full mapping table, migration plan, rules and the workflow narrative.",
    },
    ToolDescriptor {
        name: "get_all_migration_data",
        summary: "Everything in one call (cache it): mapping, plan, rules, whole target table.",
    },
    ToolDescriptor {
        name: "analyze_code_for_migration",
        summary: "Count source tags in markup and suggest target tags (optionally save).",
    },
    ToolDescriptor {
        name: "generate_migrated_code",
        summary: "Rewrite source tags to target tags from a complete analysis report.",
    },
    ToolDescriptor {
        name: "get_verification_rules",
        summary: "Verification checklist, rules, and leftover source tags in migrated markup.",
    },
    ToolDescriptor {
        name: "log_migration_summary",
        summary: "Preview or save migration_log.json from the step reports.",
    },
    ToolDescriptor {
        name: "run_migration_workflow",
        summary: "Step-by-step workflow (analyze → migrate → verify → log) with caller-held state.",
    },
    ToolDescriptor {
        name: "get_guidance",
        summary: "Markdown guidance + data + output dirs for one workflow step (modus or mui).",
    },
    ToolDescriptor {
        name: "list_mui_components",
        summary: "MUI components with and without a Modus mapping.",
    },
    ToolDescriptor {
        name: "get_mui_component_mapping",
        summary: "Modus equivalent and migration notes for one MUI component.",
    },
    ToolDescriptor {
        name: "transform_mui_props",
        summary: "Translate MUI props to Modus attributes (Button, TextField, Checkbox rules).",
    },
];

pub(crate) fn tool_names() -> Vec<String> {
    TOOL_CATALOG
        .iter()
        .map(|tool| tool.name.to_string())
        .collect()
}

pub(crate) fn tool_inventory_json(version: &str) -> serde_json::Value {
    let tools: Vec<serde_json::Value> = TOOL_CATALOG
        .iter()
        .map(|tool| json!({ "name": tool.name, "summary": tool.summary }))
        .collect();

    json!({
        "binary": "modus-migrate-mcp",
        "version": version,
        "count": tools.len(),
        "tools": tools,
    })
}

pub(crate) fn tool_instructions() -> String {
    let mut lines = vec![
        "Modus migration data for agents rewriting Modus 1.0 (or MUI) markup to Modus 2.0 web components."
            .to_string(),
        "Recommended flow: get_all_migration_data once → analyze_code_for_migration → generate_migrated_code → get_verification_rules → log_migration_summary; or drive run_migration_workflow step by step."
            .to_string(),
        "Use get_component / get_component_migration_data for per-component detail.".to_string(),
        "Tools:".to_string(),
    ];
    for tool in TOOL_CATALOG {
        lines.push(format!("- {}: {}", tool.name, tool.summary));
    }
    lines.join("\n")
}
