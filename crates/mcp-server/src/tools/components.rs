use super::context::ToolContext;
use super::errors::{catalog_error, component_not_found, unknown_version, ToolOutcome};
use super::schemas::components::{
    ComponentMigrationDataRequest, ComponentMigrationDataResult, ComponentSide,
    GetComponentRequest, GetComponentResult, ListComponentsRequest, ListComponentsResult,
};
use crate::runtime_env::VersionProfile;
use modus_migrate_catalog::{
    detect_related, resolve, suggest_name_mappings, suggestions, summarize_table, ComponentRecord,
    ComponentTable,
};
use std::path::Path;

fn profile_for<'a>(ctx: &'a ToolContext, version: Option<&str>) -> ToolOutcome<&'a VersionProfile> {
    let config = ctx.config();
    let version = version
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(config.target.version.as_str());
    config
        .profile(version)
        .ok_or_else(|| unknown_version(version, &config.known_versions()))
}

fn table_file_name(profile: &VersionProfile) -> &str {
    Path::new(&profile.components_file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(profile.components_file.as_str())
}

pub(crate) fn compute_list_components(
    ctx: &ToolContext,
    request: ListComponentsRequest,
) -> ToolOutcome<ListComponentsResult> {
    let profile = profile_for(ctx, request.version.as_deref())?;
    let table = ctx.table(profile).map_err(|err| {
        log::error!("list_components: {err}");
        catalog_error(&err)
    })?;

    let components = summarize_table(&table, &profile.naming(), &profile.version);
    Ok(ListComponentsResult {
        total_count: components.len(),
        components,
        version: profile.version.clone(),
    })
}

pub(crate) fn compute_get_component(
    ctx: &ToolContext,
    request: GetComponentRequest,
) -> ToolOutcome<GetComponentResult> {
    let profile = profile_for(ctx, request.version.as_deref())?;
    let table = ctx.table(profile).map_err(|err| catalog_error(&err))?;
    let naming = profile.naming();

    let Some(found) =
        resolve(&request.component_name, &table, &naming).map_err(|err| catalog_error(&err))?
    else {
        return Err(component_not_found(
            request.component_name.trim(),
            table_file_name(profile),
            &profile.version,
            suggestions(&table, &naming),
        ));
    };

    Ok(GetComponentResult {
        component_name: request.component_name.trim().to_string(),
        tag_name: naming.tag_of_key(found.key).to_string(),
        version: profile.version.clone(),
        key: found.key.to_string(),
        resolved_by: found.rule,
        record: found.record.clone(),
    })
}

fn side(profile: &VersionProfile, tag: &str, hit: Option<(&str, &ComponentRecord)>) -> ComponentSide {
    ComponentSide {
        tag: tag.to_string(),
        key: hit.map(|(key, _)| key.to_string()),
        version: profile.version.clone(),
        record: hit.map(|(_, record)| record.clone()),
    }
}

/// Everything an agent needs to migrate one source component.
///
/// Only the source lookup is fatal. A missing mapping or target table degrades to
/// `warnings` so the caller still gets the source side.
pub(crate) fn compute_component_migration_data(
    ctx: &ToolContext,
    request: ComponentMigrationDataRequest,
) -> ToolOutcome<ComponentMigrationDataResult> {
    let source_profile = ctx.source();
    let target_profile = ctx.target();
    let source_naming = source_profile.naming();
    let target_naming = target_profile.naming();

    let source_table = ctx.source_table().map_err(|err| {
        log::error!("get_component_migration_data: {err}");
        catalog_error(&err)
    })?;
    let Some(found) = resolve(&request.component_name, &source_table, &source_naming)
        .map_err(|err| catalog_error(&err))?
    else {
        return Err(component_not_found(
            request.component_name.trim(),
            table_file_name(source_profile),
            &source_profile.version,
            suggestions(&source_table, &source_naming),
        ));
    };
    let source_tag = source_naming.tag_of_key(found.key);
    let simple_name = source_naming.simple_name(found.key);
    let mut warnings = Vec::new();

    let mapping = match ctx.mapping() {
        Ok(mapping) => Some(mapping),
        Err(err) => {
            log::warn!("component mapping unavailable: {err}");
            warnings.push(format!("Component mapping unavailable: {err}"));
            None
        }
    };
    let entry = mapping
        .as_ref()
        .and_then(|mapping| mapping.entry(source_tag).cloned());

    let target_tag = match &entry {
        Some(entry) => entry.target_tag.clone(),
        None => {
            if mapping.is_some() {
                warnings.push(format!(
                    "'{source_tag}' has no mapping entry; matched the target by name"
                ));
            }
            Some(target_naming.tag_for(simple_name))
        }
    };

    let target_table: Option<std::sync::Arc<ComponentTable>> = match ctx.target_table() {
        Ok(table) => Some(table),
        Err(err) => {
            log::warn!("target components unavailable: {err}");
            warnings.push(format!("Target components unavailable: {err}"));
            None
        }
    };

    let mut target = None;
    let mut related = Vec::new();
    if let (Some(tag), Some(table)) = (target_tag.as_deref(), target_table.as_deref()) {
        let hit = resolve(tag, table, &target_naming)
            .ok()
            .flatten()
            .map(|r| (r.key, r.record));
        match hit {
            Some((key, record)) => {
                let anchor_name = target_naming.simple_name(key);
                match detect_related(anchor_name, record, table, &target_naming) {
                    Ok(found) => related = found,
                    Err(err) => warnings.push(format!("Related component scan failed: {err}")),
                }
            }
            None => warnings.push(format!("Target component '{tag}' not found in target table")),
        }
        target = Some(side(target_profile, tag, hit));
    }

    let target_record = target.as_ref().and_then(|t| t.record.as_ref());
    let member_mappings = suggest_name_mappings(found.record, target_record);
    let verification_rules = mapping
        .as_ref()
        .map(|mapping| {
            mapping
                .rules_for(source_tag, target_tag.as_deref())
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Ok(ComponentMigrationDataResult {
        component_name: simple_name.to_string(),
        source: side(source_profile, source_tag, Some((found.key, found.record))),
        target,
        mapping: entry,
        member_mappings,
        related_components: related,
        verification_rules,
        warnings,
    })
}
