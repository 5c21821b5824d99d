use modus_migrate_catalog::{CatalogError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write `value` as pretty JSON, replacing `path` only once the new content is fully on disk.
///
/// The payload goes to a sibling `<name>.json.tmp` file first and is renamed into place,
/// so a failed write leaves any previous file untouched.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut data = serde_json::to_vec_pretty(value)
        .map_err(|err| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;
    data.push(b'\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = path.with_extension("json.tmp");
    if let Err(err) = fs::write(&tmp, &data) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(err));
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(err));
    }
    log::debug!("wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn writes_pretty_json_and_overwrites() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("reports").join("analysis_report.json");

        write_json_atomic(&path, &json!({"status": "first"})).expect("first write");
        write_json_atomic(&path, &json!({"status": "second"})).expect("second write");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.contains("\n  \"status\""));
        let value: Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(value, json!({"status": "second"}));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_write_keeps_previous_file() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("migration_log.json");
        write_json_atomic(&path, &json!({"v": 1})).expect("write");

        // A directory squatting on the temp path makes the staging write fail.
        fs::create_dir_all(path.with_extension("json.tmp")).expect("mkdir");
        let err = write_json_atomic(&path, &json!({"v": 2})).unwrap_err();
        assert!(matches!(err, CatalogError::Write { .. }));

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, json!({"v": 1}));
    }

    #[test]
    fn staging_file_does_not_collide_with_plain_tmp_sibling() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("analysis_report.json");
        let unrelated = tmp.path().join("analysis_report.tmp");
        fs::write(&unrelated, "keep").expect("write sibling");

        write_json_atomic(&path, &json!({"status": "Saved"})).expect("write");

        assert_eq!(fs::read_to_string(&unrelated).expect("read sibling"), "keep");
        assert!(!tmp.path().join("analysis_report.json.tmp").exists());
        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, json!({"status": "Saved"}));
    }
}
