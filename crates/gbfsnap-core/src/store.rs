// Consumer side of an export: what the image builder does with a pasted
// snapshot. EMP and artifact exports are kept per character id under
// `<store>/emp/<id>.json` and `<store>/artifact/<id>.json`.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::StoreError;

pub const EMP_DIR: &str = "emp";
pub const ARTIFACT_DIR: &str = "artifact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Party,
    Emp,
    Artifact,
}

pub fn classify_export(export: &Value) -> ExportKind {
    if export.get("emp").is_some() {
        ExportKind::Emp
    } else if export.get("artifact").is_some() {
        ExportKind::Artifact
    } else {
        ExportKind::Party
    }
}

/// Rejects exports from bookmarklets older than the first versioned one.
/// A missing or non-numeric `ver` counts as 0.
pub fn check_version(export: &Value) -> Result<f64, StoreError> {
    let ver = export.get("ver").and_then(Value::as_f64).unwrap_or(0.0);
    if ver < 1.0 {
        warn!(ver, "outdated export");
        return Err(StoreError::Outdated(ver));
    }
    Ok(ver)
}

/// What a party export holds, read without assuming any key is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartySummary {
    pub class_id: Option<i64>,
    pub allies: usize,
    pub summons: usize,
    pub weapons: usize,
}

pub fn summarize_party(export: &Value) -> PartySummary {
    let class_id = match export.get("p") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    PartySummary {
        class_id,
        allies: len_of(export, "c").unwrap_or(0),
        summons: len_of(export, "s").unwrap_or(0),
        weapons: len_of(export, "w").unwrap_or(0),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmpSummary {
    pub id: String,
    pub emp: usize,
    pub rings: usize,
    pub has_awakening: bool,
    /// `None` when the export predates the field.
    pub domain: Option<usize>,
    pub saint: Option<usize>,
    pub extra: Option<usize>,
}

fn len_of(export: &Value, key: &str) -> Option<usize> {
    export.get(key).map(|v| match v {
        Value::Array(a) => a.len(),
        Value::Object(m) => m.len(),
        _ => 0,
    })
}

fn id_key(export: &Value) -> String {
    match export.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// Ids become file names; anything that could leave the kind directory is refused.
fn check_id(id: &str) -> Result<(), StoreError> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', ':', '\0']);
    if bad {
        warn!(id, "unusable character id");
        return Err(StoreError::BadId(id.to_string()));
    }
    Ok(())
}

fn require(export: &Value, kind: &'static str, field: &'static str) -> Result<(), StoreError> {
    if export.get(field).is_none() {
        return Err(StoreError::Invalid { kind, field });
    }
    Ok(())
}

pub fn save_emp(store: &Path, export: &Value) -> Result<EmpSummary, StoreError> {
    for field in ["emp", "id", "ring"] {
        require(export, "EMP", field)?;
    }
    let summary = EmpSummary {
        id: id_key(export),
        emp: len_of(export, "emp").unwrap_or(0),
        rings: len_of(export, "ring").unwrap_or(0),
        has_awakening: export.get("awakening").is_some(),
        domain: len_of(export, "domain"),
        saint: len_of(export, "saint"),
        extra: len_of(export, "extra"),
    };
    let path = snapshot_path(store, EMP_DIR, &summary.id)?;
    write_json(&path, export)?;
    info!(id = %summary.id, emp = summary.emp, rings = summary.rings, "EMP saved");
    Ok(summary)
}

/// Keeps the last path segment of asset URLs and the number of `"Lv N"`.
pub fn normalize_artifact(export: &mut Value) {
    let Some(artifact) = export.get_mut("artifact").and_then(Value::as_object_mut) else {
        return;
    };
    if !(artifact.contains_key("img") && artifact.contains_key("skills")) {
        return;
    }
    if let Some(Value::String(img)) = artifact.get_mut("img") {
        *img = last_segment(img, '/');
    }
    if let Some(Value::Array(skills)) = artifact.get_mut("skills") {
        for skill in skills.iter_mut() {
            if let Some(Value::String(icon)) = skill.get_mut("icon") {
                *icon = last_segment(icon, '/');
            }
            if let Some(Value::String(lvl)) = skill.get_mut("lvl") {
                *lvl = last_segment(lvl, ' ');
            }
        }
    }
}

fn last_segment(s: &str, sep: char) -> String {
    s.rsplit(sep).next().unwrap_or(s).to_string()
}

/// Returns whether the character had an artifact equipped.
pub fn save_artifact(store: &Path, export: &Value) -> Result<bool, StoreError> {
    require(export, "artifact", "artifact")?;
    let id = id_key(export);
    let path = snapshot_path(store, ARTIFACT_DIR, &id)?;
    let mut export = export.clone();
    normalize_artifact(&mut export);
    let equipped = export
        .get("artifact")
        .is_some_and(|a| a.get("img").is_some() && a.get("skills").is_some());
    write_json(&path, &export)?;
    info!(%id, equipped, "artifact saved");
    Ok(equipped)
}

pub fn snapshot_path(store: &Path, kind: &str, id: &str) -> Result<PathBuf, StoreError> {
    check_id(id)?;
    Ok(store.join(kind).join(format!("{id}.json")))
}

pub fn write_json(path: &Path, value: &Value) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let s = serde_json::to_string(value)?;
    fs::write(path, s).map_err(|e| StoreError::io(path, e))
}

fn load(store: &Path, kind: &str, id: &str) -> Result<Option<Value>, StoreError> {
    let path = snapshot_path(store, kind, id)?;
    if !path.is_file() {
        return Ok(None);
    }
    let data = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
    Ok(Some(serde_json::from_slice(&data)?))
}

pub fn load_emp(store: &Path, id: &str) -> Result<Option<Value>, StoreError> {
    load(store, EMP_DIR, id)
}

pub fn load_artifact(store: &Path, id: &str) -> Result<Option<Value>, StoreError> {
    load(store, ARTIFACT_DIR, id)
}

/// Stored snapshot files, sorted.
pub fn list_saved(store: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for kind in [EMP_DIR, ARTIFACT_DIR] {
        let dir = store.join(kind);
        if let Ok(rd) = fs::read_dir(&dir) {
            for entry in rd.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json") {
                    out.push(p);
                }
            }
        }
    }
    out.sort();
    out
}

/// Result of [`backup_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    pub path: PathBuf,
    /// Archive names of the snapshots written, `<kind>/<id>.json`.
    pub files: Vec<String>,
}

fn snapshot_entry(store: &Path, entry: &walkdir::DirEntry) -> Option<String> {
    let path = entry.path();
    if !entry.file_type().is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
        return None;
    }
    let rel = path.strip_prefix(store).ok()?;
    let kind = rel.parent()?.to_str()?;
    if kind != EMP_DIR && kind != ARTIFACT_DIR {
        return None;
    }
    Some(format!("{}/{}", kind, rel.file_name()?.to_str()?))
}

/// Archives every stored snapshot into `<store name>_<timestamp>.zip` beside
/// the store. Other files in the store are left out.
pub fn backup_store(store: &Path) -> Result<Backup, StoreError> {
    if !store.is_dir() {
        return Err(StoreError::io(
            store,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no snapshot store"),
        ));
    }
    let stem = store
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("snapshots");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = store
        .parent()
        .unwrap_or(Path::new("."))
        .join(format!("{stem}_{stamp}.zip"));

    let mut snapshots = Vec::new();
    for entry in WalkDir::new(store).min_depth(2).max_depth(2).sort_by_file_name() {
        let entry = entry?;
        if let Some(name) = snapshot_entry(store, &entry) {
            snapshots.push((name, entry.into_path()));
        }
    }

    let out = fs::File::create(&path).map_err(|e| StoreError::io(&path, e))?;
    let mut archive = zip::ZipWriter::new(out);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    let mut files = Vec::with_capacity(snapshots.len());
    for (name, src) in snapshots {
        let data = fs::read(&src).map_err(|e| StoreError::io(&src, e))?;
        archive.start_file(name.as_str(), options)?;
        archive
            .write_all(&data)
            .map_err(|e| StoreError::io(&path, e))?;
        files.push(name);
    }
    archive.finish()?;
    info!(path = %path.display(), files = files.len(), "store backed up");
    Ok(Backup { path, files })
}
