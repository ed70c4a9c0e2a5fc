use crate::classify::{classify, ExportClass};
use crate::error::SceneError;
use crate::model::ObjectId;
use crate::scene::Scene;
use std::collections::BTreeMap;

/// Characters the target file systems reject in file names.
pub const FORBIDDEN_FILE_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Separates the provenance label from the object name in placeholder names.
pub const TOKEN_DELIMITER: char = '=';

pub const DEFAULT_BLOCK_TOKEN: &str = "Block";

pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILE_CHARS.contains(c))
        .collect()
}

/// File-safe name that also cannot be confused with a placeholder delimiter.
pub fn sanitize_token(name: &str) -> String {
    sanitize_file_name(name).replace(TOKEN_DELIMITER, "-")
}

/// Directory and file prefix of a block definition. Names with nothing
/// file safe left in them fall back to [`DEFAULT_BLOCK_TOKEN`].
pub fn block_token(definition: &str) -> String {
    let token = sanitize_token(definition);
    if token.is_empty() {
        DEFAULT_BLOCK_TOKEN.to_string()
    } else {
        token
    }
}

pub fn default_name(class: Option<ExportClass>) -> &'static str {
    match class {
        Some(ExportClass::Lights) => "Light",
        Some(_) => "Object",
        None => "Unknown",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub object: ObjectId,
    /// `None` when the object never had a name, distinct from `Some("")`.
    pub original: Option<String>,
}

/// Temporary names handed out in one export scope, keyed by the new name.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    entries: BTreeMap<String, NameEntry>,
}

impl NameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn unique_from(&self, base: &str, force_suffix: bool) -> String {
        if !force_suffix && !self.contains(base) {
            return base.to_string();
        }
        (0u64..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

/// Renames `object` to a name that is file safe and unique within `map`,
/// remembering its original name. Unnamed objects always get a `_N` suffix.
pub fn assign_unique_name<S: Scene + ?Sized>(
    scene: &mut S,
    object: ObjectId,
    map: &mut NameMap,
) -> Result<String, SceneError> {
    let original = scene.name(object)?;
    let kind = scene.kind(object)?;

    let mut base = sanitize_token(original.as_deref().unwrap_or(""));
    if base.is_empty() {
        base = default_name(classify(kind)).to_string();
    }
    let originally_empty = original.as_deref().map_or(true, str::is_empty);
    let name = map.unique_from(&base, originally_empty);

    scene.set_name(object, Some(&name))?;
    map.entries.insert(name.clone(), NameEntry { object, original });
    Ok(name)
}

/// Restores every object still carrying its temporary name, then clears the
/// map. Objects that were deleted or renamed since are skipped.
pub fn revert_names<S: Scene + ?Sized>(scene: &mut S, map: &mut NameMap) -> Result<(), SceneError> {
    let mut first_err = None;
    for (name, entry) in std::mem::take(&mut map.entries) {
        if !scene.contains(entry.object) {
            continue;
        }
        let current = match scene.name(entry.object) {
            Ok(current) => current,
            Err(err) => {
                first_err.get_or_insert(err);
                continue;
            }
        };
        if current.as_deref() != Some(name.as_str()) {
            continue;
        }
        if let Err(err) = scene.set_name(entry.object, entry.original.as_deref()) {
            first_err.get_or_insert(err);
        }
    }
    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
