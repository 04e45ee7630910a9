use serde::Serialize;
use std::collections::BTreeMap;
use std::path::MAIN_SEPARATOR;

/// Key/value view of the process configuration, rebuilt for every request.
///
/// Serialises as a flat JSON object. Keys are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertiesDocument(BTreeMap<String, String>);

impl PropertiesDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless `key` is already present.
    /// Returns whether the entry was added.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.0.entry(key.into()) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
impl PropertiesDocument {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Explicit set of process facts published by `/properties`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    pub os_name: &'static str,
    pub os_arch: &'static str,
    pub os_family: &'static str,
    pub file_separator: char,
    pub path_separator: char,
    pub line_separator: &'static str,
    pub user_dir: Option<String>,
    pub app_name: &'static str,
    pub app_version: &'static str,
    pub process_id: u32,
}

impl SystemSnapshot {
    pub fn capture() -> Self {
        let user_dir = std::env::current_dir()
            .ok()
            .map(|dir| dir.display().to_string());

        Self {
            os_name: std::env::consts::OS,
            os_arch: std::env::consts::ARCH,
            os_family: std::env::consts::FAMILY,
            file_separator: MAIN_SEPARATOR,
            path_separator: if cfg!(windows) { ';' } else { ':' },
            line_separator: if cfg!(windows) { "\r\n" } else { "\n" },
            user_dir,
            app_name: env!("CARGO_PKG_NAME"),
            app_version: env!("CARGO_PKG_VERSION"),
            process_id: std::process::id(),
        }
    }

    /// Builds the document, then appends `custom` entries that do not
    /// shadow a built-in key.
    pub fn to_document(&self, custom: &BTreeMap<String, String>) -> PropertiesDocument {
        let mut document = PropertiesDocument::new();
        document.insert_if_absent("os.name", self.os_name);
        document.insert_if_absent("os.arch", self.os_arch);
        document.insert_if_absent("os.family", self.os_family);
        document.insert_if_absent("file.separator", self.file_separator.to_string());
        document.insert_if_absent("path.separator", self.path_separator.to_string());
        document.insert_if_absent("line.separator", self.line_separator);
        if let Some(user_dir) = &self.user_dir {
            document.insert_if_absent("user.dir", user_dir.as_str());
        }
        document.insert_if_absent("app.name", self.app_name);
        document.insert_if_absent("app.version", self.app_version);
        document.insert_if_absent("process.id", self.process_id.to_string());

        for (key, value) in custom {
            if !document.insert_if_absent(key.as_str(), value.as_str()) {
                tracing::debug!("Ignoring custom property {} shadowing a built-in key", key);
            }
        }
        document
    }
}
