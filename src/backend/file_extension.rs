//! File extension detection for the reference backend's file-loading helpers.

use std::ffi::OsStr;
use std::path::Path;

/// The file extension of a path passed to the reference backend's loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileExtension {
    Csv,
    Json,
    NDJson,
    Parquet,
    Unknown(String),
    Missing,
}

impl FileExtension {
    pub fn from_path(path: &Path) -> Self {
        match path.extension_as_lowercase().as_deref() {
            Some("csv") => FileExtension::Csv,
            Some("json") => FileExtension::Json,
            Some("ndjson") => FileExtension::NDJson,
            Some("parquet") => FileExtension::Parquet,
            Some(ext) => FileExtension::Unknown(ext.to_owned()),
            None => FileExtension::Missing,
        }
    }
}

/// Extends `Path` with lowercase extension lookup.
pub trait PathExtension {
    fn extension_as_lowercase(&self) -> Option<String>;
}

impl PathExtension for Path {
    fn extension_as_lowercase(&self) -> Option<String> {
        self.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_extensions() {
        assert_eq!(FileExtension::from_path(Path::new("a.csv")), FileExtension::Csv);
        assert_eq!(FileExtension::from_path(Path::new("a.PARQUET")), FileExtension::Parquet);
        assert_eq!(FileExtension::from_path(Path::new("a.ndjson")), FileExtension::NDJson);
    }

    #[test]
    fn unknown_and_missing_extensions() {
        assert_eq!(
            FileExtension::from_path(Path::new("a.xyz")),
            FileExtension::Unknown("xyz".to_string())
        );
        assert_eq!(FileExtension::from_path(Path::new("a")), FileExtension::Missing);
    }
}
