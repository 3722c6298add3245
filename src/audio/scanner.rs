use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("input folder '{0}' not found")]
    NotFound(String),
    #[error("'{0}' is not a directory")]
    NotADirectory(String),
    #[error("could not read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Non-recursive folder listing, filtered by extension.
pub struct TrackScanner {
    // Lowercased ".ext" suffixes, matched against the lowercased filename
    suffixes: Vec<String>,
}

impl TrackScanner {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            suffixes: extensions
                .iter()
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .collect(),
        }
    }

    /// List matching filenames in `dir`, sorted byte-wise ascending.
    /// An empty result is not an error; the caller decides whether it is fatal.
    pub fn list<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<String>, ScanError> {
        let dir = dir.as_ref();

        if !dir.exists() {
            return Err(ScanError::NotFound(dir.display().to_string()));
        }
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory(dir.display().to_string()));
        }

        let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
            path: dir.display().to_string(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ScanError::Io {
                path: dir.display().to_string(),
                source,
            })?;

            if !entry.path().is_file() {
                continue;
            }

            // Skip names that aren't valid UTF-8 rather than mangling them
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };

            if self.matches(name) {
                names.push(name.to_string());
            }
        }

        names.sort();
        debug!("found {} matching file(s) in {}", names.len(), dir.display());

        Ok(names)
    }

    fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn mp3_scanner() -> TrackScanner {
        TrackScanner::new(&["mp3".to_string()])
    }

    #[test]
    fn test_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.mp3", "a.MP3", "c.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let names = mp3_scanner().list(dir.path()).unwrap();
        assert_eq!(names, vec!["a.MP3", "b.mp3"]);
    }

    #[test]
    fn test_sort_is_byte_wise() {
        let dir = tempdir().unwrap();
        for name in ["b.mp3", "B.mp3", "a.mp3"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let names = mp3_scanner().list(dir.path()).unwrap();
        // Uppercase sorts before lowercase, no locale involved
        assert_eq!(names, vec!["B.mp3", "a.mp3", "b.mp3"]);
    }

    #[test]
    fn test_directories_are_not_listed() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("folder.mp3")).unwrap();
        File::create(dir.path().join("track.mp3")).unwrap();

        let names = mp3_scanner().list(dir.path()).unwrap();
        assert_eq!(names, vec!["track.mp3"]);
    }

    #[test]
    fn test_empty_folder_is_ok() {
        let dir = tempdir().unwrap();
        let names = mp3_scanner().list(dir.path()).unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_missing_folder() {
        let err = mp3_scanner().list("/no/such/folder").unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("track.mp3");
        File::create(&file_path).unwrap();

        let err = mp3_scanner().list(&file_path).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }
}
