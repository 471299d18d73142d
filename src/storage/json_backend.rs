use std::{
    env, fs,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::BudgetError;

use super::{Result, StorageBackend};

const DEFAULT_DIR_NAME: &str = ".budget_split";
const TMP_SUFFIX: &str = "tmp";

/// File-per-key backend storing each value as `<key>.json` under an
/// application data directory.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend rooted at `root`, or at the resolved default
    /// directory (`$BUDGET_SPLIT_HOME`, falling back to `~/.budget_split`).
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", canonical_key(key)))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Returns the application data directory, defaulting to `~/.budget_split`.
pub fn default_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BUDGET_SPLIT_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    if !path.is_dir() {
        return Err(BudgetError::Storage(format!(
            "`{}` exists and is not a directory",
            path.display()
        )));
    }
    Ok(())
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn backend_with_temp_dir() -> (JsonFileBackend, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let backend = JsonFileBackend::new(Some(temp.path().to_path_buf())).expect("backend");
        (backend, temp)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (backend, _guard) = backend_with_temp_dir();
        assert_eq!(backend.read("current_budget").expect("read"), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let (backend, _guard) = backend_with_temp_dir();
        backend.write("current_budget", "{\"a\":1}").expect("write");
        assert_eq!(
            backend.read("current_budget").expect("read").as_deref(),
            Some("{\"a\":1}")
        );
    }

    #[test]
    fn writes_leave_no_tmp_files_behind() {
        let (backend, guard) = backend_with_temp_dir();
        backend.write("saved_budgets", "[]").expect("write");
        let leftovers: Vec<_> = fs::read_dir(guard.path())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == TMP_SUFFIX)
                    .unwrap_or(false)
            })
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn keys_are_canonicalised_into_file_names() {
        let (backend, guard) = backend_with_temp_dir();
        backend.write("Saved Budgets!", "[]").expect("write");
        assert!(guard.path().join("saved_budgets_.json").exists());
    }

    #[test]
    fn remove_is_idempotent() {
        let (backend, _guard) = backend_with_temp_dir();
        backend.write("k", "v").expect("write");
        backend.remove("k").expect("remove");
        backend.remove("k").expect("second remove");
        assert_eq!(backend.read("k").expect("read"), None);
    }
}
