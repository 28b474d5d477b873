//! Catalog store backed by a single JSON file
//!
//! Provides a `CatalogStore` that loads the template catalog from disk and
//! downloads it from imgflip when the file does not exist yet.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::data::{Catalog, FetchError, MemesClient};

/// Errors that can occur when loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading or writing the cache file failed
    #[error("Cannot access memes file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The cache file is not a valid template list
    #[error("Invalid memes file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Downloading the catalog failed
    #[error(transparent)]
    Remote(#[from] FetchError),
}

/// Reads and populates the on-disk template catalog
///
/// The cache file holds exactly the `memes` array returned by imgflip, in the
/// order the API returned it.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    /// Location of the cache file
    path: PathBuf,
    /// Client used on a cache miss
    client: MemesClient,
}

impl CatalogStore {
    /// Creates a store for the cache file at `path`
    pub fn new(path: impl Into<PathBuf>, client: MemesClient) -> Self {
        Self {
            path: path.into(),
            client,
        }
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, downloading it first if the cache file is missing
    ///
    /// # Returns
    /// * `Ok(Catalog)` in remote API order
    /// * `Err(CatalogError::Remote)` if the download fails
    /// * `Err(CatalogError::Io)` / `Err(CatalogError::Parse)` if the file
    ///   cannot be read or is not a template list
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let exists = self
            .path
            .try_exists()
            .map_err(|source| self.io_error(source))?;
        if !exists {
            self.fetch_remote().await?;
        }

        self.read()
    }

    /// Downloads the catalog and overwrites the cache file with it
    pub async fn fetch_remote(&self) -> Result<(), CatalogError> {
        eprintln!("Downloading memes file to {}", self.path.display());

        let memes = self.client.fetch_memes().await?;
        self.write(&memes)
    }

    fn read(&self) -> Result<Catalog, CatalogError> {
        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;

        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, memes: &[Value]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_vec(memes).map_err(|e| self.io_error(e.into()))?;

        let temp_path = self.temp_path();
        write_atomic(&self.path, &temp_path, &json).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(source)
        })
    }

    /// Sibling of the cache file used while writing, e.g. `memes.json.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> CatalogError {
        CatalogError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Writes `bytes` to `temp_path`, then renames it over `path`.
fn write_atomic(path: &Path, temp_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(temp_path, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_store(file_name: &str) -> (CatalogStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Unroutable base URL; these tests must never reach the network
        let client = MemesClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
        let store = CatalogStore::new(temp_dir.path().join(file_name), client);
        (store, temp_dir)
    }

    #[test]
    fn test_write_creates_file_with_exact_array() {
        let (store, _temp_dir) = create_test_store("memes.json");
        let memes = vec![json!({"id":"1","name":"Y U No","url":"u1","width":1,"height":2,"box_count":2})];

        store.write(&memes).expect("Write should succeed");

        let content = fs::read_to_string(store.path()).expect("Should read file");
        let parsed: Value = serde_json::from_str(&content).expect("Cache should be valid JSON");
        assert_eq!(parsed, Value::Array(memes));
    }

    #[test]
    fn test_write_replaces_existing_file_and_leaves_no_temp_file() {
        let (store, temp_dir) = create_test_store("memes.json");
        fs::write(store.path(), "[{\"truncated\"").expect("Should seed cache");

        store
            .write(&[json!({"id":"1","name":"Fresh","url":"u"})])
            .expect("Write should succeed");

        let catalog = store.read().expect("Read should succeed");
        assert_eq!(catalog.templates()[0].name, "Fresh");
        assert!(!temp_dir.path().join("memes.json.tmp").exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_write_keeps_previous_cache() {
        let (store, temp_dir) = create_test_store("memes.json");
        fs::write(store.path(), "[]").expect("Should seed cache");
        // A directory in the temp file's place makes the write fail
        fs::create_dir(temp_dir.path().join("memes.json.tmp")).expect("Should create dir");

        let err = store.write(&[json!({"id":"1","name":"New","url":"u"})]).unwrap_err();

        assert!(matches!(err, CatalogError::Io { .. }));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let (store, temp_dir) = create_test_store("nested/dir/memes.json");

        store.write(&[]).expect("Write should succeed");

        assert!(temp_dir.path().join("nested").join("dir").join("memes.json").exists());
    }

    #[test]
    fn test_read_parses_catalog_in_order() {
        let (store, _temp_dir) = create_test_store("memes.json");
        fs::write(
            store.path(),
            r#"[{"id":"2","name":"Second","url":"u2"},{"id":"1","name":"First","url":"u1"}]"#,
        )
        .expect("Should seed cache");

        let catalog = store.read().expect("Read should succeed");

        let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn test_read_invalid_content_is_parse_error() {
        let (store, _temp_dir) = create_test_store("memes.json");
        fs::write(store.path(), "{not json").expect("Should seed cache");

        let err = store.read().unwrap_err();

        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("memes.json"));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let (store, _temp_dir) = create_test_store("absent.json");

        assert!(matches!(store.read(), Err(CatalogError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_uses_existing_cache_without_fetching() {
        let (store, _temp_dir) = create_test_store("memes.json");
        fs::write(
            store.path(),
            r#"[{"id":"61579","name":"One Does Not Simply","url":"https://i.imgflip.com/1bij.jpg","width":568,"height":335}]"#,
        )
        .expect("Should seed cache");

        let catalog = store.load().await.expect("Load should succeed from cache");

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.templates()[0].id, "61579");
    }

    #[tokio::test]
    async fn test_load_stat_failure_is_io_error_without_fetching() {
        let (store, temp_dir) = create_test_store("not-a-dir/memes.json");
        // The cache path's parent is a regular file, so stat fails with ENOTDIR
        fs::write(temp_dir.path().join("not-a-dir"), "").expect("Should create file");

        let err = store.load().await.unwrap_err();

        assert!(
            matches!(err, CatalogError::Io { .. }),
            "Expected Io error, got {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_load_surfaces_fetch_failure_on_cache_miss() {
        let (store, _temp_dir) = create_test_store("memes.json");

        let err = store.load().await.unwrap_err();

        assert!(matches!(err, CatalogError::Remote(FetchError::Network(_))));
        assert!(!store.path().exists(), "Failed fetch must not create the cache");
    }
}
