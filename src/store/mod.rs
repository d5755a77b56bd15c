//! Document store
//!
//! Read-only access to profiles on disk. A profile is a directory under the
//! profiles root laid out as:
//!
//! ```text
//! <profile>/
//!   profile-config.yml          (optional)
//!   standards/
//!     <category>/
//!       <name>.md
//! ```
//!
//! Only one category level is scanned; anything deeper is ignored.

mod document;

pub use document::{Document, Profile};

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

use profile_config::{validate_profile_name, ConfigError, ProfileConfig, StandardKey};

use crate::error::ResolveError;
use crate::settings::{ResolverSettings, SettingsError};

/// Loads profiles and their documents from the profiles root
#[derive(Debug, Clone)]
pub struct DocumentStore {
    settings: ResolverSettings,
}

impl DocumentStore {
    /// Store over validated settings
    pub fn new(settings: ResolverSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Directory of a named profile. The name must be a single path component.
    pub fn profile_root(&self, name: &str) -> Result<PathBuf, ResolveError> {
        validate_profile_name(name).map_err(ResolveError::InvalidProfileName)?;
        Ok(self.settings.profiles_root.join(name))
    }

    /// Names of all profiles under the profiles root, sorted
    pub fn list_profiles(&self) -> Result<Vec<String>, ResolveError> {
        let root = &self.settings.profiles_root;
        if !root.is_dir() {
            return Err(ResolveError::NotFound(root.clone()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        {
            let entry = entry?;
            if entry.file_type().is_dir() && !is_hidden(&entry) {
                names.push(utf8_name(entry.path())?);
            }
        }
        Ok(names)
    }

    /// Load a profile's config and its own documents
    pub fn load_profile(&self, name: &str) -> Result<Profile, ResolveError> {
        let root = self.profile_root(name)?;
        if !root.is_dir() {
            return Err(ResolveError::ProfileNotFound {
                name: name.to_string(),
                path: root,
            });
        }

        let (config, config_digest) = self.load_config(name, &root)?;
        let exclusions = config
            .exclusions(&self.settings.standards_dir)
            .map_err(|source| ResolveError::Config {
                profile: name.to_string(),
                source,
            })?;

        let documents: Vec<Arc<Document>> = self
            .list_documents(&root)?
            .into_iter()
            .map(Arc::new)
            .collect();

        tracing::debug!(
            "Loaded profile '{}' from {:?} ({} documents, parent: {:?})",
            name,
            root,
            documents.len(),
            config.parent
        );

        Ok(Profile {
            name: name.to_string(),
            root,
            config,
            exclusions,
            config_digest,
            documents,
        })
    }

    /// Read every standards document directly owned by the profile at
    /// `profile_root`, sorted by (category, filename).
    ///
    /// The owning profile's name is the directory name.
    pub fn list_documents(&self, profile_root: &Path) -> Result<Vec<Document>, ResolveError> {
        if !profile_root.is_dir() {
            return Err(ResolveError::NotFound(profile_root.to_path_buf()));
        }
        let profile = profile_name_of(profile_root)?;

        let standards_root = profile_root.join(&self.settings.standards_dir);
        if !standards_root.is_dir() {
            tracing::debug!("No standards directory in {:?}", profile_root);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let walker = WalkDir::new(&standards_root)
            .min_depth(1)
            .max_depth(2)
            .follow_links(true)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            let is_dir = entry.file_type().is_dir();

            match (entry.depth(), is_dir) {
                (1, true) => continue,
                (1, false) => {
                    tracing::debug!("Skipping uncategorized file: {}", path.display());
                    continue;
                }
                (_, true) => {
                    tracing::debug!("Skipping nested directory: {}", path.display());
                    continue;
                }
                _ => {}
            }

            if !self.is_document(path) {
                tracing::debug!("Skipping non-document file: {}", path.display());
                continue;
            }

            let category = utf8_name(path.parent().unwrap_or(path))?;
            let filename = utf8_name(path)?;

            let content = read_text(path)?;
            documents.push(Document::new(
                profile.clone(),
                StandardKey::new(category, filename),
                content,
                path,
            ));
        }

        documents.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(documents)
    }

    fn is_document(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.settings.document_extension.as_str())
    }

    /// Parse the profile config, returning it with the digest of its raw bytes
    fn load_config(
        &self,
        name: &str,
        root: &Path,
    ) -> Result<(ProfileConfig, Option<String>), ResolveError> {
        let path = root.join(&self.settings.config_file);
        if !path.is_file() {
            return Ok((ProfileConfig::default(), None));
        }

        let config_error = |source: ConfigError| ResolveError::Config {
            profile: name.to_string(),
            source,
        };

        let bytes = fs::read(&path).map_err(|e| config_error(ConfigError::Io(e)))?;
        let digest = hex::encode(Sha256::digest(&bytes));

        let content = String::from_utf8(bytes).map_err(|e| {
            config_error(ConfigError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
        })?;
        let config = ProfileConfig::parse(&content).map_err(config_error)?;

        Ok((config, Some(digest)))
    }
}

fn profile_name_of(profile_root: &Path) -> Result<String, ResolveError> {
    profile_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ResolveError::InvalidProfileName(ConfigError::InvalidProfileName {
                name: profile_root.display().to_string(),
                reason: "path has no final component".to_string(),
            })
        })
}

/// Final component of `path`, which must be UTF-8
fn utf8_name(path: &Path) -> Result<String, ResolveError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ResolveError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, "name is not valid UTF-8"),
        })
}

fn read_text(path: &Path) -> Result<String, ResolveError> {
    let bytes = fs::read(path).map_err(|source| ResolveError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|e| ResolveError::Read {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn store(temp: &TempDir) -> DocumentStore {
        DocumentStore::new(ResolverSettings::new(temp.path())).unwrap()
    }

    #[test]
    fn test_list_documents_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("default");
        write(&root, "standards/testing/unit-testing.md", b"unit");
        write(&root, "standards/global/naming.md", b"naming");
        write(&root, "standards/backend/api.md", b"api");

        let docs = store(&temp).list_documents(&root).unwrap();
        let keys: Vec<String> = docs.iter().map(|d| d.key.to_string()).collect();

        assert_eq!(keys, ["backend/api.md", "global/naming.md", "testing/unit-testing.md"]);
        assert!(docs.iter().all(|d| d.profile == "default"));
        assert_eq!(docs[1].content, "naming");
    }

    #[test]
    fn test_list_documents_skips_non_standards() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("default");
        write(&root, "standards/README.md", b"top level");
        write(&root, "standards/global/notes.txt", b"not markdown");
        write(&root, "standards/global/deep/nested.md", b"too deep");
        write(&root, "standards/global/.draft.md", b"hidden");
        write(&root, "standards/.hidden/x.md", b"hidden category");
        write(&root, "standards/global/naming.md", b"kept");

        let docs = store(&temp).list_documents(&root).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].key, StandardKey::new("global", "naming.md"));
    }

    #[test]
    fn test_list_documents_without_standards_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("empty");
        fs::create_dir_all(&root).unwrap();

        assert!(store(&temp).list_documents(&root).unwrap().is_empty());
    }

    #[test]
    fn test_list_documents_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = store(&temp).list_documents(&temp.path().join("missing"));
        assert!(matches!(result, Err(ResolveError::NotFound(_))));
    }

    #[test]
    fn test_list_documents_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("default");
        write(&root, "standards/global/binary.md", &[0xff, 0xfe, 0x00]);

        let err = store(&temp).list_documents(&root).unwrap_err();
        match err {
            ResolveError::Read { path, source } => {
                assert!(path.ends_with("global/binary.md"));
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_documents_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("default");
        let category = root.join("standards/global");
        fs::create_dir_all(&category).unwrap();
        fs::write(category.join(OsStr::from_bytes(b"a\xff.md")), "one").unwrap();
        fs::write(category.join(OsStr::from_bytes(b"a\xfe.md")), "two").unwrap();

        match store(&temp).list_documents(&root) {
            Err(ResolveError::Read { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_layout() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("default");
        write(&root, "rules/global/naming.markdown", b"kept");
        write(&root, "rules/global/other.md", b"skipped");

        let mut settings = ResolverSettings::new(temp.path());
        settings.standards_dir = "rules".to_string();
        settings.document_extension = "markdown".to_string();

        let docs = DocumentStore::new(settings).unwrap().list_documents(&root).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename(), "naming.markdown");
    }

    #[test]
    fn test_load_profile_reads_config() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("android");
        write(
            &root,
            "profile-config.yml",
            b"parent: default\nexcluded_standards:\n  - standards/testing/ui-testing.md\n",
        );
        write(&root, "standards/frontend/compose.md", b"compose");

        let profile = store(&temp).load_profile("android").unwrap();

        assert_eq!(profile.name, "android");
        assert_eq!(profile.parent(), Some("default"));
        assert_eq!(profile.exclusions.len(), 1);
        assert!(profile.config_digest.is_some());
        assert_eq!(profile.documents.len(), 1);
    }

    #[test]
    fn test_load_profile_without_config() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("default"), "standards/global/naming.md", b"x");

        let profile = store(&temp).load_profile("default").unwrap();

        assert!(profile.parent().is_none());
        assert!(profile.exclusions.is_empty());
        assert!(profile.config_digest.is_none());
    }

    #[test]
    fn test_load_profile_errors() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        assert!(matches!(
            store.load_profile("missing"),
            Err(ResolveError::ProfileNotFound { .. })
        ));
        assert!(matches!(
            store.load_profile("../etc"),
            Err(ResolveError::InvalidProfileName(_))
        ));

        write(&temp.path().join("broken"), "profile-config.yml", b"parent: [unclosed\n");
        assert!(matches!(
            store.load_profile("broken"),
            Err(ResolveError::Config { .. })
        ));

        write(
            &temp.path().join("bad-exclusion"),
            "profile-config.yml",
            b"excluded_standards:\n  - testing\n",
        );
        match store.load_profile("bad-exclusion") {
            Err(ResolveError::Config { profile, source }) => {
                assert_eq!(profile, "bad-exclusion");
                assert!(matches!(source, ConfigError::InvalidExclusion { .. }));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_list_profiles() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("default")).unwrap();
        fs::create_dir_all(temp.path().join("android")).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("README.md"), "x").unwrap();

        let names = store(&temp).list_profiles().unwrap();
        assert_eq!(names, ["android", "default"]);
    }

    #[test]
    fn test_list_profiles_missing_root() {
        let store = DocumentStore::new(ResolverSettings::new("/nonexistent/profiles")).unwrap();
        assert!(matches!(store.list_profiles(), Err(ResolveError::NotFound(_))));
    }
}
