//! Test fixtures for profile resolution
//!
//! Provides:
//! - The checked-in profile corpus (`default`, `android`, `android-lean`)
//! - `ProfileTree`, a builder for throwaway profile trees in a temp dir

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use standards_profiles::{ProfileResolver, ResolverSettings};
use tempfile::TempDir;

/// Path to the checked-in profiles corpus
pub fn profiles_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/profiles")
}

/// Resolver over the checked-in corpus
pub fn corpus_resolver() -> ProfileResolver {
    ProfileResolver::new(ResolverSettings::new(profiles_path()))
        .expect("corpus settings are valid")
}

/// Profile tree rooted in a temp dir, removed on drop
pub struct ProfileTree {
    temp: TempDir,
}

impl ProfileTree {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Create an empty profile directory
    pub fn profile(&self, name: &str) -> &Self {
        fs::create_dir_all(self.root().join(name)).expect("Failed to create profile dir");
        self
    }

    /// Write a profile's `profile-config.yml`
    pub fn config(&self, name: &str, yaml: &str) -> &Self {
        self.profile(name);
        fs::write(self.root().join(name).join("profile-config.yml"), yaml)
            .expect("Failed to write config");
        self
    }

    /// Write `standards/<key>` for a profile, `key` being `category/filename`
    pub fn standard(&self, name: &str, key: &str, content: &str) -> &Self {
        let path = self.root().join(name).join("standards").join(key);
        fs::create_dir_all(path.parent().expect("standard has a parent"))
            .expect("Failed to create category dir");
        fs::write(path, content).expect("Failed to write standard");
        self
    }

    pub fn settings(&self) -> ResolverSettings {
        ResolverSettings::new(self.root())
    }

    pub fn resolver(&self) -> ProfileResolver {
        ProfileResolver::new(self.settings()).expect("default settings are valid")
    }
}
