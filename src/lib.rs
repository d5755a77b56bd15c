//! Standards Profiles - inheritable coding standards for agents
//!
//! This crate loads named profiles of markdown standards from disk, resolves
//! single-parent inheritance between them (with per-document exclusion and
//! child-wins override) and exposes the effective standards grouped by
//! category.
//!
//! Pipeline: [`DocumentStore`] → [`ProfileResolver`] → [`CategoryIndex`].

pub mod cache;
pub mod error;
pub mod index;
pub mod resolve;
pub mod settings;
pub mod store;

pub use cache::ProfileCache;
pub use error::ResolveError;
pub use index::{by_category, CategoryIndex};
pub use profile_config::{ConfigError, ExclusionList, ProfileConfig, StandardKey};
pub use resolve::{Diagnostic, EffectiveProfile, ProfileResolver, ProfileSource};
pub use settings::{ResolverSettings, SettingsError};
pub use store::{Document, DocumentStore, Profile};
