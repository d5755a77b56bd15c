//! Built-in resolver defaults

/// Default profile configuration file name
pub const CONFIG_FILE: &str = profile_config::CONFIG_FILE_NAME;

/// Default standards directory inside a profile
pub const STANDARDS_DIR: &str = profile_config::STANDARDS_DIR;

/// Default extension of standards documents (without the dot)
pub const DOCUMENT_EXTENSION: &str = "md";

/// Default limit on profiles in one inheritance chain
pub const MAX_INHERITANCE_DEPTH: usize = 32;

/// Hard ceiling accepted for `max_inheritance_depth`
pub const MAX_INHERITANCE_DEPTH_CEILING: usize = 256;

pub(super) fn config_file() -> String {
    CONFIG_FILE.to_string()
}

pub(super) fn standards_dir() -> String {
    STANDARDS_DIR.to_string()
}

pub(super) fn document_extension() -> String {
    DOCUMENT_EXTENSION.to_string()
}

pub(super) fn max_inheritance_depth() -> usize {
    MAX_INHERITANCE_DEPTH
}
