// SPDX-FileCopyrightText: 2026 Baton Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./baton.toml` > `~/.config/baton/baton.toml` > `/etc/baton/baton.toml`
//! with environment variable overrides via `BATON_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BatonConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/baton/baton.toml";

/// Configuration file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "baton.toml";

/// Returns `~/.config/baton/baton.toml`, when a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("baton/baton.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/baton/baton.toml` (system-wide)
/// 3. `~/.config/baton/baton.toml` (user XDG config)
/// 4. `./baton.toml` (local directory)
/// 5. `BATON_*` environment variables
pub fn load_config() -> Result<BatonConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BatonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BatonConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration with an explicit file layered above the standard
/// locations and below `BATON_*` environment variables.
pub fn load_config_from_path(path: &Path) -> Result<BatonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BatonConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BatonConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `BATON_GOOGLE_PROCESSED_FOLDER_ID`
/// must map to `google.processed_folder_id`, not `google.processed.folder.id`.
fn env_provider() -> Env {
    Env::prefixed("BATON_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to its dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 7] = [
        "run",
        "surveymonkey",
        "google",
        "templates",
        "messages",
        "schedule",
        "roster",
    ];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(
            map_env_key("google_processed_folder_id"),
            "google.processed_folder_id"
        );
        assert_eq!(
            map_env_key("surveymonkey_access_token"),
            "surveymonkey.access_token"
        );
        assert_eq!(map_env_key("run_log_level"), "run.log_level");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }
}
