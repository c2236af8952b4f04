//! CLI configuration: thin wrapper around `stockly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --timeout, etc.).

use std::time::Duration;

use stockly_core::InventoryConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use stockly_config::{
    Config, Profile, config_path, load_config, load_config_or_default, parse_api_url,
    profile_to_inventory_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build an `InventoryConfig` from the config file, the active profile,
/// and CLI overrides. Flags take priority over profile values.
pub fn resolve_inventory_config(global: &GlobalOpts) -> Result<InventoryConfig, CliError> {
    let cfg = load_config()?;
    let name = active_profile_name(global, &cfg);
    let profile = cfg.profile(Some(&name)).map_err(|_| CliError::ProfileNotFound {
        name: name.clone(),
        available: available_profiles(&cfg),
    })?;
    apply_overrides(&profile, &cfg, global)
}

fn apply_overrides(
    profile: &Profile,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<InventoryConfig, CliError> {
    let mut config = profile_to_inventory_config(profile, &cfg.defaults)?;

    if let Some(ref raw) = global.api_url {
        config.api_url = parse_api_url(raw)?;
    }
    if let Some(secs) = global.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    if global.insecure {
        config.accept_invalid_certs = true;
    }
    Ok(config)
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["stockly"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["dashboard"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile_values() {
        let cfg = Config::default();
        let opts = global(&["--api-url", "https://inv.example.com/api", "--timeout", "5", "-k"]);
        let config = apply_overrides(&Profile::default(), &cfg, &opts).unwrap();
        assert_eq!(config.api_url.as_str(), "https://inv.example.com/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn profile_values_survive_without_flags() {
        let cfg = Config::default();
        let profile = Profile {
            api_url: "http://warehouse.local/api/v1/".into(),
            timeout: Some(12),
            ..Profile::default()
        };
        let config = apply_overrides(&profile, &cfg, &global(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://warehouse.local/api/v1/");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn bad_url_flag_is_a_validation_error() {
        let opts = global(&["--api-url", "ftp://nope"]);
        let err = apply_overrides(&Profile::default(), &Config::default(), &opts).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
