//! Configuration resolution tests
//!
//! Absent configuration is a supported deployment mode: resolution returns
//! `None` and the caller runs fallback-only. Uses `serial_test` because the
//! environment variables are process-global.

use camerata_common::config::{
    resolve_admin_credentials, resolve_backend_config, TomlConfig, ENV_ADMIN_EMAIL,
    ENV_ADMIN_PASSWORD, ENV_BACKEND_ANON_KEY, ENV_BACKEND_URL,
};
use serial_test::serial;
use std::env;

fn clear_backend_env() {
    env::remove_var(ENV_BACKEND_URL);
    env::remove_var(ENV_BACKEND_ANON_KEY);
    env::remove_var(ENV_ADMIN_EMAIL);
    env::remove_var(ENV_ADMIN_PASSWORD);
}

#[test]
#[serial]
fn no_env_and_no_file_means_unconfigured() {
    clear_backend_env();
    assert!(resolve_backend_config(&TomlConfig::default()).is_none());
}

#[test]
#[serial]
fn env_variables_take_priority() {
    clear_backend_env();
    env::set_var(ENV_BACKEND_URL, "https://env.example.co");
    env::set_var(ENV_BACKEND_ANON_KEY, "env-key");

    let toml = TomlConfig::from_str(
        r#"
        backend_url = "https://file.example.co"
        backend_anon_key = "file-key"
        "#,
    )
    .unwrap();

    let config = resolve_backend_config(&toml).unwrap();
    assert_eq!(config.base_url, "https://env.example.co");
    assert_eq!(config.anon_key, "env-key");

    clear_backend_env();
}

#[test]
#[serial]
fn toml_file_fills_in_when_env_absent() {
    clear_backend_env();
    let toml = TomlConfig::from_str(
        r#"
        backend_url = "https://file.example.co"
        backend_anon_key = "file-key"
        "#,
    )
    .unwrap();

    let config = resolve_backend_config(&toml).unwrap();
    assert_eq!(config.base_url, "https://file.example.co");
    assert_eq!(config.anon_key, "file-key");
}

#[test]
#[serial]
fn partial_configuration_counts_as_unconfigured() {
    clear_backend_env();
    env::set_var(ENV_BACKEND_URL, "https://env.example.co");
    // Key missing entirely.
    assert!(resolve_backend_config(&TomlConfig::default()).is_none());

    // Empty values do not count either.
    env::set_var(ENV_BACKEND_ANON_KEY, "");
    assert!(resolve_backend_config(&TomlConfig::default()).is_none());

    clear_backend_env();
}

#[test]
#[serial]
fn admin_credentials_resolve_env_then_file() {
    clear_backend_env();
    let toml = TomlConfig::from_str(
        r#"
        admin_email = "file@example.com"
        admin_password = "file-secret"
        "#,
    )
    .unwrap();

    let from_file = resolve_admin_credentials(&toml).unwrap();
    assert_eq!(from_file.email, "file@example.com");

    env::set_var(ENV_ADMIN_EMAIL, "env@example.com");
    env::set_var(ENV_ADMIN_PASSWORD, "env-secret");
    let from_env = resolve_admin_credentials(&toml).unwrap();
    assert_eq!(from_env.email, "env@example.com");
    assert_eq!(from_env.password, "env-secret");

    clear_backend_env();
    assert!(resolve_admin_credentials(&TomlConfig::default()).is_none());
}
