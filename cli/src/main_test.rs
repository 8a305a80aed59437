use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const STORE_VARS: [&str; 5] = [
    "POCKETBOOK_STORE_URL",
    "POCKETBOOK_ANON_KEY",
    "POCKETBOOK_ACCESS_TOKEN",
    "POCKETBOOK_REQUEST_TIMEOUT_SECS",
    "POCKETBOOK_CONNECT_TIMEOUT_SECS",
];

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Parse `args` with exactly `vars` set among the store variables.
fn parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> Cli {
    let _guard = env_lock();
    // SAFETY: the lock keeps other tests in this binary off the environment.
    unsafe {
        for var in STORE_VARS {
            std::env::remove_var(var);
        }
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
    }
    let cli = Cli::try_parse_from(args).unwrap();
    unsafe {
        for var in STORE_VARS {
            std::env::remove_var(var);
        }
    }
    cli
}

#[test]
fn anon_key_flag_keeps_url_and_token_from_env() {
    let cli = parse_with_env(
        &[("POCKETBOOK_ACCESS_TOKEN", "user-token"), ("POCKETBOOK_STORE_URL", "https://proj.example.test")],
        &["pocketbook-cli", "--anon-key", "flag-anon", "balances"],
    );

    let config = store_config(&cli).unwrap();
    assert_eq!(config.store_url, "https://proj.example.test");
    assert_eq!(config.anon_key, "flag-anon");
    assert_eq!(config.access_token.as_deref(), Some("user-token"));
}

#[test]
fn flags_override_env() {
    let cli = parse_with_env(
        &[("POCKETBOOK_ANON_KEY", "env-anon"), ("POCKETBOOK_ACCESS_TOKEN", "env-token")],
        &["pocketbook-cli", "--anon-key", "flag-anon", "--access-token", "flag-token", "items"],
    );

    let config = store_config(&cli).unwrap();
    assert_eq!(config.anon_key, "flag-anon");
    assert_eq!(config.access_token.as_deref(), Some("flag-token"));
}

#[test]
fn env_alone_configures_store_and_timeouts() {
    let cli = parse_with_env(
        &[
            ("POCKETBOOK_ANON_KEY", "env-anon"),
            ("POCKETBOOK_REQUEST_TIMEOUT_SECS", "45"),
            ("POCKETBOOK_CONNECT_TIMEOUT_SECS", "3"),
        ],
        &["pocketbook-cli", "balances"],
    );

    let config = store_config(&cli).unwrap();
    assert_eq!(config.store_url, DEFAULT_STORE_URL);
    assert!(config.access_token.is_none());
    assert_eq!(config.timeouts, StoreTimeouts { request_secs: 45, connect_secs: 3 });
}

#[test]
fn missing_anon_key_is_a_config_error() {
    let cli = parse_with_env(&[], &["pocketbook-cli", "balances"]);
    let err = store_config(&cli).unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Missing { .. })));
}

#[test]
fn zero_timeout_flag_is_rejected() {
    let cli = parse_with_env(&[], &["pocketbook-cli", "--anon-key", "a", "--request-timeout-secs", "0", "items"]);
    let err = store_config(&cli).unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Invalid { .. })));
}

#[test]
fn demo_needs_no_store_settings() {
    let cli = parse_with_env(&[], &["pocketbook-cli", "--demo", "items"]);
    assert!(build_store(&cli).is_ok());
}
