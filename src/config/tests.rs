use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_palate_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("PALATE_PORT");
        env::remove_var("PALATE_BIND_ADDR");
        env::remove_var("PALATE_DATABASE_URL");
        env::remove_var("PALATE_REDIS_URL");
        env::remove_var("PALATE_DB_POOL_SIZE");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
    );
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.redis_url, DEFAULT_REDIS_URL);
    assert_eq!(config.db_pool_size, 10);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "0.0.0.0:8000");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        ..Config::default()
    };
    assert_eq!(config.socket_addr(), "127.0.0.1:3000");
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_palate_env();
    let config = Config::from_env().expect("defaults should load");

    assert_eq!(config.port, 8000);
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_palate_env();
    let config = with_env_vars(
        &[
            ("PALATE_PORT", "9000"),
            ("PALATE_BIND_ADDR", "127.0.0.1"),
            ("PALATE_DATABASE_URL", "postgres://app:secret@db:5432/orders"),
            ("PALATE_REDIS_URL", "redis://cache:6379"),
            ("PALATE_DB_POOL_SIZE", "4"),
        ],
        || Config::from_env().expect("overrides should load"),
    );

    assert_eq!(config.port, 9000);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.database_url, "postgres://app:secret@db:5432/orders");
    assert_eq!(config.redis_url, "redis://cache:6379");
    assert_eq!(config.db_pool_size, 4);
}

#[test]
#[serial]
fn test_invalid_port_rejected() {
    clear_palate_env();
    let result = with_env_vars(&[("PALATE_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));

    let result = with_env_vars(&[("PALATE_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));
}

#[test]
#[serial]
fn test_invalid_bind_addr_rejected() {
    clear_palate_env();
    let result = with_env_vars(&[("PALATE_BIND_ADDR", "not-an-ip")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}

#[test]
#[serial]
fn test_invalid_pool_size_rejected() {
    clear_palate_env();
    let result = with_env_vars(&[("PALATE_DB_POOL_SIZE", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPoolSize { .. })));
}

#[test]
fn test_validate_rejects_bad_urls() {
    let config = Config {
        database_url: "mysql://nope".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl { name, .. }) if name == "PALATE_DATABASE_URL"
    ));

    let config = Config {
        redis_url: "memcached://nope".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidUrl { name, .. }) if name == "PALATE_REDIS_URL"
    ));
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}
