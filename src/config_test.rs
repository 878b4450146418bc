use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = PortalConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
    assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn overrides_are_parsed_and_trimmed() {
    let cfg = PortalConfig::from_lookup(lookup(&[
        ("PORT", " 8080 "),
        ("PORTAL_BACKEND_URL", "https://api.example.co.ke/api/"),
        ("PORTAL_PROXY_TIMEOUT_SECS", "5"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://api.example.co.ke/api");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(5));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = PortalConfig::from_lookup(lookup(&[("PORT", "  "), ("PORTAL_BACKEND_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
}

#[test]
fn invalid_port_errors() {
    let err = PortalConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    assert!(err.to_string().contains("invalid PORT"));
}

#[test]
fn non_http_backend_errors() {
    let err = PortalConfig::from_lookup(lookup(&[("PORTAL_BACKEND_URL", "localhost:5000")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORTAL_BACKEND_URL", .. }));
}

#[test]
fn zero_timeout_errors() {
    let err = PortalConfig::from_lookup(lookup(&[("PORTAL_PROXY_TIMEOUT_SECS", "0")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PORTAL_PROXY_TIMEOUT_SECS", .. }));
}

#[test]
fn from_env_reads_process_environment() {
    unsafe {
        std::env::set_var("PORT", "4100");
        std::env::set_var("PORTAL_BACKEND_URL", "http://backend:5000/api");
        std::env::remove_var("PORTAL_PROXY_TIMEOUT_SECS");
    }

    let cfg = PortalConfig::from_env().unwrap();
    assert_eq!(cfg.port, 4100);
    assert_eq!(cfg.backend_url, "http://backend:5000/api");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));

    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("PORTAL_BACKEND_URL");
    }
}
