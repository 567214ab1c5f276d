use super::*;

#[test]
fn default_points_at_local_backend() {
    let config = PortalConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert_eq!(config.token_key, "access_token");
}

#[test]
fn new_strips_trailing_slashes() {
    assert_eq!(PortalConfig::new("https://api.example.com//").api_base_url, "https://api.example.com");
}

#[test]
fn from_values_ignores_blank_values() {
    let config = PortalConfig::from_values(Some("   "), Some(""));
    assert_eq!(config, PortalConfig::default());
}

#[test]
fn from_values_applies_overrides() {
    let config = PortalConfig::from_values(Some("http://10.0.0.5:9000/"), Some("jwt"));
    assert_eq!(config.api_base_url, "http://10.0.0.5:9000");
    assert_eq!(config.token_key, "jwt");
}

#[test]
fn from_env_reads_base_url_and_token_key() {
    // SAFETY: no other test in this crate reads or writes these variables.
    unsafe {
        std::env::set_var("CUSTOMER_API_BASE_URL", "http://env.test/");
        std::env::set_var("CUSTOMER_TOKEN_KEY", "env_token");
    }
    let config = PortalConfig::from_env();
    unsafe {
        std::env::remove_var("CUSTOMER_API_BASE_URL");
        std::env::remove_var("CUSTOMER_TOKEN_KEY");
    }

    assert_eq!(config.api_base_url, "http://env.test");
    assert_eq!(config.token_key, "env_token");
}
