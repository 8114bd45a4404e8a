use super::{apply_env_settings, apply_file_settings, Settings};

#[test]
fn defaults_match_frontend_proxy_target() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
    assert_eq!(settings.max_body_bytes, 16 * 1024);
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        "bind_addr = \"0.0.0.0:9000\"\nmax_body_bytes = 2048\n",
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.max_body_bytes, 2048);
}

#[test]
fn unparseable_file_is_ignored() {
    let mut settings = Settings::default();
    apply_file_settings(&mut settings, "bind_addr = [");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env_settings(&mut settings, |name| match name {
        "SERVER_BIND" => Some("127.0.0.1:1".to_string()),
        "APP__BIND_ADDR" => Some("127.0.0.1:2".to_string()),
        "APP__MAX_BODY_BYTES" => Some("not-a-number".to_string()),
        _ => None,
    });
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}
