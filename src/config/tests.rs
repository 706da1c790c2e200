use super::*;

fn raw_with_site(site: &str) -> RawSettings {
    let mut raw = RawSettings::default();
    raw.api.site = Some(site.to_string());
    raw
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_with_site("https://file.example.com");
    raw.logging.level = Some("info".to_string());

    let overrides = CliOverrides {
        site: Some("https://cli.example.com".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.site.as_str(), "https://cli.example.com/");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn missing_site_is_rejected() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("missing site");
    assert!(matches!(err, SettingsError::MissingSite));
}

#[test]
fn invalid_site_is_rejected() {
    let err = Settings::from_raw(raw_with_site("not a url")).expect_err("invalid site");
    assert!(matches!(err, SettingsError::InvalidSite(_)));
}

#[test]
fn timeout_defaults_to_30_seconds() {
    let settings = Settings::from_raw(raw_with_site("https://example.com")).expect("settings");
    assert_eq!(settings.http_timeout, Duration::from_secs(30));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = raw_with_site("https://example.com");
    raw.logging.level = Some("chatty".to_string());
    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, SettingsError::InvalidLogLevel(level) if level == "chatty"));
}

#[test]
fn json_flag_selects_json_format() {
    let mut raw = raw_with_site("https://example.com");
    raw.logging.json = Some(true);
    let settings = Settings::from_raw(raw).expect("settings");
    assert_eq!(settings.logging.format, LogFormat::Json);
}

#[test]
fn site_is_normalized_to_the_origin_root() {
    let settings =
        Settings::from_raw(raw_with_site("https://example.com/some/page")).expect("settings");
    assert_eq!(settings.site.path(), "/");
}
