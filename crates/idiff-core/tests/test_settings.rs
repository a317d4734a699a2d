use idiff_core::settings::{MergedBackend, Settings, CONFIG_ENV};
use idiff_core::IdiffError;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert!(settings.interface.wheel_zoom);
    assert_eq!(settings.merged.backend, MergedBackend::Native);
    assert_eq!(settings.merged.command, "compare");
    assert_eq!(settings.merged.highlight_color, "blue");
    assert_eq!(settings.merged.fuzz, "2%");
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        [interface]
        wheel_zoom = false

        [merged]
        backend = "external"
        fuzz = "5%"
        "#,
    )
    .unwrap();
    assert!(!settings.interface.wheel_zoom);
    assert_eq!(settings.merged.backend, MergedBackend::External);
    assert_eq!(settings.merged.fuzz, "5%");
    assert_eq!(settings.merged.command, "compare");
}

#[test]
fn test_empty_file_is_default() {
    assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
}

#[test]
fn test_invalid_value_is_an_error() {
    let result = Settings::from_toml_str("[interface]\nwheel_zoom = \"sometimes\"\n");
    assert!(matches!(result, Err(IdiffError::Settings(_))));
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Settings::default();
    settings.interface.wheel_zoom = false;
    settings.merged.highlight_color = "red".to_string();
    settings.save(&path).unwrap();

    assert_eq!(Settings::load(&path).unwrap(), settings);
}

#[test]
fn test_load_or_default_tolerates_missing_and_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert_eq!(Settings::load_or_default(&missing), Settings::default());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[interface\nwheel_zoom = ").unwrap();
    assert_eq!(Settings::load_or_default(&broken), Settings::default());
}

#[test]
fn test_env_var_overrides_default_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::env::set_var(CONFIG_ENV, &path);
    let resolved = Settings::default_path();
    std::env::remove_var(CONFIG_ENV);
    assert_eq!(resolved, Some(path));
}
