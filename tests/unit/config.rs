use super::*;

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert_eq!(s.bind, DEFAULT_BIND);
    assert_eq!(s.directory, None);
    assert_eq!(s.jpeg_quality, DEFAULT_JPEG_QUALITY);
    s.validate().unwrap();
}

#[test]
fn json_keeps_defaults_for_missing_keys() {
    let s = Settings::from_json_str(r#"{ "directory": "/srv/bears" }"#).unwrap();
    assert_eq!(s.directory, Some(PathBuf::from("/srv/bears")));
    assert_eq!(s.bind, DEFAULT_BIND);
    assert_eq!(s.log, "info");
}

#[test]
fn json_rejects_unknown_keys() {
    let err = Settings::from_json_str(r#"{ "dirctory": "x" }"#).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn overrides_win_over_file_values() {
    let mut s = Settings::from_json_str(r#"{ "jpeg_quality": 50, "log": "warn" }"#).unwrap();
    s.apply(SettingsOverrides {
        jpeg_quality: Some(80),
        directory: Some(PathBuf::from("assets")),
        ..SettingsOverrides::default()
    });
    assert_eq!(s.jpeg_quality, 80);
    assert_eq!(s.log, "warn");
    assert_eq!(s.directory, Some(PathBuf::from("assets")));
}

#[test]
fn load_validates_quality() {
    let err = Settings::load(
        None,
        SettingsOverrides {
            jpeg_quality: Some(0),
            ..SettingsOverrides::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("jpeg_quality"));
}

#[test]
fn load_reports_missing_file() {
    let err = Settings::load(
        Some(Path::new("/nonexistent/bearsmith.json")),
        SettingsOverrides::default(),
    )
    .unwrap_err();
    assert!(matches!(err, BearError::Other(_)));
}

#[test]
fn base_dir_defaults_to_working_dir() {
    let work = Path::new("/work");
    let mut s = Settings::default();
    assert_eq!(s.base_dir(work), PathBuf::from("/work"));

    s.directory = Some(PathBuf::new());
    assert_eq!(s.base_dir(work), PathBuf::from("/work"));

    s.directory = Some(PathBuf::from("members"));
    assert_eq!(s.base_dir(work), PathBuf::from("/work/members"));

    s.directory = Some(PathBuf::from("/srv/bears"));
    assert_eq!(s.base_dir(work), PathBuf::from("/srv/bears"));
}
