//! Config file to running presentation.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use vigil_engine::{Presentation, Settings, SettingsError, VigilConfig};

use crate::common::{mount_status_message, start_status_mock, wait_for_status};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_config_file_points_probe_at_origin() {
    let server = start_status_mock().await;
    mount_status_message(&server, "configured").await;

    let file = write_config(&format!(
        "[status]\norigin = \"{}\"\ninitial_delay_ms = 0\ntimeout_ms = 2000\n",
        server.uri()
    ));
    let config = VigilConfig::load_from(file.path()).unwrap();
    let settings = Settings::resolve_with_origin_override(Some(&config), None);
    assert_eq!(settings.probe_timeout, Duration::from_secs(2));

    let mut presentation = Presentation::from_settings(&settings).unwrap();
    presentation.navigate("/");
    let text = wait_for_status(&presentation, Duration::from_secs(5)).await;
    assert_eq!(text.as_deref(), Some("configured"));
}

#[test]
fn test_missing_case_library_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_config(&format!(
        "[presentation]\ncase_library = \"{}\"\n",
        dir.path().join("cases.json").display()
    ));
    let config = VigilConfig::load_from(file.path()).unwrap();
    let settings = Settings::resolve_with_origin_override(Some(&config), None);

    assert!(matches!(
        Presentation::from_settings(&settings),
        Err(SettingsError::CaseLibraryRead { .. })
    ));
}
