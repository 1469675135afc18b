//! Tests for the top-level automation facade

use super::support::RecordingBackend;
use crate::{Automation, AutomationConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[test]
fn applications_are_filtered_deduplicated_and_sorted() {
    let backend = Arc::new(RecordingBackend::new());
    for app in [
        "Notes",
        "Mail",
        "WindowServer",
        "Safari Helper",
        "com.apple.daemon",
        "Calendar",
    ] {
        backend.register_app(app);
    }
    // The raw platform list may report one app several times.
    backend.add_raw_app_name("Notes");
    backend.add_raw_app_name("Mail");

    let automation = Automation::with_defaults(backend);
    let apps = automation.applications().unwrap();
    assert_eq!(apps, vec!["Calendar", "Mail", "Notes"]);
}

#[test]
fn repository_uses_the_configured_scripts_dir() {
    let backend = Arc::new(RecordingBackend::new());
    let config = AutomationConfig {
        scripts_dir: PathBuf::from("/tmp/conductor-scripts"),
        ..AutomationConfig::default()
    };
    let automation = Automation::new(backend, config);
    assert_eq!(
        automation.repository().dir(),
        PathBuf::from("/tmp/conductor-scripts").as_path()
    );
}
