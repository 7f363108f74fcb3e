use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mergeup::response::LogOutput;
use mergeup::selection::{FileSelection, SelectedFile};
use mergeup::uploader::{merge_endpoint, Uploader, UploaderBuilder};
use mergeup::view::MergeView;
use tempfile::TempDir;
use wiremock::MockServer;

// Common test constants
pub const MERGE_PATH: &str = "/merge/from-upload";
pub const TEST_HIDE_DELAY: Duration = Duration::from_millis(10);
/// Comfortably longer than `TEST_HIDE_DELAY`.
pub const SETTLE: Duration = Duration::from_millis(150);

/// Everything a [`RecordingView`] has been told.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub alerts: Vec<String>,
    pub selection: Option<String>,
    pub trigger_enabled: bool,
    pub trigger_history: Vec<bool>,
    pub batch_label: String,
    pub keys: Vec<String>,
    pub log: Option<LogOutput>,
    pub progress: Vec<u8>,
    pub progress_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            alerts: Vec::new(),
            selection: None,
            trigger_enabled: true,
            trigger_history: Vec::new(),
            batch_label: String::new(),
            keys: Vec::new(),
            log: None,
            progress: Vec::new(),
            progress_visible: false,
        }
    }
}

/// A [`MergeView`] that records every call for later assertions.
#[derive(Debug, Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> ViewState {
        self.state.lock().unwrap().clone()
    }

    pub fn log_text(&self) -> Option<String> {
        self.state().log.map(|l| l.to_text())
    }
}

impl MergeView for RecordingView {
    fn alert(&self, message: &str) {
        self.state.lock().unwrap().alerts.push(message.to_string());
    }

    fn show_selection(&self, listing: Option<&str>) {
        self.state.lock().unwrap().selection = listing.map(String::from);
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        let mut state = self.state.lock().unwrap();
        state.trigger_enabled = enabled;
        state.trigger_history.push(enabled);
    }

    fn set_batch_label(&self, label: &str) {
        self.state.lock().unwrap().batch_label = label.to_string();
    }

    fn set_keys(&self, keys: &[String]) {
        self.state.lock().unwrap().keys = keys.to_vec();
    }

    fn show_log(&self, log: Option<&LogOutput>) {
        self.state.lock().unwrap().log = log.cloned();
    }

    fn set_progress(&self, percent: u8) {
        self.state.lock().unwrap().progress.push(percent);
    }

    fn set_progress_visible(&self, visible: bool) {
        self.state.lock().unwrap().progress_visible = visible;
    }
}

// === Selection Helpers ===

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Creates an in-memory selection of `(name, size)` files
pub fn create_test_selection(files: &[(&str, usize)]) -> FileSelection {
    files
        .iter()
        .map(|(name, size)| SelectedFile::from_bytes(name, create_test_content(*size)))
        .collect()
}

// === Uploader Helpers ===

/// Creates a builder pointing at the mock server's merge endpoint
pub fn create_test_uploader_builder(server: &MockServer) -> UploaderBuilder {
    UploaderBuilder::new()
        .endpoint(merge_endpoint(&server.uri()).expect("Invalid mock server uri"))
        .hide_delay(TEST_HIDE_DELAY)
}

/// Creates an uploader driving `view` with `selection` already selected
pub fn create_test_uploader(
    builder: UploaderBuilder,
    view: &Arc<RecordingView>,
    selection: FileSelection,
) -> Uploader {
    let mut uploader = builder.build(view.clone()).expect("Failed to build uploader");
    uploader.select(selection);
    uploader
}

/// Returns the URL of a local port nothing listens on
pub fn create_unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

// === Assertion Helpers ===

/// Asserts the UI went back to idle once the hide delay elapsed
pub async fn assert_idle_after_delay(view: &RecordingView) {
    tokio::time::sleep(SETTLE).await;
    let state = view.state();
    assert!(state.trigger_enabled, "Trigger should be enabled again");
    assert!(!state.progress_visible, "Progress should be hidden");
}

/// Asserts a sequence strictly increases
pub fn assert_monotonic(values: &[u64]) {
    assert!(
        values.windows(2).all(|w| w[0] < w[1]),
        "Values should strictly increase: {:?}",
        values
    );
}
