// ABOUTME: Test support utilities.
// ABOUTME: Provides platform fakes, a scripted HTTP server, and environment helpers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Once;

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_platform;
#[allow(dead_code)]
pub mod http_server;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("gcf_deploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A complete, valid environment pointing at `source_dir`.
#[allow(dead_code)]
pub fn full_env(source_dir: &Path) -> HashMap<String, String> {
    HashMap::from([
        ("gcp_project".to_string(), "test-project".to_string()),
        ("gcp_region".to_string(), "us-central1".to_string()),
        ("cloud_function_name".to_string(), "test-function".to_string()),
        (
            "cloud_function_directory".to_string(),
            source_dir.display().to_string(),
        ),
        ("credentials".to_string(), r#"{"secret": "value"}"#.to_string()),
    ])
}

/// Lookup closure over a map, as the commands expect.
#[allow(dead_code)]
pub fn lookup(env: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
    move |key| env.get(key).cloned()
}

/// Write a small function source tree and return its directory.
#[allow(dead_code)]
pub fn source_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("lib")).unwrap();
    std::fs::write(
        dir.path().join("main.py"),
        "def handler(request):\n    return 'ok'\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("requirements.txt"), "requests==2.32.0\n").unwrap();
    std::fs::write(dir.path().join("lib/util.py"), "VALUE = 42\n").unwrap();
    dir
}
