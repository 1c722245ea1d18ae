use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `first-filings.toml` inside a fresh temp dir.
/// Keep the returned dir alive for as long as the file is needed.
pub fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("first-filings.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

/// Minimal config pointing the BSE client at `base_url` with zero-delay retries.
pub fn bse_config_toml(base_url: &str) -> String {
    format!(
        r#"
[exchange]
type = "bse"
base_url = "{base_url}"

[exchange.http]
timeout_ms = 2000
use_system_proxy = false

[retry]
max_attempts = 3
min_delay_ms = 0
max_delay_ms = 0
multiplier = 1.0
jitter = false
"#
    )
}
