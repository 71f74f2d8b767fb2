//! Workspace watcher configuration, fully enumerated with defaults.

use std::time::Duration;

use bridge_core::constants::WATCH_DEBOUNCE_MS;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
  /// Quiet period per `(path, changeType)` key before an event propagates.
  pub debounce_time: Duration,
  /// Directory basenames never traversed.
  pub excluded_dirs: Vec<String>,
  /// Extensions never opened.
  pub excluded_file_extensions: Vec<String>,
  /// Media/archive extensions never opened.
  pub large_binary_extensions: Vec<String>,
  /// Files larger than this are skipped.
  pub max_file_size: u64,
}

impl Default for WatcherConfig {
  fn default() -> Self {
    Self {
      debounce_time: Duration::from_millis(WATCH_DEBOUNCE_MS),
      excluded_dirs: [
        "node_modules",
        ".git",
        "dist",
        "build",
        "out",
        "target",
        ".idea",
        ".vscode",
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        "vendor",
      ]
      .iter()
      .map(|s| s.to_string())
      .collect(),
      excluded_file_extensions: ["pyc", "pyo", "class", "o", "obj", "exe", "dll", "so", "dylib"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      large_binary_extensions: [
        "zip", "tar", "gz", "7z", "rar", "png", "jpg", "jpeg", "gif", "bmp", "ico", "mp3", "mp4",
        "mov", "avi", "mkv", "pdf", "woff", "woff2", "ttf", "otf",
      ]
      .iter()
      .map(|s| s.to_string())
      .collect(),
      max_file_size: 10 * 1024 * 1024,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_documented_values() {
    let config = WatcherConfig::default();
    assert_eq!(config.debounce_time, Duration::from_millis(100));
    assert!(config.excluded_dirs.contains(&"node_modules".to_string()));
    assert!(config.excluded_file_extensions.contains(&"pyc".to_string()));
    assert_eq!(config.max_file_size, 10 * 1024 * 1024);
  }
}
