//! The workspace watcher: gitignore-aware exclusion, the recursive
//! filesystem watch, dynamic watcher-pattern registration forwarded from
//! the LSP client, debounced propagation, and the initial workspace walk.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bridge_core::constants::WALK_YIELD_BATCH;
use bridge_core::{Error, Result};
use bridge_lsp::{LspClient, WatcherRegistration};
use dashmap::DashMap;
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use lsp_types::{FileChangeType, WatchKind};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebouncedEvent, Debouncer, RecommendedCache, new_debouncer};
use parking_lot::RwLock;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::WatcherConfig;
use crate::patterns;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
  Created,
  Changed,
  Deleted,
}

impl ChangeKind {
  fn matches_mask(self, mask: Option<WatchKind>) -> bool {
    let mask = mask.unwrap_or(WatchKind::CREATE | WatchKind::CHANGE | WatchKind::DELETE);
    match self {
      ChangeKind::Created => mask.contains(WatchKind::CREATE),
      ChangeKind::Changed => mask.contains(WatchKind::CHANGE),
      ChangeKind::Deleted => mask.contains(WatchKind::DELETE),
    }
  }

  fn to_lsp(self) -> FileChangeType {
    match self {
      ChangeKind::Created => FileChangeType::CREATED,
      ChangeKind::Changed => FileChangeType::CHANGED,
      ChangeKind::Deleted => FileChangeType::DELETED,
    }
  }

  fn tag(self) -> &'static str {
    match self {
      ChangeKind::Created => "create",
      ChangeKind::Changed => "change",
      ChangeKind::Deleted => "delete",
    }
  }
}

struct RegisteredPattern {
  pattern: String,
  kind: Option<WatchKind>,
}

/// Keeps the language server's view of the workspace synchronized with the
/// filesystem: opens files the server registered interest in, propagates
/// external edits via `didChange`/`didChangeWatchedFiles`, and performs the
/// one-time initial walk once the server's first watcher registration
/// arrives.
pub struct WorkspaceWatcher {
  root: PathBuf,
  config: WatcherConfig,
  gitignore: Gitignore,
  registrations: RwLock<Vec<RegisteredPattern>>,
  walked: AtomicBool,
  timers: DashMap<String, JoinHandle<()>>,
  fs_watcher: AsyncMutex<Option<Debouncer<RecommendedWatcher, RecommendedCache>>>,
  event_task: AsyncMutex<Option<JoinHandle<()>>>,
}

impl WorkspaceWatcher {
  pub fn new(root: impl Into<PathBuf>, config: WatcherConfig) -> Self {
    let root = root.into();

    let mut builder = GitignoreBuilder::new(&root);
    let _ = builder.add(root.join(".gitignore"));
    for pat in [".git", "node_modules", ".DS_Store", "*.swp", "*.swo", "*~"] {
      let _ = builder.add_line(None, pat);
    }
    let gitignore = builder.build().unwrap_or_else(|_| Gitignore::empty());

    Self {
      root,
      config,
      gitignore,
      registrations: RwLock::new(Vec::new()),
      walked: AtomicBool::new(false),
      timers: DashMap::new(),
      fs_watcher: AsyncMutex::new(None),
      event_task: AsyncMutex::new(None),
    }
  }

  /// Install the watcher hook on `client`, start the recursive filesystem
  /// watch, and begin consuming events.
  pub async fn start(self: &Arc<Self>, client: Arc<LspClient>) -> Result<()> {
    let hook_watcher = self.clone();
    let hook_client = client.clone();
    client.set_watcher_hook(Arc::new(move |registration: WatcherRegistration| {
      let watcher = hook_watcher.clone();
      let client = hook_client.clone();
      tokio::spawn(async move {
        watcher.handle_registration(registration, client).await;
      });
    }));

    let (tx, mut rx) = mpsc::channel(256);
    let debouncer = new_debouncer(
      self.config.debounce_time,
      None,
      move |result: std::result::Result<Vec<DebouncedEvent>, Vec<notify::Error>>| {
        let Ok(events) = result else {
          return;
        };
        for event in events {
          let kind = match &event.kind {
            notify::EventKind::Create(_) => Some(ChangeKind::Created),
            notify::EventKind::Modify(_) => Some(ChangeKind::Changed),
            notify::EventKind::Remove(_) => Some(ChangeKind::Deleted),
            _ => None,
          };
          let Some(kind) = kind else {
            continue;
          };
          for path in &event.paths {
            let _ = tx.blocking_send((kind, path.clone()));
          }
        }
      },
    )
    .map_err(|e| Error::Internal(format!("failed to create filesystem watcher: {e}")))?;

    {
      let mut guard = self.fs_watcher.lock().await;
      *guard = Some(debouncer);
      guard
        .as_mut()
        .expect("just inserted")
        .watch(&self.root, RecursiveMode::Recursive)
        .map_err(|e| Error::Internal(format!("failed to watch {}: {e}", self.root.display())))?;
    }

    let watcher = self.clone();
    let handle = tokio::spawn(async move {
      while let Some((kind, path)) = rx.recv().await {
        watcher.handle_event(kind, path, &client).await;
      }
    });
    *self.event_task.lock().await = Some(handle);

    Ok(())
  }

  /// Cancel the underlying filesystem watch. Debounce timers already fired
  /// but not yet flushed may still deliver one notification each.
  pub async fn stop(&self) {
    if let Some(handle) = self.event_task.lock().await.take() {
      handle.abort();
    }
    self.fs_watcher.lock().await.take();
  }

  async fn handle_registration(&self, registration: WatcherRegistration, client: Arc<LspClient>) {
    {
      let mut patterns = self.registrations.write();
      for watcher in registration.watchers {
        patterns.push(RegisteredPattern {
          pattern: patterns::pattern_string(&watcher.glob_pattern).to_string(),
          kind: watcher.kind,
        });
      }
    }

    if !self.walked.swap(true, Ordering::SeqCst) {
      if let Err(e) = self.initial_walk(&client).await {
        warn!(error = %e, "initial workspace walk failed");
      }
    }
  }

  /// Open every workspace file that is not excluded and matches at least
  /// one registered pattern, yielding every `WALK_YIELD_BATCH` opens so the
  /// reader loop is never starved.
  async fn initial_walk(&self, client: &Arc<LspClient>) -> Result<()> {
    let mut builder = WalkBuilder::new(&self.root);
    builder
      .hidden(true)
      .git_ignore(true)
      .git_global(true)
      .git_exclude(true);

    let mut opened = 0usize;
    for entry in builder.build() {
      let entry = match entry {
        Ok(e) => e,
        Err(e) => {
          warn!(error = %e, "walk error during initial workspace walk");
          continue;
        },
      };

      let path = entry.path();
      if !path.is_file() || self.is_excluded(path) {
        continue;
      }

      let relative = path.strip_prefix(&self.root).unwrap_or(path).to_string_lossy();
      let has_match = self
        .registrations
        .read()
        .iter()
        .any(|r| patterns::matches(&r.pattern, &relative));
      if !has_match {
        continue;
      }

      if let Err(e) = client.open_file(path).await {
        warn!(error = %e, path = %path.display(), "failed to open file during initial walk");
      }

      opened += 1;
      if opened % WALK_YIELD_BATCH == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
      }
    }

    debug!(opened, "initial workspace walk complete");
    Ok(())
  }

  fn is_excluded(&self, path: &Path) -> bool {
    for component in path.strip_prefix(&self.root).unwrap_or(path).components() {
      let name = component.as_os_str().to_string_lossy();
      if name.starts_with('.') || self.config.excluded_dirs.iter().any(|d| d == name.as_ref()) {
        return true;
      }
    }

    if self.gitignore.matched(path, path.is_dir()).is_ignore() {
      return true;
    }

    let ext = path
      .extension()
      .and_then(|e| e.to_str())
      .unwrap_or_default()
      .to_ascii_lowercase();
    if self.config.excluded_file_extensions.iter().any(|e| e == &ext)
      || self.config.large_binary_extensions.iter().any(|e| e == &ext)
    {
      return true;
    }

    if let Ok(meta) = std::fs::metadata(path) {
      if meta.len() > self.config.max_file_size {
        return true;
      }
    }

    false
  }

  async fn handle_event(&self, kind: ChangeKind, path: PathBuf, client: &Arc<LspClient>) {
    if self.is_excluded(&path) {
      return;
    }

    let relative = path.strip_prefix(&self.root).unwrap_or(&path).to_string_lossy().to_string();
    let (has_match, kind_allowed) = {
      let registrations = self.registrations.read();
      let matching: Vec<_> = registrations
        .iter()
        .filter(|r| patterns::matches(&r.pattern, &relative))
        .collect();
      let allowed = matching.iter().any(|r| kind.matches_mask(r.kind));
      (!matching.is_empty(), allowed)
    };

    if !has_match || !kind_allowed {
      return;
    }

    match kind {
      ChangeKind::Created => {
        if let Err(e) = client.open_file(&path).await {
          warn!(error = %e, path = %path.display(), "failed to open created file");
        }
      },
      ChangeKind::Changed => {
        let is_open = match bridge_lsp::uri::path_to_uri(&path) {
          Ok(uri) => client.is_open(&uri),
          Err(_) => false,
        };
        if is_open {
          self.debounce(format!("change:{}", path.display()), {
            let client = client.clone();
            let path = path.clone();
            async move {
              if let Err(e) = client.notify_change(&path).await {
                warn!(error = %e, path = %path.display(), "failed to propagate change");
              }
            }
          });
        } else {
          self.debounce_watched_change(kind, path, client.clone());
        }
      },
      ChangeKind::Deleted => self.debounce_watched_change(kind, path, client.clone()),
    }
  }

  fn debounce_watched_change(&self, kind: ChangeKind, path: PathBuf, client: Arc<LspClient>) {
    let key = format!("{}:{}", kind.tag(), path.display());
    self.debounce(key, async move {
      let Ok(uri) = bridge_lsp::uri::path_to_uri(&path) else {
        return;
      };
      if let Err(e) = client.notify_watched_file_change(uri, kind.to_lsp()).await {
        warn!(error = %e, "failed to notify watched file change");
      }
    });
  }

  /// Schedule `fut` to run after the configured debounce window, keyed by
  /// `key`. A later call with the same key cancels and replaces the
  /// earlier timer.
  fn debounce<F>(&self, key: String, fut: F)
  where
    F: Future<Output = ()> + Send + 'static,
  {
    if let Some((_, handle)) = self.timers.remove(&key) {
      handle.abort();
    }
    let delay = self.config.debounce_time;
    let timer_key = key.clone();
    let handle = tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      fut.await;
    });
    self.timers.insert(timer_key, handle);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn change_kind_mask_defaults_to_all() {
    assert!(ChangeKind::Created.matches_mask(None));
    assert!(ChangeKind::Changed.matches_mask(None));
    assert!(ChangeKind::Deleted.matches_mask(None));
  }

  #[test]
  fn change_kind_mask_respects_explicit_bits() {
    let create_only = WatchKind::CREATE;
    assert!(ChangeKind::Created.matches_mask(Some(create_only)));
    assert!(!ChangeKind::Changed.matches_mask(Some(create_only)));
    assert!(!ChangeKind::Deleted.matches_mask(Some(create_only)));
  }

  #[tokio::test]
  async fn is_excluded_skips_dotfiles_and_excluded_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let watcher = WorkspaceWatcher::new(tmp.path(), WatcherConfig::default());

    std::fs::create_dir_all(tmp.path().join("node_modules")).unwrap();
    let buried = tmp.path().join("node_modules/pkg.js");
    std::fs::write(&buried, "x").unwrap();
    assert!(watcher.is_excluded(&buried));

    let dotfile = tmp.path().join(".env");
    std::fs::write(&dotfile, "x").unwrap();
    assert!(watcher.is_excluded(&dotfile));

    let normal = tmp.path().join("main.rs");
    std::fs::write(&normal, "fn main() {}").unwrap();
    assert!(!watcher.is_excluded(&normal));
  }

  #[tokio::test]
  async fn is_excluded_skips_oversized_files() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = WatcherConfig::default();
    config.max_file_size = 4;
    let watcher = WorkspaceWatcher::new(tmp.path(), config);

    let big = tmp.path().join("big.txt");
    std::fs::write(&big, "this is more than four bytes").unwrap();
    assert!(watcher.is_excluded(&big));
  }
}
