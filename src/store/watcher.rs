//! File watcher for the notes file.
//!
//! The event loop polls [`NotesWatcher::changed`] and reloads the collection when the
//! file was modified by another program.

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Watches the notes file for changes made outside the app.
pub struct NotesWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<()>,
}

impl NotesWatcher {
    /// Watch the directory containing `notes_path`, reporting changes to that file only.
    pub fn new(notes_path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let target: PathBuf = notes_path.to_path_buf();
        let file_name = target.file_name().map(ToOwned::to_owned);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if event.kind.is_modify() || event.kind.is_create() {
                        let touches_notes = event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(ToOwned::to_owned) == file_name);
                        if touches_notes {
                            let _ = tx.send(());
                        }
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;

        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain pending notifications. Returns true if the file changed since the last call.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
