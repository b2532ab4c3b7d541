use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

use notebar::app::{App, Session};
use notebar::config::Config;
use notebar::event_loop::run_app;
use notebar::logging::init_logging;
use notebar::pins::{PinStore, PinnedSet};
use notebar::store::{sample_notes, JsonNoteStore, MemoryNoteStore, NoteStore, NotesWatcher};

/// A terminal notes sidebar with live search, pinning and keyboard navigation
#[derive(Parser, Debug)]
#[command(name = "notebar", version, about)]
struct Cli {
    /// Run against an in-memory sample collection; notes, pins and layout are not saved
    #[arg(long)]
    demo: bool,

    /// Directory holding notes.json, pinned.json and logs (overrides the config file)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !std::io::stdin().is_terminal() {
        anyhow::bail!("notebar must be run in an interactive terminal");
    }

    // A broken config file should not keep the app from starting
    let mut startup_warnings = Vec::new();
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            startup_warnings.push(format!("Config ignored: {:#}", err));
            Config::default()
        }
    };

    let data_dir = match cli.data_dir.clone() {
        Some(dir) => dir,
        None => config.data_dir()?,
    };

    if let Err(err) = init_logging(&config.logging.level, &data_dir) {
        startup_warnings.push(format!("Logging disabled: {:#}", err));
    }
    for warning in &startup_warnings {
        warn!("event=startup_warning message={}", warning);
    }

    let (session, watcher) = open_session(&cli, &data_dir)?;
    let mut app = App::new(config, session, watcher, !cli.demo)
        .context("Failed to initialize application")?;
    for warning in startup_warnings {
        app.toast_manager.warning(warning);
    }

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode - are you in a terminal?")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal (always try to restore even on error)
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    info!("event=app_exit ok={}", result.is_ok());
    result
}

/// Build the note store, pins and (for on-disk stores) the file watcher.
fn open_session(cli: &Cli, data_dir: &std::path::Path) -> Result<(Session, Option<NotesWatcher>)> {
    if cli.demo {
        let notes = sample_notes(Utc::now());
        let pinned: PinnedSet = notes.iter().take(1).map(|n| n.slug.clone()).collect();
        let store: Box<dyn NoteStore> = Box::new(MemoryNoteStore::new(notes));
        return Ok((Session::new(store, PinStore::in_memory(pinned)), None));
    }

    let store = JsonNoteStore::open(data_dir)
        .with_context(|| format!("Failed to open notes in {}", data_dir.display()))?;
    let watcher = match NotesWatcher::new(store.path()) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            warn!("event=watcher_unavailable error={:#}", err);
            None
        }
    };
    let pins = PinStore::load(data_dir)?;

    Ok((Session::new(Box::new(store), pins), watcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn demo_help_only_promises_notes_are_not_saved() {
        let command = Cli::command();
        let demo = command
            .get_arguments()
            .find(|arg| arg.get_id() == "demo")
            .unwrap();
        let help = demo.get_help().unwrap().to_string();
        assert!(help.contains("not saved"));
        assert!(!help.contains("disk"));
    }

    #[test]
    fn parses_demo_and_data_dir() {
        let cli = Cli::try_parse_from(["notebar", "--demo", "--data-dir", "/tmp/notes"]).unwrap();
        assert!(cli.demo);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/notes")));
    }
}
