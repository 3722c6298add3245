// Terminal interface - raw-mode session, key decoding, the list editor loop

pub mod editor;
pub mod keys;
pub mod render;

pub use editor::{Command, EditorState};
pub use keys::KeyDecoder;
pub use render::ScreenContext;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io;
use tracing::debug;

/// Scoped raw-mode acquisition. Constructing the session flips the terminal
/// into raw mode; the guard's Drop restores cooked mode and the cursor on
/// every exit path - normal return, early quit, error, panic.
pub struct RawModeSession {
    _cleanup_guard: CleanupGuard,
}

struct CleanupGuard;

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
    }
}

impl RawModeSession {
    pub fn acquire() -> Result<Self> {
        // Start from a clean slate in case a previous run died rudely
        let _ = disable_raw_mode();
        enable_raw_mode()?;

        Ok(Self {
            _cleanup_guard: CleanupGuard,
        })
    }
}

/// How the interactive session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The user asked to combine; carries the final track order.
    Combine(Vec<String>),
    Quit,
}

/// Run the interactive list editor over `files`. Raw mode is held for exactly
/// the duration of this call - by the time the outcome is returned, the
/// terminal is back in cooked mode and safe to print to.
pub fn run_editor(files: Vec<String>, context: &ScreenContext) -> Result<SessionOutcome> {
    let _session = RawModeSession::acquire()?;

    let stdin = io::stdin();
    let mut decoder = KeyDecoder::new(stdin.lock());
    let mut stdout = io::stdout();

    let mut state = EditorState::new(files);
    render::draw(
        &mut stdout,
        &render::compose(state.files(), state.focus(), state.picked(), context),
    )?;

    loop {
        match decoder.next()? {
            Command::Combine => return Ok(SessionOutcome::Combine(state.into_files())),
            Command::Quit => return Ok(SessionOutcome::Quit),
            Command::Ignore(bytes) => {
                debug!("ignoring unmapped key input: {bytes:?}");
            }
            command => state = state.apply(&command),
        }

        // Redraw after every decoded key, mapped or not
        render::draw(
            &mut stdout,
            &render::compose(state.files(), state.focus(), state.picked(), context),
        )?;
    }
}
