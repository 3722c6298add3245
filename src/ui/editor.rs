// The list editor state machine. Pure values in, pure values out - the whole
// thing is testable without a terminal attached.

/// One decoded key press, already resolved to its meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    TogglePick,
    Combine,
    Quit,
    /// Input that maps to nothing, carrying the raw bytes that were consumed.
    Ignore(Vec<u8>),
}

/// Ordered track list plus a focus cursor and an optional picked-up track.
/// While a track is picked up, movement commands drag it through the list;
/// otherwise they just move the focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    files: Vec<String>,
    focus: usize,
    picked: Option<usize>,
}

impl EditorState {
    /// `files` must be non-empty; the caller errors out before ever getting here.
    pub fn new(files: Vec<String>) -> Self {
        debug_assert!(!files.is_empty());
        Self {
            files,
            focus: 0,
            picked: None,
        }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    pub fn into_files(self) -> Vec<String> {
        self.files
    }

    /// Step the state machine. Every transition is a reindex or an adjacent
    /// swap, so the list always stays a permutation of the initial set.
    #[must_use]
    pub fn apply(mut self, command: &Command) -> Self {
        match command {
            Command::MoveUp => match self.picked {
                Some(picked) if picked > 0 => {
                    self.files.swap(picked, picked - 1);
                    self.picked = Some(picked - 1);
                    self.focus = picked - 1;
                }
                Some(_) => {} // already at the top, clamp
                None => self.focus = self.focus.saturating_sub(1),
            },
            Command::MoveDown => match self.picked {
                Some(picked) if picked + 1 < self.files.len() => {
                    self.files.swap(picked, picked + 1);
                    self.picked = Some(picked + 1);
                    self.focus = picked + 1;
                }
                Some(_) => {} // already at the bottom, clamp
                None => self.focus = (self.focus + 1).min(self.files.len() - 1),
            },
            Command::TogglePick => {
                // Putting a track down leaves it where it is - this is not an undo
                self.picked = match self.picked {
                    Some(_) => None,
                    None => Some(self.focus),
                };
            }
            Command::Combine | Command::Quit | Command::Ignore(_) => {}
        }
        self
    }
}
