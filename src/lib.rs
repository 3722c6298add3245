// mixtape - interactive terminal mixtape builder
// The state machine and audio pass live here so they stay testable without
// a terminal attached

pub mod audio;  // folder scanning, decoding, silence gaps, the combine pass
pub mod config; // settings and preferences
pub mod ui;     // raw-mode session, key decoding, list editing, rendering

// Export the stuff callers actually use
pub use audio::{CombineSummary, Combiner, TrackScanner};
pub use config::Config;
pub use ui::{Command, EditorState};
