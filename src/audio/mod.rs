// Audio pipeline - scanning the input folder plus the combine pass.
// Decode/encode go through external codec machinery (symphonia in, ffmpeg out);
// nothing here tries to be clever about audio fidelity.

pub mod combiner;
pub mod decoder;
pub mod encoder;
pub mod scanner;
pub mod segment;

pub use combiner::{CombineError, CombineSummary, Combiner};
pub use decoder::DecodeError;
pub use encoder::EncodeError;
pub use scanner::{ScanError, TrackScanner};
pub use segment::AudioSegment;
