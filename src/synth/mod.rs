pub mod envelope;
pub mod instrument;
pub mod note;
pub mod registry;
pub mod wavegen;

pub use envelope::{AdsrEnvelope, AdsrState};
pub use instrument::{Instrument, InstrumentKind};
pub use note::Note;
pub use registry::NoteRegistry;
pub use wavegen::{note_frequency, WaveGenerator, Waveform};
