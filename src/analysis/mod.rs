pub mod analyzer;
pub mod fft;

pub use analyzer::{SpectralAnalyzer, VisMode};
pub use fft::Fft;
