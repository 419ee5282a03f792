pub mod analysis;
pub mod audio;
pub mod config;
pub mod engine;
pub mod input;
pub mod sfx;
pub mod synth;

pub use config::SynthConfig;
pub use engine::{Engine, RenderClock};
