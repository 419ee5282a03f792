pub mod chain;
pub mod delay;
pub mod filter;

pub use chain::{EffectsChain, MonoDelayParams, PingPongParams, SfxParams};
pub use delay::{MonoDelay, PingPongDelay};
pub use filter::RbjFilter;
