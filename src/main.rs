use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

use synthscope::analysis::SpectralAnalyzer;
use synthscope::audio::{AudioBackend, CpalBackend};
use synthscope::engine::{Engine, LiveParams, RenderClock};
use synthscope::input::KeyboardHandler;
use synthscope::synth::{Instrument, NoteRegistry};
use synthscope::SynthConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const STATUS_INTERVAL: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    env_logger::init();

    let config = SynthConfig::default();
    config.validate()?;

    let clock = RenderClock::new(config.sample_rate);
    let registry = Arc::new(NoteRegistry::new(Instrument::single_osc()));
    let analyzer = Arc::new(SpectralAnalyzer::new(
        config.channels as usize,
        config.scope_len,
        config.fft_len,
    )?);
    let params = Arc::new(LiveParams::default());

    let engine = Engine::new(
        &config,
        registry.clone(),
        analyzer.clone(),
        params.clone(),
        clock.clone(),
    );
    let mut backend = CpalBackend::new(engine, config);
    backend.start()?;
    log::info!(
        "rendering at {} Hz, {} channels, {}-frame blocks",
        config.sample_rate,
        config.channels,
        config.block_size
    );

    let mut keyboard = KeyboardHandler::new(registry.clone(), params, clock.clone());
    let started = Instant::now();
    let mut last_poll = Instant::now();
    let mut last_status = Instant::now();

    loop {
        let dt = last_poll.elapsed().as_secs_f64();
        last_poll = Instant::now();
        if !keyboard.update(dt) {
            break;
        }

        if last_status.elapsed() >= STATUS_INTERVAL {
            last_status = Instant::now();
            let wall = started.elapsed().as_secs_f64();
            let rendered = clock.now();
            log::debug!(
                "notes: {} wall: {wall:.2}s rendered: {rendered:.2}s latency: {:.3}s",
                registry.active_notes(),
                wall - rendered
            );
        }

        std::thread::sleep(POLL_INTERVAL);
    }

    backend.stop()?;
    Ok(())
}
