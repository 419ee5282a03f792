use std::collections::HashMap;
use std::sync::Arc;

use device_query::{DeviceQuery, DeviceState, Keycode};
use rand::Rng;

use crate::engine::{LiveParams, RenderClock};
use crate::synth::{NoteRegistry, Waveform};

/// Two rows of a piano octave and a bit more, left to right.
const NOTE_KEYS: [Keycode; 15] = [
    Keycode::Z,
    Keycode::S,
    Keycode::X,
    Keycode::C,
    Keycode::F,
    Keycode::V,
    Keycode::G,
    Keycode::B,
    Keycode::H,
    Keycode::N,
    Keycode::M,
    Keycode::K,
    Keycode::Comma,
    Keycode::L,
    Keycode::Dot,
];

/// Keymap offset bounds: two octaves above the reference floor up to the
/// top of the ten-octave range, stepped by octaves.
const OFFSET_MIN: i32 = 16;
const OFFSET_MAX: i32 = 124;
const OFFSET_DEFAULT: i32 = 64;

/// Volume ramp rate while a volume key is held, as a fraction per second.
const VOLUME_RAMP: f64 = 0.5;

/// Polls the keyboard and drives the registry and live parameters.
/// This is the control thread: note timestamps come from the render clock,
/// and every edit goes through the shared handles' own locks.
pub struct KeyboardHandler {
    device_state: DeviceState,
    /// Per note key: the id sounded by the current press, if any. Kept so
    /// an octave change mid-hold still releases the note it struck.
    held_notes: HashMap<Keycode, i32>,
    control_states: HashMap<Keycode, bool>,
    registry: Arc<NoteRegistry>,
    params: Arc<LiveParams>,
    clock: RenderClock,
    offset: i32,
}

impl KeyboardHandler {
    pub fn new(
        registry: Arc<NoteRegistry>,
        params: Arc<LiveParams>,
        clock: RenderClock,
    ) -> Self {
        Self {
            device_state: DeviceState::new(),
            held_notes: HashMap::new(),
            control_states: HashMap::new(),
            registry,
            params,
            clock,
            offset: OFFSET_DEFAULT,
        }
    }

    /// Poll once. `dt` is the seconds since the previous poll (for the held
    /// volume ramp). Returns false once Escape is pressed.
    pub fn update(&mut self, dt: f64) -> bool {
        let keys: Vec<Keycode> = self.device_state.get_keys();
        let now = self.clock.now();

        self.update_notes(&keys, now);
        self.update_instrument(&keys, dt);
        self.update_sfx(&keys);

        !self.rising_edge(&keys, Keycode::Escape)
    }

    fn update_notes(&mut self, keys: &[Keycode], now: f64) {
        for (index, key) in NOTE_KEYS.iter().enumerate() {
            let pressed = keys.contains(key);
            match (self.held_notes.get(key).copied(), pressed) {
                (None, true) => {
                    let id = self.offset + index as i32;
                    let velocity = rand::rng().random_range(0.4..=1.0);
                    self.registry.note_on(id, self.offset, velocity, now);
                    self.held_notes.insert(*key, id);
                }
                (Some(id), false) => {
                    self.registry.note_off(id, now);
                    self.held_notes.remove(key);
                }
                _ => {}
            }
        }
    }

    fn update_instrument(&mut self, keys: &[Keycode], dt: f64) {
        let waveform_keys = [
            (Keycode::Key1, Waveform::Sine),
            (Keycode::Key2, Waveform::Sawtooth),
            (Keycode::Key3, Waveform::Square),
            (Keycode::Key4, Waveform::Triangle),
        ];
        for (key, waveform) in waveform_keys {
            if self.rising_edge(keys, key) {
                self.registry.with_instrument(|i| i.set_waveform(waveform));
                log::info!("waveform: {waveform:?}");
            }
        }

        if self.rising_edge(keys, Keycode::NumpadAdd) {
            let harmonics = self.registry.with_instrument(|i| {
                i.adjust_harmonics(1);
                i.harmonics()
            });
            log::info!("harmonics: {harmonics}");
        }
        if self.rising_edge(keys, Keycode::NumpadSubtract) {
            let harmonics = self.registry.with_instrument(|i| {
                i.adjust_harmonics(-1);
                i.harmonics()
            });
            log::info!("harmonics: {harmonics}");
        }

        if self.rising_edge(keys, Keycode::NumpadDivide) {
            self.offset = (self.offset - 12).clamp(OFFSET_MIN, OFFSET_MAX);
            log::info!("octave: {} (offset {})", self.offset / 12, self.offset);
        }
        if self.rising_edge(keys, Keycode::NumpadMultiply) {
            self.offset = (self.offset + 12).clamp(OFFSET_MIN, OFFSET_MAX);
            log::info!("octave: {} (offset {})", self.offset / 12, self.offset);
        }

        if keys.contains(&Keycode::Up) {
            self.registry
                .with_instrument(|i| i.scale_volume(VOLUME_RAMP * dt));
        }
        if keys.contains(&Keycode::Down) {
            self.registry
                .with_instrument(|i| i.scale_volume(-VOLUME_RAMP * dt));
        }
    }

    fn update_sfx(&mut self, keys: &[Keycode]) {
        if self.rising_edge(keys, Keycode::Q) {
            let on = self.params.edit(|p| {
                p.sfx.mono_delay.enabled = !p.sfx.mono_delay.enabled;
                p.sfx.mono_delay.enabled
            });
            log::info!("mono delay: {}", if on { "on" } else { "off" });
        }
        if self.rising_edge(keys, Keycode::W) {
            let on = self.params.edit(|p| {
                p.sfx.ping_pong.enabled = !p.sfx.ping_pong.enabled;
                p.sfx.ping_pong.enabled
            });
            log::info!("stereo delay: {}", if on { "on" } else { "off" });
        }
        if self.rising_edge(keys, Keycode::O) {
            let on = self.params.edit(|p| {
                p.sfx.hpf_enabled = !p.sfx.hpf_enabled;
                p.sfx.hpf_enabled
            });
            log::info!("high-pass: {}", if on { "on" } else { "off" });
        }
        if self.rising_edge(keys, Keycode::P) {
            let on = self.params.edit(|p| {
                p.sfx.lpf_enabled = !p.sfx.lpf_enabled;
                p.sfx.lpf_enabled
            });
            log::info!("low-pass: {}", if on { "on" } else { "off" });
        }
        if self.rising_edge(keys, Keycode::Tab) {
            let mode = self.params.edit(|p| {
                p.vis_mode = p.vis_mode.toggled();
                p.vis_mode
            });
            log::info!("visualizer: {mode:?}");
        }
    }

    /// True only on the poll where `key` transitions to pressed.
    fn rising_edge(&mut self, keys: &[Keycode], key: Keycode) -> bool {
        let pressed = keys.contains(&key);
        let was_pressed = self.control_states.insert(key, pressed).unwrap_or(false);
        pressed && !was_pressed
    }
}
