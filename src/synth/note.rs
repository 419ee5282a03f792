/// One sounding (or releasing) key, identified by its semitone index.
///
/// `on > off` means the note is currently held; once released, `off`
/// carries the release timestamp and the envelope ramps down from there.
/// Timestamps are seconds on the render clock.
#[derive(Clone, Copy, Debug)]
pub struct Note {
    /// Semitone index relative to the 8 Hz reference octave.
    pub id: i32,
    /// Keymap offset that was active when the note was struck.
    pub offset: i32,
    pub on: f64,
    pub off: f64,
    /// Strike velocity in (0, 1].
    pub velocity: f64,
    pub active: bool,
}

impl Note {
    pub fn strike(id: i32, offset: i32, velocity: f64, now: f64) -> Self {
        Self {
            id,
            offset,
            on: now,
            off: 0.0,
            velocity,
            active: true,
        }
    }

    /// True while the key is held (not yet released this cycle).
    pub fn is_held(&self) -> bool {
        self.on > self.off
    }
}
