use std::sync::Mutex;

use super::instrument::Instrument;
use super::note::Note;

/// Fixed headroom scale applied to the summed mix.
const MIX_HEADROOM: f64 = 0.2;

/// Pre-reserved note storage; the keymap can only sound a handful of notes
/// at once, so the render thread never reallocates this.
const NOTE_CAPACITY: usize = 32;

struct RegistryInner {
    notes: Vec<Note>,
    instrument: Instrument,
}

/// The shared collection of sounding notes and their instrument.
///
/// `note_on`/`note_off` run on the control thread, `render_mix` on the
/// render thread; all three take the same lock, held only for the bounded
/// scan of currently active notes. Instrument parameter edits go through
/// `with_instrument` under the same lock, so the render pass always sees a
/// consistent instrument.
pub struct NoteRegistry {
    inner: Mutex<RegistryInner>,
}

impl NoteRegistry {
    pub fn new(instrument: Instrument) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                notes: Vec::with_capacity(NOTE_CAPACITY),
                instrument,
            }),
        }
    }

    /// Strike a note, or re-arm it if the same id is still releasing.
    /// At most one note per id exists at any time.
    pub fn note_on(&self, id: i32, offset: i32, velocity: f64, now: f64) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(index) = inner.notes.iter().position(|n| n.id == id) {
            let note = &mut inner.notes[index];
            if !note.is_held() {
                // Struck again during the release phase: restart the
                // attack without disturbing identity or other notes.
                note.on = now;
                note.active = true;
            }
        } else {
            inner.notes.push(Note::strike(id, offset, velocity, now));
        }
    }

    /// Release a sounding note. A stray release (unknown id, or already
    /// released) is a silent no-op.
    pub fn note_off(&self, id: i32, now: f64) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(note) = inner.notes.iter_mut().find(|n| n.id == id) {
            if note.is_held() {
                note.off = now;
            }
        }
    }

    /// Mix every note at time `now`, prune the ones whose envelopes have
    /// decayed to silence, and return the summed, headroom-scaled sample.
    pub fn render_mix(&self, now: f64) -> f64 {
        let mut inner = self.inner.lock().unwrap();
        let RegistryInner { notes, instrument } = &mut *inner;

        let mut mixed = 0.0;
        for note in notes.iter_mut() {
            let (sound, finished) = instrument.render(now, note);
            mixed += sound;
            if finished {
                note.active = false;
                instrument.clear_note(note.id);
            }
        }
        notes.retain(|n| n.active);

        mixed * MIX_HEADROOM
    }

    /// Run a closure against the instrument under the registry lock.
    pub fn with_instrument<R>(&self, f: impl FnOnce(&mut Instrument) -> R) -> R {
        let mut inner = self.inner.lock().unwrap();
        f(&mut inner.instrument)
    }

    pub fn active_notes(&self) -> usize {
        self.inner.lock().unwrap().notes.len()
    }
}
