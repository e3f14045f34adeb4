//! Reference-track playback with a switchable filtered rendition. The wet
//! buffer is rendered offline on toggle, so the audio callback only copies
//! samples.

use crate::audio::{self, Audio, AudioError};
use crate::filter::Filter;
use crate::parametric_eq::ParametricEq;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct Player {
    audio: Audio,
    stream: Option<cpal::Stream>,
    // the buffer the callback reads from, wet or dry
    buffer: Arc<Mutex<Vec<f32>>>,
    dry: Vec<f32>,
    cursor: Arc<AtomicUsize>,
    sample_rate: u32,
    pub playing: bool,
    pub filtering: bool,
    pub track_name: Option<String>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            audio: Audio::new(),
            stream: None,
            buffer: Arc::new(Mutex::new(Vec::new())),
            dry: Vec::new(),
            cursor: Arc::new(AtomicUsize::new(0)),
            sample_rate: 44100,
            playing: false,
            filtering: false,
            track_name: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.dry.is_empty()
    }

    /// Decode a file and hand it to a fresh paused stream. The filtered
    /// rendition is dropped; a new track always starts dry.
    pub fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        let (samples, channels, sample_rate) = audio::load_audio(path)?;
        let stereo = to_stereo(&samples, channels);

        self.stream = None;
        self.playing = false;
        self.filtering = false;
        self.sample_rate = sample_rate;
        self.dry = stereo.clone();
        *self.buffer.lock().unwrap() = stereo;
        self.cursor.store(0, Ordering::SeqCst);
        self.track_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());

        let buffer = Arc::clone(&self.buffer);
        let cursor = Arc::clone(&self.cursor);
        let out_channels = self.audio.output_config.channels as usize;

        self.stream = self.audio.create_stream_with_callback(move |data| {
            let samples = buffer.lock().unwrap();
            let mut pos = cursor.load(Ordering::SeqCst);
            for frame in data.chunks_mut(out_channels) {
                for (ch, slot) in frame.iter_mut().enumerate() {
                    *slot = if pos + 1 < samples.len() {
                        samples[pos + ch.min(1)]
                    } else {
                        0.0
                    };
                }
                if pos + 1 < samples.len() {
                    pos += 2;
                }
            }
            cursor.store(pos, Ordering::SeqCst);
        });

        Ok(())
    }

    pub fn toggle_play(&mut self) {
        use cpal::traits::StreamTrait;

        let Some(stream) = &self.stream else { return };
        if self.playing {
            if let Err(e) = stream.pause() {
                eprintln!("Failed to pause stream: {}", e);
                return;
            }
        } else {
            if self.at_end() {
                self.cursor.store(0, Ordering::SeqCst);
            }
            if let Err(e) = stream.play() {
                eprintln!("Failed to start stream: {}", e);
                return;
            }
        }
        self.playing = !self.playing;
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.toggle_play();
        }
    }

    /// Switch between the dry track and the filtered rendition without
    /// interrupting playback. The cursor is shared, so the position carries
    /// over.
    pub fn toggle_filter(&mut self, filters: &[Filter]) {
        if !self.is_loaded() {
            return;
        }
        self.filtering = !self.filtering;
        self.swap_buffer(filters);
    }

    /// Re-render the wet buffer after the filter set changed.
    pub fn set_filters(&mut self, filters: &[Filter]) {
        if self.filtering {
            self.swap_buffer(filters);
        }
    }

    fn swap_buffer(&mut self, filters: &[Filter]) {
        let next = if self.filtering {
            let mut wet = self.dry.clone();
            let mut eq = ParametricEq::from_filters(self.sample_rate, filters);
            eq.process_buffer(&mut wet);
            wet
        } else {
            self.dry.clone()
        };
        *self.buffer.lock().unwrap() = next;
    }

    pub fn at_end(&self) -> bool {
        self.is_loaded() && self.cursor.load(Ordering::SeqCst) + 1 >= self.dry.len()
    }

    pub fn position_secs(&self) -> f32 {
        self.cursor.load(Ordering::SeqCst) as f32 / 2.0 / self.sample_rate as f32
    }

    pub fn duration_secs(&self) -> f32 {
        self.dry.len() as f32 / 2.0 / self.sample_rate as f32
    }

    pub fn seek_to(&mut self, secs: f32) {
        let frame = (secs * self.sample_rate as f32) as usize;
        let pos = (frame * 2).min(self.dry.len().saturating_sub(2));
        self.cursor.store(pos, Ordering::SeqCst);
    }
}

/// Interleave any channel count into stereo: mono is duplicated, extra
/// channels beyond the first two are dropped.
fn to_stereo(samples: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.iter().flat_map(|&s| [s, s]).collect(),
        2 => samples.to_vec(),
        n => samples
            .chunks_exact(n)
            .flat_map(|frame| [frame[0], frame[1]])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_is_duplicated() {
        assert_eq!(to_stereo(&[0.1, 0.2], 1), vec![0.1, 0.1, 0.2, 0.2]);
    }

    #[test]
    fn test_stereo_passes_through() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        assert_eq!(to_stereo(&samples, 2), samples);
    }

    #[test]
    fn test_surround_keeps_front_pair() {
        let samples = vec![0.1, 0.2, 0.9, 0.3, 0.4, 0.9];
        assert_eq!(to_stereo(&samples, 3), vec![0.1, 0.2, 0.3, 0.4]);
    }
}
