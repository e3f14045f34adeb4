//! Random target filter for a guessing round: one band center, an integer
//! gain magnitude with a random sign, and a fixed Q taken from the first
//! band's width.

use crate::eq::{self, EqError};
use crate::filter::Filter;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

pub struct FilterGenerator {
    center_freqs: Vec<f32>,
    q: f32,
    min_gain_db: i32,
    max_gain_db: i32,
    rng: Box<dyn RngCore>,
}

impl FilterGenerator {
    pub fn new(
        min_freq: f32,
        max_freq: f32,
        bands: usize,
        min_gain_db: i32,
        max_gain_db: i32,
    ) -> Result<Self, EqError> {
        Self::with_rng(
            min_freq,
            max_freq,
            bands,
            min_gain_db,
            max_gain_db,
            Box::new(StdRng::from_os_rng()),
        )
    }

    /// The random source is injected so round targets can be reproduced in
    /// tests with a seeded generator.
    pub fn with_rng(
        min_freq: f32,
        max_freq: f32,
        bands: usize,
        min_gain_db: i32,
        max_gain_db: i32,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, EqError> {
        let mut generator = Self {
            center_freqs: Vec::new(),
            q: 0.0,
            min_gain_db,
            max_gain_db,
            rng,
        };
        generator.rebuild(min_freq, max_freq, bands)?;
        Ok(generator)
    }

    /// Recompute band centers and Q for a new band count, keeping the random
    /// source.
    pub fn rebuild(&mut self, min_freq: f32, max_freq: f32, bands: usize) -> Result<(), EqError> {
        let edges = eq::generate_bands(min_freq, max_freq, bands)?;
        self.center_freqs = edges
            .windows(2)
            .map(|pair| eq::center_freq(pair[0], pair[1]))
            .collect();
        self.q = eq::band_q(edges[0], edges[1]);
        Ok(())
    }

    pub fn generate(&mut self) -> Filter {
        let index = self.rng.random_range(0..self.center_freqs.len());
        let magnitude = self.rng.random_range(self.min_gain_db..self.max_gain_db) as f32;
        let gain = if self.rng.random_bool(0.5) {
            magnitude
        } else {
            -magnitude
        };

        Filter::peaking(self.center_freqs[index], gain, self.q)
    }

    pub fn center_freqs(&self) -> &[f32] {
        &self.center_freqs
    }

    pub fn q(&self) -> f32 {
        self.q
    }
}
