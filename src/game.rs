//! One guessing round: a hidden target filter, the region board graded
//! against it, and the submit cycle between guessing and showing the answer.

use crate::eq::EqError;
use crate::filter::Filter;
use crate::generator::FilterGenerator;
use crate::regions::RegionBoard;
use crate::response::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Guessing,
    Revealed,
}

pub struct GameSession {
    generator: FilterGenerator,
    board: RegionBoard,
    geometry: Geometry,
    target: Filter,
    phase: Phase,
}

impl GameSession {
    pub fn new(
        geometry: Geometry,
        min_gain_db: i32,
        max_gain_db: i32,
        single_select: bool,
    ) -> Result<Self, EqError> {
        let generator = FilterGenerator::new(
            geometry.min_freq,
            geometry.max_freq,
            geometry.bands,
            min_gain_db,
            max_gain_db,
        )?;
        Self::with_generator(geometry, generator, single_select)
    }

    pub fn with_generator(
        geometry: Geometry,
        mut generator: FilterGenerator,
        single_select: bool,
    ) -> Result<Self, EqError> {
        let target = generator.generate();
        let mut board = RegionBoard::new(single_select);
        board.start_round(&geometry, &target)?;

        Ok(Self {
            generator,
            board,
            geometry,
            target,
            phase: Phase::Guessing,
        })
    }

    pub fn target(&self) -> &Filter {
        &self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn board(&self) -> &RegionBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut RegionBoard {
        &mut self.board
    }

    /// No-op without a guess. Otherwise: first submit grades the board,
    /// the next one starts a fresh round with a new target.
    pub fn submit(&mut self) -> Result<(), EqError> {
        if self.board.answers().is_empty() {
            return Ok(());
        }

        match self.phase {
            Phase::Guessing => {
                self.board.reveal(&self.target);
                self.phase = Phase::Revealed;
                Ok(())
            }
            Phase::Revealed => self.next_round(),
        }
    }

    fn next_round(&mut self) -> Result<(), EqError> {
        self.target = self.generator.generate();
        self.phase = Phase::Guessing;
        self.board.start_round(&self.geometry, &self.target)
    }

    /// Difficulty change. A band count below 2 is rejected outright;
    /// otherwise the target is regenerated and the round resets.
    pub fn set_bands(&mut self, bands: usize) -> Result<(), EqError> {
        if bands < 2 {
            return Err(EqError::InvalidBandCount(bands));
        }
        self.generator
            .rebuild(self.geometry.min_freq, self.geometry.max_freq, bands)?;
        self.geometry.bands = bands;
        self.next_round()
    }

    /// Canvas size change: relays out the regions, preserving any
    /// in-progress selection.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), EqError> {
        if width == self.geometry.width && height == self.geometry.height {
            return Ok(());
        }
        if width <= 0.0 || height <= 0.0 {
            return Ok(());
        }
        self.geometry.width = width;
        self.geometry.height = height;
        self.board.layout(&self.geometry, &self.target)
    }
}
