//! Selectable frequency regions laid over the graph: two per band (boost and
//! cut), each carrying the filter the user would be guessing and a state
//! driven by pointer events and the end-of-round reveal.

use crate::eq::{self, EqError};
use crate::filter::Filter;
use crate::response::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Default,
    Hovered,
    Selected,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub left: f32,
    pub width: f32,
    pub filter: Filter,
    pub state: RegionState,
}

/// Owns the authoritative region list and is the only writer of region
/// state. Everything else reads filtered views.
pub struct RegionBoard {
    regions: Vec<Region>,
    single_select: bool,
    revealed: bool,
    // regions as they stood just before the reveal emptied `Selected`
    snapshot: Vec<Region>,
}

impl RegionBoard {
    pub fn new(single_select: bool) -> Self {
        Self {
            regions: Vec::new(),
            single_select,
            revealed: false,
            snapshot: Vec::new(),
        }
    }

    /// Regenerate the region list for the given geometry and round target:
    /// one boost and one cut region per band interval, at the interval's
    /// center frequency with the target's gain magnitude and Q. A new
    /// region inherits the state of a prior region with an equal filter,
    /// which is how hover and selection survive a relayout that does not
    /// actually change the round.
    pub fn layout(&mut self, geo: &Geometry, target: &Filter) -> Result<(), EqError> {
        let edges = eq::generate_bands(geo.min_freq, geo.max_freq, geo.bands)?;
        let magnitude = target.gain.abs();

        let mut regions = Vec::with_capacity((edges.len() - 1) * 2);
        for pair in edges.windows(2) {
            let x1 = eq::freq_to_x(pair[0], geo.width, geo.min_freq, geo.max_freq);
            let x2 = eq::freq_to_x(pair[1], geo.width, geo.min_freq, geo.max_freq);
            let center = eq::center_freq(pair[0], pair[1]);

            for gain in [magnitude, -magnitude] {
                let filter = Filter {
                    frequency: center,
                    gain,
                    ..*target
                };
                let state = self
                    .regions
                    .iter()
                    .find(|prev| prev.filter == filter)
                    .map(|prev| prev.state)
                    .unwrap_or(RegionState::Default);
                regions.push(Region {
                    left: x1,
                    width: x2 - x1,
                    filter,
                    state,
                });
            }
        }

        self.regions = regions;
        Ok(())
    }

    /// Fresh region set for a new round: all prior state (including the
    /// reveal) is discarded, every region starts at `Default`.
    pub fn start_round(&mut self, geo: &Geometry, target: &Filter) -> Result<(), EqError> {
        self.regions.clear();
        self.snapshot.clear();
        self.revealed = false;
        self.layout(geo, target)
    }

    pub fn pointer_enter(&mut self, filter: &Filter) {
        if self.revealed {
            return;
        }
        if let Some(region) = self.find_mut(filter) {
            if region.state == RegionState::Default {
                region.state = RegionState::Hovered;
            }
        }
    }

    pub fn pointer_leave(&mut self, filter: &Filter) {
        if self.revealed {
            return;
        }
        if let Some(region) = self.find_mut(filter) {
            if region.state == RegionState::Hovered {
                region.state = RegionState::Default;
            }
        }
    }

    pub fn click(&mut self, filter: &Filter) {
        if self.revealed {
            return;
        }
        let Some(index) = self.regions.iter().position(|r| &r.filter == filter) else {
            // stale event from before a rebuild, not an error
            return;
        };

        match self.regions[index].state {
            RegionState::Default | RegionState::Hovered => {
                self.regions[index].state = RegionState::Selected;
                if self.single_select {
                    for (i, region) in self.regions.iter_mut().enumerate() {
                        if i != index && region.state == RegionState::Selected {
                            region.state = RegionState::Default;
                        }
                    }
                }
            }
            RegionState::Selected => {
                self.regions[index].state = RegionState::Default;
            }
            RegionState::Correct | RegionState::Wrong => {}
        }
    }

    /// Grade the board against the round target: the matching region becomes
    /// `Correct` regardless of its prior state, every other selected region
    /// becomes `Wrong`, and all pointer interaction is suspended until the
    /// next round rebuilds the board.
    pub fn reveal(&mut self, target: &Filter) {
        if self.revealed {
            return;
        }
        self.snapshot = self.regions.clone();

        for region in &mut self.regions {
            if region.filter == *target {
                region.state = RegionState::Correct;
            } else if region.state == RegionState::Selected {
                region.state = RegionState::Wrong;
            }
        }

        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions the overlay should present: all of them while guessing, only
    /// the graded ones while the answer is shown.
    pub fn overlay_regions(&self) -> impl Iterator<Item = &Region> + '_ {
        let revealed = self.revealed;
        self.regions.iter().filter(move |region| {
            !revealed || matches!(region.state, RegionState::Correct | RegionState::Wrong)
        })
    }

    /// Filters the response curve should currently display.
    pub fn visible_filters(&self) -> Vec<Filter> {
        self.regions
            .iter()
            .filter(|region| {
                matches!(
                    region.state,
                    RegionState::Hovered | RegionState::Selected | RegionState::Correct
                )
            })
            .map(|region| region.filter)
            .collect()
    }

    /// The user's answer set. While the answer is shown this reads from the
    /// pre-reveal snapshot, since the reveal itself empties `Selected`.
    pub fn answers(&self) -> Vec<Filter> {
        let source = if self.revealed {
            &self.snapshot
        } else {
            &self.regions
        };
        source
            .iter()
            .filter(|region| region.state == RegionState::Selected)
            .map(|region| region.filter)
            .collect()
    }

    fn find_mut(&mut self, filter: &Filter) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| &r.filter == filter)
    }
}
