//! Multi-channel observation assembled from the simulator's scalar maps.

use lattice::{Lattice, LatticeError, Simulator};

/// Observation channels in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Config = 0,
    Canvas = 1,
    Energy = 2,
    Defect = 3,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Config, Channel::Canvas, Channel::Energy, Channel::Defect];
    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Config => "config",
            Channel::Canvas => "canvas",
            Channel::Energy => "energy",
            Channel::Defect => "defect",
        }
    }
}

/// Channel-last `(L, L, 4)` tensor of 32-bit floats.
///
/// Cell `(row, col, channel)` lives at `(row * L + col) * 4 + channel`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub shape: [usize; 3],
    pub data: Vec<f32>,
}

impl Observation {
    /// Stacks four row-major `L * L` maps along a trailing channel axis.
    ///
    /// Values are cast to `f32` without normalization or clipping.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::MapShape`] for the first map whose length is
    /// not `L * L`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_maps(lattice: Lattice, maps: [&[f64]; Channel::COUNT]) -> Result<Self, LatticeError> {
        for (channel, map) in Channel::ALL.iter().zip(maps) {
            lattice.check_map(channel.name(), map)?;
        }
        let sites = lattice.sites();
        let mut data = Vec::with_capacity(sites * Channel::COUNT);
        for site in 0..sites {
            data.extend(maps.iter().map(|map| map[site] as f32));
        }
        Ok(Self { shape: [lattice.size(), lattice.size(), Channel::COUNT], data })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)` in `channel`, `None` off the lattice.
    #[must_use]
    pub fn get(&self, row: usize, col: usize, channel: Channel) -> Option<f32> {
        if row >= self.shape[0] || col >= self.shape[1] {
            return None;
        }
        self.data.get((row * self.shape[1] + col) * Channel::COUNT + channel as usize).copied()
    }

    /// One channel as a row-major `L * L` plane.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> Vec<f32> {
        self.data
            .iter()
            .skip(channel as usize)
            .step_by(Channel::COUNT)
            .copied()
            .collect()
    }

    /// Packed native-endian bytes, for learners that upload tensors.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

/// Queries the four maps from the simulator and stacks them.
///
/// # Errors
///
/// Returns [`LatticeError::MapShape`] if the simulator hands back a map of
/// the wrong size.
pub fn build_observation<S: Simulator + ?Sized>(sim: &S, lattice: Lattice) -> Result<Observation, LatticeError> {
    let config = sim.state_map();
    let canvas = sim.canvas_map();
    let energy = sim.energy_map();
    let defect = sim.defect_map();
    Observation::from_maps(
        lattice,
        [config.as_slice(), canvas.as_slice(), energy.as_slice(), defect.as_slice()],
    )
}

/// Declared observation bounds. The range is nominal and never enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationSpace {
    pub shape: [usize; 3],
    pub low: f32,
    pub high: f32,
}

impl ObservationSpace {
    #[must_use]
    pub const fn for_lattice(lattice: Lattice) -> Self {
        Self { shape: [lattice.size(), lattice.size(), Channel::COUNT], low: -1.0, high: 1.0 }
    }
}
