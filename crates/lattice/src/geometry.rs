use crate::{Direction, LatticeError};

/// Periodic `size x size` square lattice with row-major site numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
}

impl Lattice {
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self { size }
    }

    /// Linear size `L`.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, `L * L`.
    #[must_use]
    pub const fn sites(&self) -> usize {
        self.size * self.size
    }

    /// `(row, col)` of a site.
    #[must_use]
    pub const fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.size, site % self.size)
    }

    #[must_use]
    pub const fn site(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// # Errors
    ///
    /// Returns [`LatticeError::SiteOutOfRange`] when `site >= L * L`.
    pub fn check_site(&self, site: usize) -> Result<(), LatticeError> {
        if site < self.sites() {
            Ok(())
        } else {
            Err(LatticeError::SiteOutOfRange { site, sites: self.sites() })
        }
    }

    /// # Errors
    ///
    /// Returns [`LatticeError::MapShape`] when `map` does not hold `L * L` cells.
    pub fn check_map(&self, name: &'static str, map: &[f64]) -> Result<(), LatticeError> {
        if map.len() == self.sites() {
            Ok(())
        } else {
            Err(LatticeError::MapShape { name, expected: self.sites(), actual: map.len() })
        }
    }

    /// Site reached from `site` by one move, wrapping at the borders.
    ///
    /// The next-nearest moves step along the lattice diagonal: `LowerNext`
    /// goes down-right, `UpperNext` goes up-left.
    #[must_use]
    pub fn neighbor(&self, site: usize, direction: Direction) -> usize {
        let (row, col) = self.coords(site);
        let l = self.size;
        let (row, col) = match direction {
            Direction::Right => (row, (col + 1) % l),
            Direction::Down => ((row + 1) % l, col),
            Direction::Left => (row, (col + l - 1) % l),
            Direction::Up => ((row + l - 1) % l, col),
            Direction::LowerNext => ((row + 1) % l, (col + 1) % l),
            Direction::UpperNext => ((row + l - 1) % l, (col + l - 1) % l),
        };
        self.site(row, col)
    }
}
