//! Uniform price grid centred on spot.
//!
//! The grid has `2·Nj + 1` nodes with spacing `dx = (max - spot) / Nj`, so
//! node `Nj` sits exactly on spot. Node levels are clamped into the price
//! domain `[min, max]`; on the default domain `[0, 2K]` the lower part of
//! the grid clamps at zero whenever spot is below `K`.

use super::error::ConfigError;

/// Uniform, clamped price grid.
///
/// # Examples
/// ```
/// use pricer_pricing::fdm::PriceGrid;
///
/// let grid = PriceGrid::new(30.0, 3, 0.0, 60.0).unwrap();
/// assert_eq!(grid.len(), 7);
/// assert_eq!(grid.dx(), 10.0);
/// assert_eq!(grid.levels(), &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
/// // The virtual node past the top clamps onto the upper bound
/// assert_eq!(grid.level(7), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    spot: f64,
    space_steps: usize,
    dx: f64,
    min: f64,
    max: f64,
    levels: Vec<f64>,
}

impl PriceGrid {
    /// Builds the grid.
    ///
    /// # Arguments
    /// * `spot` - Spot level, placed on node `space_steps`
    /// * `space_steps` - Nodes on each side of spot, Nj
    /// * `min`, `max` - Price domain; requires `min <= spot < max`
    ///
    /// # Errors
    /// - `ConfigError::InvalidSpaceSteps` if `space_steps` is 0
    /// - `ConfigError::InvalidDomain` if the domain does not bracket spot
    pub fn new(spot: f64, space_steps: usize, min: f64, max: f64) -> Result<Self, ConfigError> {
        if space_steps == 0 {
            return Err(ConfigError::InvalidSpaceSteps(space_steps));
        }
        if !spot.is_finite() || !(min <= spot && spot < max) {
            return Err(ConfigError::InvalidDomain { min, max, spot });
        }

        let mut grid = Self {
            spot,
            space_steps,
            dx: (max - spot) / space_steps as f64,
            min,
            max,
            levels: Vec::new(),
        };
        grid.levels = (0..=2 * space_steps).map(|j| grid.level(j)).collect();
        Ok(grid)
    }

    /// Level of node `j`, clamped into the domain.
    ///
    /// Indices past the last node are allowed; the boundary row of the
    /// system reads the virtual node `2·Nj + 1`.
    #[inline]
    pub fn level(&self, j: usize) -> f64 {
        let offset = j as f64 - self.space_steps as f64;
        (self.spot + offset * self.dx).clamp(self.min, self.max)
    }

    /// All node levels, ascending.
    #[inline]
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Number of nodes, `2·Nj + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: a grid has at least three nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the spot node, Nj.
    #[inline]
    pub fn spot_index(&self) -> usize {
        self.space_steps
    }

    /// Grid spacing.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Lower domain bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper domain bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spot_node_is_exact() {
        let grid = PriceGrid::new(30.0, 300, 0.0, 60.0).unwrap();
        assert_eq!(grid.levels()[grid.spot_index()], 30.0);
        assert_eq!(grid.len(), 601);
    }

    #[test]
    fn test_lower_half_clamps_at_domain_floor() {
        // spot below the domain midpoint: dx is wide and the bottom clamps
        let grid = PriceGrid::new(20.0, 2, 0.0, 60.0).unwrap();
        assert_eq!(grid.dx(), 20.0);
        assert_eq!(grid.levels(), &[0.0, 0.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_virtual_node_clamps() {
        let grid = PriceGrid::new(30.0, 10, 0.0, 60.0).unwrap();
        assert_eq!(grid.level(21), 60.0);
        assert_eq!(grid.max(), 60.0);
        assert_eq!(grid.min(), 0.0);
    }

    #[test]
    fn test_invalid_domain() {
        assert!(matches!(
            PriceGrid::new(70.0, 10, 0.0, 60.0),
            Err(ConfigError::InvalidDomain { .. })
        ));
        assert!(PriceGrid::new(60.0, 10, 0.0, 60.0).is_err());
        assert!(PriceGrid::new(5.0, 10, 10.0, 60.0).is_err());
        assert_eq!(
            PriceGrid::new(30.0, 0, 0.0, 60.0),
            Err(ConfigError::InvalidSpaceSteps(0))
        );
    }

    proptest! {
        #[test]
        fn prop_levels_sorted_and_clamped(
            spot in 1.0f64..100.0,
            headroom in 0.1f64..100.0,
            nj in 1usize..200,
        ) {
            let max = spot + headroom;
            let grid = PriceGrid::new(spot, nj, 0.0, max).unwrap();
            prop_assert_eq!(grid.len(), 2 * nj + 1);
            prop_assert_eq!(grid.levels()[nj], spot);
            for pair in grid.levels().windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            for &x in grid.levels() {
                prop_assert!((0.0..=max).contains(&x));
            }
        }
    }
}
