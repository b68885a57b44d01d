//! Editor configuration: grid size and random obstacle density.

/// Fraction of cells turned into obstacles by random generation.
///
/// The number of draws is chosen uniformly in
/// `[floor(min * cells), floor(max * cells))`. Draws that land on an
/// endpoint or repeat an earlier draw are dropped, so the final obstacle
/// count can be lower.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleDensity {
    pub min: f64,
    pub max: f64,
}

impl ObstacleDensity {
    /// Create a density range, clamping both bounds into `[0, 1]` and
    /// ordering them.
    pub fn new(a: f64, b: f64) -> Self {
        let a = a.clamp(0.0, 1.0);
        let b = b.clamp(0.0, 1.0);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Draw-count bounds `[lo, hi)` for a grid of `cells` cells.
    pub fn bounds(self, cells: usize) -> (usize, usize) {
        let lo = (self.min * cells as f64).floor() as usize;
        let hi = (self.max * cells as f64).floor() as usize;
        (lo, hi.max(lo))
    }
}

impl Default for ObstacleDensity {
    fn default() -> Self {
        Self { min: 0.4, max: 0.5 }
    }
}

/// Initial editor settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorConfig {
    pub width: i32,
    pub height: i32,
    pub density: ObstacleDensity,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            density: ObstacleDensity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_bounds_floor_both_ends() {
        let d = ObstacleDensity::default();
        assert_eq!(d.bounds(1200), (480, 600));
        assert_eq!(d.bounds(9), (3, 4));
        assert_eq!(d.bounds(1), (0, 0));
    }

    #[test]
    fn density_is_clamped_and_ordered() {
        let d = ObstacleDensity::new(1.5, 0.2);
        assert_eq!(d.min, 0.2);
        assert_eq!(d.max, 1.0);
    }
}
