//! Worley (cellular) noise
//!
//! Seed points are scattered over a regular grid, one batch per cell. A pixel's
//! value comes from the distance to the nearest seed in its own cell and the
//! eight cells around it. Cells past the canvas border are not wrapped, so
//! edge pixels see fewer candidates.

use crate::config::FieldConfig;
use crate::error::RenderError;
use rand::Rng;

/// A seed point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPoint {
    pub x: u32,
    pub y: u32,
}

impl SeedPoint {
    pub fn distance_to(&self, x: u32, y: u32) -> f64 {
        (self.x as f64 - x as f64).hypot(self.y as f64 - y as f64)
    }
}

// ============================================================================
// PointField
// ============================================================================

/// Seed points for one frame, addressed by (cell x, cell y, seed index)
pub struct PointField {
    config: FieldConfig,
    points: Vec<SeedPoint>,
}

impl PointField {
    /// Scatter `amount_per_cell` uniformly random points into every cell
    pub fn generate<R: Rng>(config: FieldConfig, rng: &mut R) -> Result<Self, RenderError> {
        config.validate()?;

        let count = config.seed_count();
        let mut points = Vec::new();
        points
            .try_reserve_exact(count)
            .map_err(|_| RenderError::AllocationFailure { requested: count })?;

        let cell_w = config.cell_width();
        let cell_h = config.cell_height();

        for cx in 0..config.sections {
            for cy in 0..config.sections {
                for _ in 0..config.amount_per_cell {
                    points.push(SeedPoint {
                        x: rng.gen_range(0..cell_w) + cx * cell_w,
                        y: rng.gen_range(0..cell_h) + cy * cell_h,
                    });
                }
            }
        }

        Ok(Self { config, points })
    }

    /// Build a field from explicit points laid out in generation order
    #[cfg(test)]
    pub fn from_points(config: FieldConfig, points: Vec<SeedPoint>) -> Result<Self, RenderError> {
        config.validate()?;
        if points.len() != config.seed_count() {
            return Err(RenderError::InvalidConfiguration(format!(
                "expected {} seed points, got {}",
                config.seed_count(),
                points.len()
            )));
        }
        Ok(Self { config, points })
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn points(&self) -> &[SeedPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Seeds owned by cell (cx, cy)
    pub fn cell(&self, cx: u32, cy: u32) -> &[SeedPoint] {
        let amount = self.config.amount_per_cell as usize;
        let start = (cx as usize * self.config.sections as usize + cy as usize) * amount;
        &self.points[start..start + amount]
    }
}

// ============================================================================
// WorleyField
// ============================================================================

/// Per-pixel evaluator over a generated point field
pub struct WorleyField<'a> {
    field: &'a PointField,
    reference_distance: f64,
}

impl<'a> WorleyField<'a> {
    pub fn new(field: &'a PointField) -> Self {
        let config = field.config();
        let per_axis = (config.sections * config.amount_per_cell) as f64;
        let reference_distance =
            (config.width as f64 / per_axis).hypot(config.height as f64 / per_axis);

        Self {
            field,
            reference_distance,
        }
    }

    /// Distance at which a pixel reaches full black
    #[inline]
    pub fn reference_distance(&self) -> f64 {
        self.reference_distance
    }

    /// Distance from (x, y) to the nearest seed in the surrounding 3x3 cells.
    ///
    /// `None` when every neighbor cell lies outside the grid, which only
    /// happens for remainder pixels far past the last full cell.
    pub fn nearest_distance(&self, x: u32, y: u32) -> Option<f64> {
        let config = self.field.config();
        let sections = config.sections as i64;
        let cell_x = (x / config.cell_width()) as i64;
        let cell_y = (y / config.cell_height()) as i64;

        let mut nearest: Option<f64> = None;
        for nx in (cell_x - 1)..=(cell_x + 1) {
            if nx < 0 || nx >= sections {
                continue;
            }
            for ny in (cell_y - 1)..=(cell_y + 1) {
                if ny < 0 || ny >= sections {
                    continue;
                }
                for seed in self.field.cell(nx as u32, ny as u32) {
                    let d = seed.distance_to(x, y);
                    if nearest.map_or(true, |n| d < n) {
                        nearest = Some(d);
                    }
                }
            }
        }
        nearest
    }

    /// Grayscale value for a pixel: 255 on a seed, 0 at or past the reference distance
    pub fn intensity(&self, x: u32, y: u32) -> u8 {
        match self.nearest_distance(x, y) {
            Some(d) => {
                let t = (d / self.reference_distance).min(1.0);
                ((1.0 - t) * 255.0).round() as u8
            },
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeds_stay_inside_their_cells() {
        let configs = [
            FieldConfig::new(100, 100, 25, 1),
            FieldConfig::new(1000, 1000, 10, 1),
            FieldConfig::new(105, 73, 7, 3),
            FieldConfig::new(5, 5, 5, 2),
        ];
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);

        for config in configs {
            let field = PointField::generate(config, &mut rng).unwrap();
            assert_eq!(field.len(), config.seed_count());

            let (w, h) = (config.cell_width(), config.cell_height());
            for cx in 0..config.sections {
                for cy in 0..config.sections {
                    let seeds = field.cell(cx, cy);
                    assert_eq!(seeds.len(), config.amount_per_cell as usize);
                    for seed in seeds {
                        assert!(seed.x >= cx * w && seed.x < (cx + 1) * w);
                        assert!(seed.y >= cy * h && seed.y < (cy + 1) * h);
                    }
                }
            }
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = PointField::generate(FieldConfig::new(100, 100, 0, 1), &mut rng);
        assert!(matches!(result, Err(RenderError::InvalidConfiguration(_))));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_field_reports_allocation_failure() {
        // 2^60 seeds of 8 bytes each exceed isize::MAX
        let side = 1 << 20;
        let config = FieldConfig::new(side, side, side, side);
        let result = PointField::generate(config, &mut StdRng::seed_from_u64(2));
        assert!(matches!(
            result,
            Err(RenderError::AllocationFailure { requested }) if requested == 1 << 60
        ));
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = FieldConfig::new(100, 100, 10, 2);
        let a = PointField::generate(config, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = PointField::generate(config, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.points(), b.points());

        let (ea, eb) = (WorleyField::new(&a), WorleyField::new(&b));
        for y in (0..100).step_by(7) {
            for x in (0..100).step_by(5) {
                assert_eq!(ea.intensity(x, y), eb.intensity(x, y));
            }
        }
    }

    #[test]
    fn test_reference_distance() {
        let config = FieldConfig::new(100, 100, 25, 1);
        let field = PointField::generate(config, &mut StdRng::seed_from_u64(3)).unwrap();
        let eval = WorleyField::new(&field);
        assert!((eval.reference_distance() - 32.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_extremes() {
        // One cell with two seeds stacked on the origin, reference = |(50, 50)|
        let config = FieldConfig::new(100, 100, 1, 2);
        let origin = SeedPoint { x: 0, y: 0 };
        let field = PointField::from_points(config, vec![origin, origin]).unwrap();
        let eval = WorleyField::new(&field);

        assert_eq!(eval.intensity(0, 0), 255);
        assert_eq!(eval.intensity(50, 50), 0);
        assert_eq!(eval.intensity(99, 99), 0);
        assert_eq!(eval.intensity(1, 0), 251);
    }

    #[test]
    fn test_nearer_seed_is_brighter() {
        let config = FieldConfig::new(40, 40, 2, 1);
        let seeds = vec![
            SeedPoint { x: 10, y: 10 },
            SeedPoint { x: 10, y: 30 },
            SeedPoint { x: 30, y: 10 },
            SeedPoint { x: 30, y: 30 },
        ];
        let field = PointField::from_points(config, seeds).unwrap();
        let eval = WorleyField::new(&field);

        assert_eq!(eval.nearest_distance(30, 30), Some(0.0));
        assert!(eval.intensity(31, 30) > eval.intensity(35, 30));
        assert_eq!(eval.nearest_distance(20, 10), Some(10.0));
    }

    #[test]
    fn test_remainder_pixels_are_evaluated() {
        // 105 / 10 leaves five columns past the last full cell
        let config = FieldConfig::new(105, 100, 10, 1);
        let field = PointField::generate(config, &mut StdRng::seed_from_u64(5)).unwrap();
        let eval = WorleyField::new(&field);
        for x in 100..105 {
            assert!(eval.nearest_distance(x, 50).is_some());
        }
    }

    #[test]
    fn test_pixels_past_the_grid_fall_to_black() {
        // Cells are one pixel wide, so column 18 maps to cell 18 of 10
        let config = FieldConfig::new(19, 10, 10, 1);
        let field = PointField::generate(config, &mut StdRng::seed_from_u64(8)).unwrap();
        let eval = WorleyField::new(&field);
        assert_eq!(eval.nearest_distance(18, 0), None);
        assert_eq!(eval.intensity(18, 0), 0);
    }
}
