use super::*;

/// Fills every cell uniformly from the first `colors` palette entries. Same seed, same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
    colors: u8,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64, colors: u8) -> Self {
        Self { seed, colors }
    }

    pub fn next_seed(seed: u64) -> u64 {
        use rand::prelude::*;

        SmallRng::seed_from_u64(seed).random()
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, size: Coord2) -> Grid {
        use rand::prelude::*;

        let palette_len = Color::ALL.len() as u8;
        let colors = if self.colors == 0 || self.colors > palette_len {
            log::warn!(
                "Palette size {} out of range, clamped to 1..={}",
                self.colors,
                palette_len
            );
            self.colors.clamp(1, palette_len)
        } else {
            self.colors
        };
        let size = (size.0.max(1), size.1.max(1));

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let cells = Array2::from_shape_fn(size.to_nd_index(), |_| {
            Cell::Filled(Color::ALL[rng.random_range(0..usize::from(colors))])
        });
        log::trace!(
            "Generated {}x{} layout with {} colors from seed {}",
            size.0,
            size.1,
            colors,
            self.seed
        );
        Grid::from_array_unchecked(cells)
    }
}
