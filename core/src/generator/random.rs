use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::*;

/// Purely random layout drawn from a `SmallRng` seeded with `seed`, so the seed
/// alone is enough to rebuild the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let config = config.validate()?;
        log::debug!(
            "Generating {}x{} board with {} mines from seed {}",
            config.size.0,
            config.size.1,
            config.mines,
            self.seed
        );
        let mut rng = SmallRng::seed_from_u64(self.seed);
        Board::generate(config, &mut rng)
    }
}
