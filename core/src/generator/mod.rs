use crate::*;
pub use random::*;

mod random;

/// Strategy that turns a [`GameConfig`] into a ready-to-play board.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}
