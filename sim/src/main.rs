use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweeper_core::*;

mod logging;

/// Plays seeded games with random reveals and reports how they ended.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Board preset: beginner, intermediate or expert
    #[arg(short, long, default_value_t = Difficulty::Beginner)]
    difficulty: Difficulty,

    /// Custom board rows, overrides the preset
    #[arg(long, requires_all = ["columns", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns, overrides the preset
    #[arg(long, requires_all = ["rows", "mines"])]
    columns: Option<Coord>,

    /// Custom mine count, overrides the preset
    #[arg(long, requires_all = ["rows", "columns"])]
    mines: Option<CellCount>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Seed of the first game, following games use the next seeds
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        match (self.rows, self.columns, self.mines) {
            (Some(rows), Some(columns), Some(mines)) => GameConfig::new((rows, columns), mines),
            _ => self.difficulty.config(),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    won: u32,
    lost: u32,
    moves: u64,
    revealed: u64,
}

/// Plays one game to the end, revealing hidden cells picked uniformly at random.
///
/// Returns the finished game and how many reveals it took.
fn play(config: GameConfig, seed: u64) -> anyhow::Result<(Game, u64)> {
    let board = RandomBoardGenerator::new(seed).generate(config)?;
    log::trace!("Board for seed {}:\n{}", seed, board);

    let mut game = Game::from_board(board);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut moves = 0;
    while !game.is_finished() {
        let hidden: Vec<_> = game.observe().hidden_coords().collect();
        let coords = hidden[rng.random_range(0..hidden.len())];
        let status = game.reveal_cell(coords);
        log::trace!("Revealed {:?}: {:?}", coords, status);
        moves += 1;
    }
    Ok((game, moves))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose.log_level_filter()).context("could not install logger")?;

    let config = args
        .game_config()
        .validate()
        .with_context(|| format!("invalid board settings {:?}", args.game_config()))?;
    let first_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "Playing {} games on {}x{} with {} mines, first seed {}",
        args.games,
        config.size.0,
        config.size.1,
        config.mines,
        first_seed
    );

    let mut tally = Tally::default();
    for seed in (0..args.games).map(|i| first_seed.wrapping_add(u64::from(i))) {
        let (game, moves) = play(config, seed)?;
        tally.moves += moves;
        tally.revealed += u64::from(game.revealed_count());
        match game.status() {
            GameStatus::Won => tally.won += 1,
            GameStatus::Lost => {
                tally.lost += 1;
                log::debug!(
                    "Seed {} lost on {:?}, mines at {:?}",
                    seed,
                    game.triggered_mine(),
                    game.mine_coords().unwrap_or_default()
                );
            }
            GameStatus::Playing => anyhow::bail!("seed {} stopped before the game ended", seed),
        }
    }

    let played = tally.won + tally.lost;
    println!("games:    {}", played);
    println!("won:      {}", tally.won);
    println!("lost:     {}", tally.lost);
    if played > 0 {
        println!(
            "win rate: {:.2}%",
            f64::from(tally.won) * 100.0 / f64::from(played)
        );
        println!(
            "avg safe cells revealed: {:.1} of {}",
            tally.revealed as f64 / f64::from(played),
            config.safe_cell_count()
        );
        println!(
            "avg reveals per game: {:.1}",
            tally.moves as f64 / f64::from(played)
        );
    }
    log::debug!("{:?}", tally);
    Ok(())
}
