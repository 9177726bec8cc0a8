// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot turns each request into one run of the move filter pipeline.
// It keeps nothing between turns: every call rebuilds occupancy and its own RNG.
// For more info see docs.battlesnake.com

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::geometry::InvalidMoveError;
use crate::pipeline::{MoveDecision, MovePipeline};
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every decision to the given debug log
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": "1",
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes, you={})",
            game.id,
            board.width,
            board.height,
            board.snakes.len(),
            you.id
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) {
        let survived = board.snakes.iter().any(|s| s.id == you.id);
        info!(
            "GAME OVER {} after {} turns ({})",
            game.id,
            turn,
            if survived { "alive" } else { "eliminated" }
        );
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `_game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    ///
    /// # Errors
    /// Propagates `InvalidMoveError`, which only a pipeline bug can produce.
    pub fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Result<Value, InvalidMoveError> {
        let start_time = Instant::now();

        let decision = self.decide(board, you).map_err(|e| {
            error!("Turn {}: {}", turn, e);
            e
        })?;

        if decision.forced {
            warn!("Turn {}: trapped, forced {}", turn, decision.direction.as_str());
        }

        info!(
            "Turn {}: Chose {} (options: {:?}, cavern: {}, health: {}, time: {}us)",
            turn,
            decision.direction.as_str(),
            decision.options.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
            decision.cavern_max,
            you.health,
            start_time.elapsed().as_micros()
        );

        self.debug_logger.log_move(*turn, &you.id, board.clone(), &decision);

        Ok(json!({
            "move": decision.direction.as_str(),
            "shout": self.config.appearance.shout,
        }))
    }

    /// Runs the pipeline with a fresh RNG for this turn
    pub fn decide(&self, board: &Board, you: &Battlesnake) -> Result<MoveDecision, InvalidMoveError> {
        let mut rng = self.turn_rng();
        MovePipeline::new(&self.config.pipeline).decide(board, you, &mut rng)
    }

    /// Seeded when configured, so identical snapshots give identical moves
    fn turn_rng(&self) -> StdRng {
        match self.config.randomness.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
