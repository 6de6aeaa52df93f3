//! A single player snake on a square grid.
//!
//! [GridSnakeEngine] owns the body, heading, food, score and alive flag, and
//! advances exactly one cell per call to [GridSnakeEngine::step]. When to call
//! `step` is up to the caller, see [crate::driver::Ticker].
//!
//! The body is stored head first.

pub mod config;
pub mod food;

use fxhash::FxHashSet;
use rand::seq::IteratorRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument, trace};

use crate::error::EngineError;
use crate::types::{
    Cell, Direction, OverDeterminableGame, SizeDeterminableGame, SnakeBodyGettableGame,
    TurnDeterminableGame,
};
pub use config::{Difficulty, SnakeConfig};
pub use food::place_food;

/// What ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// the head left the board
    Wall,
    /// the head ran into the body
    SelfCollision,
}

/// Result of a single successful call to [GridSnakeEngine::step]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// the snake moved onto `head`, growing by one when it ate food
    Moved {
        #[allow(missing_docs)]
        head: Cell,
        #[allow(missing_docs)]
        grew: bool,
    },
    /// the move collided, the engine is now terminal
    GameOver {
        #[allow(missing_docs)]
        score: u32,
        #[allow(missing_docs)]
        collision: CollisionKind,
    },
}

/// Read only snapshot of a [GridSnakeEngine]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    /// body cells, head first
    pub body: Vec<Cell>,
    #[allow(missing_docs)]
    pub food: Cell,
    #[allow(missing_docs)]
    pub score: u32,
    #[allow(missing_docs)]
    pub alive: bool,
    #[allow(missing_docs)]
    pub heading: Direction,
    /// number of successful moves so far
    pub turn: u64,
}

/// The snake game state machine
#[derive(Debug, Clone)]
pub struct GridSnakeEngine {
    config: SnakeConfig,
    body: VecDeque<Cell>,
    heading: Direction,
    food: Cell,
    score: u32,
    alive: bool,
    turn: u64,
    rng: SmallRng,
}

fn rng_for(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

impl GridSnakeEngine {
    /// Create an engine from a config, placing the first food at random
    pub fn new(config: SnakeConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = rng_for(config.seed);
        let occupied: FxHashSet<Cell> = config.initial_body.iter().copied().collect();
        let food = place_food(config.grid_size, &occupied, &mut rng)?;

        Ok(GridSnakeEngine {
            body: config.initial_body.iter().copied().collect(),
            heading: config.initial_heading,
            food,
            score: 0,
            alive: true,
            turn: 0,
            rng,
            config,
        })
    }

    /// Create an engine from a fully specified position. Useful for replays and tests
    /// where the food cell has to be known up front.
    pub fn from_parts(
        grid_size: u32,
        body: Vec<Cell>,
        heading: Direction,
        food: Cell,
    ) -> Result<Self, EngineError> {
        config::validate_body(grid_size, &body)?;
        if !food.in_bounds(grid_size) {
            return Err(EngineError::InvalidInput(format!(
                "food {} is outside a {}x{} board",
                food, grid_size, grid_size
            )));
        }
        if body.contains(&food) {
            return Err(EngineError::InvalidInput(format!(
                "food {} is on the snake body",
                food
            )));
        }

        let config = SnakeConfig {
            grid_size,
            initial_body: body,
            initial_heading: heading,
            ..Default::default()
        };
        Ok(GridSnakeEngine {
            body: config.initial_body.iter().copied().collect(),
            heading,
            food,
            score: 0,
            alive: true,
            turn: 0,
            rng: rng_for(None),
            config,
        })
    }

    /// reseed the food placement rng
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Put the snake back at its configured start with a fresh food cell and zero
    /// score. Works whether or not the previous game is over.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let occupied: FxHashSet<Cell> = self.config.initial_body.iter().copied().collect();
        self.food = place_food(self.config.grid_size, &occupied, &mut self.rng)?;
        self.body = self.config.initial_body.iter().copied().collect();
        self.heading = self.config.initial_heading;
        self.score = 0;
        self.alive = true;
        self.turn = 0;
        debug!("snake game restarted");
        Ok(())
    }

    /// Advance the snake one cell.
    ///
    /// A requested heading that is the direct opposite of the current one is
    /// ignored, anything else replaces the heading before the move. Walls are
    /// checked before the body. On a collision the engine becomes terminal and
    /// body and food are left as they were.
    ///
    /// Eating the last free cell's food fills the board: the snake still grows and
    /// scores, the engine becomes terminal and [EngineError::BoardFull] is returned.
    #[instrument(level = "trace", skip_all, fields(turn = self.turn))]
    pub fn step(&mut self, requested: Option<Direction>) -> Result<StepOutcome, EngineError> {
        if !self.alive {
            return Err(EngineError::IllegalState("step called after game over"));
        }

        if let Some(direction) = requested {
            if self.heading.is_not_opposite(&direction) {
                self.heading = direction;
            } else {
                trace!(%direction, heading = %self.heading, "ignoring reversal");
            }
        }

        let new_head = self.head().moved(self.heading);

        if let Some(collision) = self.collision_at(new_head) {
            self.alive = false;
            debug!(?collision, score = self.score, "game over");
            return Ok(StepOutcome::GameOver {
                score: self.score,
                collision,
            });
        }

        self.body.push_front(new_head);
        self.turn += 1;

        if new_head != self.food {
            self.body.pop_back();
            return Ok(StepOutcome::Moved {
                head: new_head,
                grew: false,
            });
        }

        self.score += 1;
        debug!(score = self.score, len = self.body.len(), "ate food");
        let occupied: FxHashSet<Cell> = self.body.iter().copied().collect();
        match place_food(self.config.grid_size, &occupied, &mut self.rng) {
            Ok(food) => {
                self.food = food;
                Ok(StepOutcome::Moved {
                    head: new_head,
                    grew: true,
                })
            }
            Err(e) => {
                self.alive = false;
                Err(e)
            }
        }
    }

    fn collision_at(&self, cell: Cell) -> Option<CollisionKind> {
        if !cell.in_bounds(self.config.grid_size) {
            Some(CollisionKind::Wall)
        } else if self.body.contains(&cell) {
            Some(CollisionKind::SelfCollision)
        } else {
            None
        }
    }

    /// A random heading that neither reverses nor collides on the next step, None
    /// when every option is fatal.
    pub fn random_reasonable_heading(&self, rng: &mut impl Rng) -> Option<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|d| self.heading.is_not_opposite(d))
            .filter(|d| self.collision_at(self.head().moved(*d)).is_none())
            .choose(rng)
    }

    /// snapshot of everything a presentation layer needs to draw the board
    pub fn current_state(&self) -> SnakeState {
        SnakeState {
            body: self.body.iter().copied().collect(),
            food: self.food,
            score: self.score,
            alive: self.alive,
            heading: self.heading,
            turn: self.turn,
        }
    }

    #[allow(missing_docs)]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    #[allow(missing_docs)]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[allow(missing_docs)]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[allow(missing_docs)]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[allow(missing_docs)]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// length of the body
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// always false, a snake has at least a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }
}

impl OverDeterminableGame for GridSnakeEngine {
    fn is_over(&self) -> bool {
        !self.alive
    }
}

impl SizeDeterminableGame for GridSnakeEngine {
    fn get_width(&self) -> u32 {
        self.config.grid_size
    }

    fn get_height(&self) -> u32 {
        self.config.grid_size
    }
}

impl TurnDeterminableGame for GridSnakeEngine {
    fn turn(&self) -> u64 {
        self.turn
    }
}

impl SnakeBodyGettableGame for GridSnakeEngine {
    fn get_snake_body_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_fixture;

    fn cells(cs: &[(i32, i32)]) -> Vec<Cell> {
        cs.iter().copied().map(Cell::from).collect()
    }

    fn assert_consistent(engine: &GridSnakeEngine) {
        let state = engine.current_state();
        let distinct: FxHashSet<Cell> = state.body.iter().copied().collect();
        if state.alive {
            assert_eq!(distinct.len(), state.body.len(), "body overlaps: {:?}", state.body);
            assert!(!state.body.contains(&state.food), "food on body: {:?}", state);
        }
    }

    #[test]
    fn test_default_start() {
        let engine = GridSnakeEngine::new(SnakeConfig::default().seeded(1)).unwrap();
        let state = engine.current_state();
        assert_eq!(state.body, cells(&[(10, 10), (10, 11), (10, 12)]));
        assert_eq!(state.heading, Direction::Left);
        assert_eq!(state.score, 0);
        assert!(state.alive);
        assert!(state.food.in_bounds(20));
        assert!(!state.body.contains(&state.food));
    }

    #[test]
    fn test_wall_collision_on_three_by_three() {
        let mut engine =
            GridSnakeEngine::from_parts(3, cells(&[(1, 1)]), Direction::Right, Cell::new(0, 0))
                .unwrap();
        assert_eq!(
            engine.step(None),
            Ok(StepOutcome::Moved {
                head: Cell::new(1, 2),
                grew: false
            })
        );
        assert_eq!(
            engine.step(None),
            Ok(StepOutcome::GameOver {
                score: 0,
                collision: CollisionKind::Wall
            })
        );
        assert!(engine.is_over());
        // body untouched by the fatal move
        assert_eq!(engine.current_state().body, cells(&[(1, 2)]));
    }

    #[test]
    fn test_step_after_game_over_is_illegal() {
        let mut engine =
            GridSnakeEngine::from_parts(2, cells(&[(0, 0)]), Direction::Up, Cell::new(1, 1))
                .unwrap();
        assert!(matches!(engine.step(None), Ok(StepOutcome::GameOver { .. })));
        assert_eq!(
            engine.step(Some(Direction::Down)),
            Err(EngineError::IllegalState("step called after game over"))
        );
    }

    #[test]
    fn test_from_parts_rejects_bad_food() {
        assert!(matches!(
            GridSnakeEngine::from_parts(1, cells(&[(0, 0)]), Direction::Up, Cell::new(0, 0)),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            GridSnakeEngine::from_parts(3, cells(&[(0, 0)]), Direction::Up, Cell::new(3, 0)),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_oversized_board_is_invalid_input() {
        let config = SnakeConfig {
            grid_size: u32::MAX,
            initial_body: cells(&[(0, 0)]),
            ..Default::default()
        }
        .seeded(3);
        assert!(matches!(
            GridSnakeEngine::new(config),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            GridSnakeEngine::from_parts(
                u32::MAX,
                cells(&[(i32::MAX, 0)]),
                Direction::Down,
                Cell::new(0, 0)
            ),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut engine =
            GridSnakeEngine::from_parts(10, cells(&[(5, 5), (5, 4)]), Direction::Right, Cell::new(0, 0))
                .unwrap();
        let outcome = engine.step(Some(Direction::Left)).unwrap();
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(
            outcome,
            StepOutcome::Moved {
                head: Cell::new(5, 6),
                grew: false
            }
        );
    }

    #[test]
    fn test_turn_changes_heading_before_move() {
        let mut engine =
            GridSnakeEngine::from_parts(10, cells(&[(5, 5), (5, 4)]), Direction::Right, Cell::new(0, 0))
                .unwrap();
        engine.step(Some(Direction::Up)).unwrap();
        assert_eq!(engine.heading(), Direction::Up);
        assert_eq!(engine.current_state().body, cells(&[(4, 5), (5, 5)]));
    }

    #[test]
    fn test_eating_grows_and_moves_food() {
        let mut engine =
            GridSnakeEngine::from_parts(10, cells(&[(5, 5), (5, 6)]), Direction::Left, Cell::new(5, 4))
                .unwrap();
        engine.reseed(3);
        let before = engine.len();
        let outcome = engine.step(None).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Moved {
                head: Cell::new(5, 4),
                grew: true
            }
        );
        assert_eq!(engine.len(), before + 1);
        assert_eq!(engine.score(), 1);
        assert_ne!(engine.food(), Cell::new(5, 4));
        assert_consistent(&engine);
    }

    #[test]
    fn test_self_collision() {
        // a U shape whose head turns into its own body
        let body = cells(&[(1, 1), (1, 2), (2, 2), (2, 1), (2, 0)]);
        let mut engine =
            GridSnakeEngine::from_parts(4, body.clone(), Direction::Up, Cell::new(3, 3)).unwrap();
        let outcome = engine.step(Some(Direction::Right)).unwrap();
        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                score: 0,
                collision: CollisionKind::SelfCollision
            }
        );
        assert_eq!(engine.current_state().body, body);
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        // the whole body counts, including the tail that would move away
        let body = cells(&[(0, 0), (0, 1), (1, 1), (1, 0)]);
        let mut engine =
            GridSnakeEngine::from_parts(3, body, Direction::Down, Cell::new(2, 2)).unwrap();
        assert_eq!(
            engine.step(None).unwrap(),
            StepOutcome::GameOver {
                score: 0,
                collision: CollisionKind::SelfCollision
            }
        );
    }

    #[test]
    fn test_filling_the_board_reports_board_full() {
        let mut engine =
            GridSnakeEngine::from_parts(2, cells(&[(0, 0), (0, 1), (1, 1)]), Direction::Left, Cell::new(1, 0))
                .unwrap();
        assert_eq!(engine.step(Some(Direction::Down)), Err(EngineError::BoardFull));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.len(), 4);
        assert!(!engine.is_alive());
    }

    #[test]
    fn test_growth_law_and_invariants_over_random_play() {
        let mut engine = GridSnakeEngine::new(SnakeConfig::with_grid_size(6).seeded(11)).unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..500 {
            if engine.is_over() {
                engine.restart().unwrap();
            }
            let before = engine.len();
            let request = {
                use rand::seq::SliceRandom;
                Direction::all().choose(&mut rng).copied()
            };
            match engine.step(request) {
                Ok(StepOutcome::Moved { grew: true, .. }) => assert_eq!(engine.len(), before + 1),
                Ok(StepOutcome::Moved { grew: false, .. }) => assert_eq!(engine.len(), before),
                Ok(StepOutcome::GameOver { .. }) => assert_eq!(engine.len(), before),
                Err(EngineError::BoardFull) => assert_eq!(engine.len(), before + 1),
                Err(e) => panic!("unexpected error {}", e),
            }
            assert_consistent(&engine);
        }
    }

    #[test]
    fn test_random_reasonable_heading() {
        let mut rng = SmallRng::seed_from_u64(1);
        // boxed into the top left corner: only Down is safe
        let engine =
            GridSnakeEngine::from_parts(3, cells(&[(0, 0), (0, 1)]), Direction::Left, Cell::new(2, 2))
                .unwrap();
        for _ in 0..20 {
            assert_eq!(engine.random_reasonable_heading(&mut rng), Some(Direction::Down));
        }

        let trapped =
            GridSnakeEngine::from_parts(2, cells(&[(0, 0), (1, 0), (1, 1), (0, 1)]), Direction::Down, Cell::new(0, 0));
        // food may not sit on the body
        assert!(trapped.is_err());

        let trapped =
            GridSnakeEngine::from_parts(2, cells(&[(0, 0), (1, 0), (1, 1)]), Direction::Up, Cell::new(0, 1))
                .unwrap();
        // Right leads onto the food, everything else is fatal
        assert_eq!(trapped.random_reasonable_heading(&mut rng), Some(Direction::Right));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut engine = GridSnakeEngine::new(SnakeConfig::default().seeded(2)).unwrap();
        while engine.is_alive() {
            engine.step(Some(Direction::Up)).unwrap();
        }
        engine.restart().unwrap();
        let state = engine.current_state();
        assert!(state.alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.turn, 0);
        assert_eq!(state.heading, Direction::Left);
        assert_eq!(state.body, SnakeConfig::default().initial_body);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let config = config_fixture(include_str!("../../fixtures/small_board.json")).unwrap();
        let mut a = GridSnakeEngine::new(config.clone()).unwrap();
        let mut b = GridSnakeEngine::new(config).unwrap();
        for d in [Direction::Up, Direction::Left, Direction::Down, Direction::Down] {
            let _ = a.step(Some(d));
            let _ = b.step(Some(d));
        }
        assert_eq!(a.current_state(), b.current_state());
    }

    #[test]
    fn test_capability_traits() {
        let engine = GridSnakeEngine::new(SnakeConfig::with_grid_size(7).seeded(0)).unwrap();
        assert_eq!(engine.get_width(), 7);
        assert_eq!(engine.get_height(), 7);
        assert_eq!(engine.turn(), 0);
        assert_eq!(engine.get_snake_body_vec(), vec![Cell::new(3, 3)]);
        assert!(!engine.is_over());
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine =
            GridSnakeEngine::from_parts(5, cells(&[(2, 2)]), Direction::Up, Cell::new(0, 0)).unwrap();
        let json = serde_json::to_value(engine.current_state()).unwrap();
        assert_eq!(json["heading"], "UP");
        assert_eq!(json["food"]["row"], 0);
        assert_eq!(json["alive"], true);
    }
}
