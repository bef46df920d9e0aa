//! Game state module - the orientation-aware state machine
//!
//! Ties together the grid, the active piece, scoring, the RNG, and the power-up overlay.
//! Two entry points mutate state: [`GameState::tick`] for gravity and
//! [`GameState::apply_action`] for player input. Both run to completion before returning.
//!
//! Every lock runs the same sequence:
//!
//! 1. write the piece into the grid
//! 2. clear full lines along the current gravity axis and score them
//! 3. check the spawn edge for game over
//! 4. rotate the board and advance the orientation
//! 5. spawn the next piece, then maybe a power-up

use crate::config::{GameConfig, PowerUpSelection};
use crate::grid::Grid;
use crate::piece::{Block, Piece};
use crate::power_up::{find_power_up_cell, PowerUp};
use crate::rng::SimpleRng;
use crate::save::SavedGame;
use crate::scoring::{drop_points, level_for_score, line_clear_points};
use crate::shapes::shape_bounds;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PowerUpSnapshot};
use crate::types::*;

/// Where the state machine currently is.
///
/// Between calls only `Spawning` (before `start`), `Falling`, and `GameOver` are
/// observable; the others are passed through inside a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    LineClearing,
    BoardRotating,
    GameOver,
}

/// Restoring a save failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("grid {width}x{height} is outside {min}..={max} per side")]
    Dimensions {
        width: u16,
        height: u16,
        min: u16,
        max: u16,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    power_up: Option<PowerUp>,
    rng: SimpleRng,
    orientation: Orientation,
    phase: Phase,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    pieces_locked: u32,
    /// Hard drop points waiting to be reported by the next lock event.
    pending_drop_points: u32,
    last_event: Option<CoreLastEvent>,
    power_up_event: Option<PowerUpEvent>,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game; call [`start`](Self::start) to spawn the first piece.
    pub fn new(config: GameConfig) -> Self {
        let (width, height) = config.grid_size();
        Self {
            config,
            grid: Grid::new(width, height),
            active: None,
            power_up: None,
            rng: SimpleRng::new(config.seed),
            orientation: Orientation::Down,
            phase: Phase::Spawning,
            piece_id: 0,
            pieces_locked: 0,
            pending_drop_points: 0,
            last_event: None,
            power_up_event: None,
            score: 0,
            level: 1,
            lines: 0,
            paused: false,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for tests and tools. Callers must keep the active piece off
    /// locked cells.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn power_up(&self) -> Option<&PowerUp> {
        self.power_up.as_ref()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    /// Take and clear the last power-up lifecycle event.
    pub fn take_power_up_event(&mut self) -> Option<PowerUpEvent> {
        self.power_up_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.power_up = self.power_up.as_ref().map(PowerUpSnapshot::from);
        out.orientation = self.orientation;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.level = self.level.max(level_for_score(self.score));
    }

    /// Anchor that puts `shape` `SPAWN_MARGIN` lines in from the spawn edge, centered
    /// on the lateral axis.
    fn spawn_anchor(&self, shape: ShapeKind) -> Block {
        let b = shape_bounds(shape);
        let (w, h) = (self.grid.width() as i16, self.grid.height() as i16);
        let margin = SPAWN_MARGIN as i16;
        let center_col = (w - b.cols() as i16) / 2 - b.min_col;
        let center_row = (h - b.rows() as i16) / 2 - b.min_row;

        match self.orientation {
            Orientation::Down => Block::new(margin - b.min_row, center_col),
            Orientation::Up => Block::new(h - 1 - margin - b.max_row, center_col),
            Orientation::Left => Block::new(center_row, w - 1 - margin - b.max_col),
            Orientation::Right => Block::new(center_row, margin - b.min_col),
        }
    }

    /// Spawn a uniformly chosen piece at the orientation's spawn anchor.
    pub fn spawn_piece(&mut self) {
        let shape = self.rng.next_shape();
        self.spawn_shape(shape);
    }

    /// Spawn a specific shape, replacing any active piece.
    ///
    /// Occupied spawn cells do not prevent the spawn; the overlap ends the game at lock.
    pub fn spawn_shape(&mut self, shape: ShapeKind) {
        self.phase = Phase::Spawning;
        let anchor = self.spawn_anchor(shape);
        self.active = Some(Piece::spawn(shape, anchor));
        self.piece_id = self.piece_id.wrapping_add(1);
        self.phase = Phase::Falling;
    }

    /// Move the active piece one cell in grid direction `direction`.
    ///
    /// A successful move is followed by the power-up collection check and an unscored
    /// check for full lines.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let moved = match self.active.as_mut() {
            Some(piece) => piece.move_by(&self.grid, direction),
            None => false,
        };
        if moved {
            self.after_player_move();
        }
        moved
    }

    fn after_player_move(&mut self) {
        self.check_power_up_collection();
        while let Some(index) = self.grid.find_full_line(self.orientation) {
            self.clear_line_around_piece(index);
            self.lines = self.lines.saturating_add(1);
        }
    }

    /// One step along gravity without locking; +1 point when it moves.
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.move_piece(self.orientation.gravity());
        if moved {
            self.add_score(drop_points(1, false));
        }
        moved
    }

    /// Fall until blocked, then lock. Returns the points awarded for the drop.
    pub fn hard_drop(&mut self) -> u32 {
        let id = self.piece_id;
        let gravity = self.orientation.gravity();
        let mut cells: u32 = 0;

        // Collection may replace the piece mid-drop; stop if that happens.
        while self.piece_id == id && self.move_piece(gravity) {
            cells += 1;
        }

        let points = drop_points(cells, true);
        self.add_score(points);
        if self.piece_id == id && self.active.is_some() {
            self.pending_drop_points = points;
            self.lock_piece();
        }
        points
    }

    /// Rotate the active piece clockwise about its pivot.
    pub fn rotate_piece(&mut self) -> bool {
        let rotated = match self.active.as_mut() {
            Some(piece) => piece.rotate(&self.grid),
            None => false,
        };
        if rotated {
            self.check_power_up_collection();
        }
        rotated
    }

    /// Lock the active piece and run the post-lock sequence.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.phase = Phase::Locking;
        let mut overlapped = false;
        for (row, col) in piece.locations() {
            overlapped |= self.grid.is_occupied(row, col);
            self.grid.set_cell(row, col, piece.color());
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cleared = self.grid.clear_full_lines(self.orientation);
        let line_clear_score = line_clear_points(cleared, self.level);
        if cleared > 0 {
            self.phase = Phase::LineClearing;
            self.lines = self.lines.saturating_add(cleared);
            self.add_score(line_clear_score);
        }

        if overlapped || self.is_game_over() {
            self.enter_game_over();
        } else {
            self.phase = Phase::BoardRotating;
            self.rotate_board();
            self.spawn_piece();
            self.spawn_power_up();
            self.check_power_up_collection();
        }

        self.last_event = Some(CoreLastEvent {
            locked: true,
            lines_cleared: cleared,
            line_clear_score,
            drop_points: std::mem::take(&mut self.pending_drop_points),
            orientation: self.orientation,
            game_over: self.game_over,
        });
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        self.phase = Phase::GameOver;
        self.active = None;
    }

    /// Spawn edge holds a locked cell.
    pub fn is_game_over(&self) -> bool {
        !self.grid.is_edge_clear(self.orientation)
    }

    /// Turn the grid clockwise and advance the orientation. The power-up turns with it.
    pub fn rotate_board(&mut self) {
        let old_height = self.grid.height();
        self.grid.rotate_clockwise();
        if let Some(p) = self.power_up.as_mut() {
            p.rotate_with_board(old_height);
        }
        self.orientation = self.orientation.next();
    }

    /// Try to place a power-up. Returns `true` if one was placed.
    pub fn spawn_power_up(&mut self) -> bool {
        if !self.config.power_ups_enabled || self.power_up.is_some() {
            return false;
        }
        if !self.rng.chance(POWERUP_SPAWN_PERCENT) {
            return false;
        }
        let Some(cell) =
            find_power_up_cell(&self.grid, self.orientation, self.active.as_ref(), &mut self.rng)
        else {
            return false;
        };

        let kind = match self.config.power_ups {
            PowerUpSelection::ClearLineOnly => PowerUpKind::ClearLine,
            PowerUpSelection::Random => {
                PowerUpKind::ALL[self.rng.next_range(PowerUpKind::ALL.len() as u32) as usize]
            }
        };
        self.place_power_up(PowerUp::new(kind, cell.row, cell.col));
        true
    }

    /// Put `power_up` on the board, replacing any active one.
    pub fn place_power_up(&mut self, power_up: PowerUp) {
        self.power_up = Some(power_up);
        self.record_power_up(&power_up, PowerUpOutcome::Spawned);
    }

    fn record_power_up(&mut self, p: &PowerUp, outcome: PowerUpOutcome) {
        self.power_up_event = Some(PowerUpEvent {
            kind: p.kind,
            outcome,
            row: p.row,
            col: p.col,
        });
    }

    /// Collect the power-up if the active piece covers it. Returns `true` on collection.
    pub fn check_power_up_collection(&mut self) -> bool {
        let (Some(p), Some(piece)) = (self.power_up, self.active.as_ref()) else {
            return false;
        };
        if !p.is_collected_by(piece) {
            return false;
        }
        self.power_up = None;
        self.record_power_up(&p, PowerUpOutcome::Collected);

        match p.kind {
            PowerUpKind::ClearLine => {
                if let Some(index) = self
                    .grid
                    .line_from_floor(self.orientation, POWERUP_CLEAR_LINE_DEPTH)
                {
                    self.clear_line_around_piece(index);
                }
            }
            PowerUpKind::ExtraPoints => self.add_score(EXTRA_POINTS_BONUS),
            PowerUpKind::SlowSpeed | PowerUpKind::ExtraLife => {}
        }
        true
    }

    /// Remove a line while a piece is in flight.
    ///
    /// A piece wholly on the spawn side of the line travels with the shifted cells. If the
    /// piece still ends up on a locked cell it is replaced by a fresh spawn.
    fn clear_line_around_piece(&mut self, index: u16) {
        let orientation = self.orientation;
        self.grid.clear_line(orientation, index);

        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let i = index as i16;
        let beyond = piece.blocks().iter().all(|b| match orientation {
            Orientation::Down => b.row < i,
            Orientation::Up => b.row > i,
            Orientation::Left => b.col > i,
            Orientation::Right => b.col < i,
        });
        if beyond {
            piece.shift(orientation.gravity());
        }
        if !piece.fits(&self.grid) {
            self.spawn_piece();
        }
    }

    /// Advance one time step.
    ///
    /// Returns `false` when nothing ran (not started, paused, or over).
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        if self.is_game_over() {
            self.enter_game_over();
            return true;
        }

        // Gravity
        match self.active.as_mut() {
            Some(piece) => {
                if !piece.move_by(&self.grid, self.orientation.gravity()) {
                    self.lock_piece();
                }
            }
            None => self.spawn_piece(),
        }

        // Power-up lifetime
        if let Some(mut p) = self.power_up {
            if p.advance() {
                self.power_up = None;
                self.record_power_up(&p, PowerUpOutcome::Expired);
            } else {
                self.power_up = Some(p);
            }
        }

        self.check_power_up_collection();
        true
    }

    /// Apply a game action. Returns `true` if it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                return true;
            }
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                return true;
            }
            _ => {}
        }

        if self.paused || self.game_over || !self.started {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.move_piece(self.orientation.lateral_left()),
            GameAction::MoveRight => self.move_piece(self.orientation.lateral_right()),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Rotate => self.rotate_piece(),
            GameAction::RotateBoard => {
                self.active = None;
                self.rotate_board();
                self.spawn_piece();
                self.check_power_up_collection();
                true
            }
            GameAction::Pause | GameAction::Restart => false,
        }
    }

    /// Fresh board with the configured size. The RNG keeps its stream.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        let piece_id = self.piece_id;
        *self = Self::new(self.config);
        self.rng = rng;
        self.piece_id = piece_id;
        self.start();
    }

    /// Persistable view of the current game
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            score: self.score,
            level: self.level,
            orientation: self.orientation,
            grid: self.grid.clone(),
        }
    }

    /// Replace grid, score, level and orientation from a save and spawn a fresh piece.
    pub fn restore(&mut self, saved: SavedGame) -> Result<(), RestoreError> {
        let (width, height) = (saved.grid.width(), saved.grid.height());
        let range = MIN_GRID_DIM..=MAX_GRID_DIM;
        if !range.contains(&width) || !range.contains(&height) {
            return Err(RestoreError::Dimensions {
                width,
                height,
                min: MIN_GRID_DIM,
                max: MAX_GRID_DIM,
            });
        }

        self.grid = saved.grid;
        self.score = saved.score;
        self.level = saved.level.max(level_for_score(saved.score));
        self.orientation = saved.orientation;
        self.active = None;
        self.power_up = None;
        self.paused = false;
        self.game_over = false;
        self.last_event = None;
        self.power_up_event = None;
        self.pending_drop_points = 0;
        self.started = true;
        self.spawn_piece();
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_game() -> GameState {
        GameState::new(GameConfig::default().with_seed(7).without_power_ups())
    }

    fn started_with(shape: ShapeKind) -> GameState {
        let mut game = quiet_game();
        game.start();
        game.spawn_shape(shape);
        game
    }

    fn active_cells(game: &GameState) -> Vec<(i16, i16)> {
        game.active().map(|p| p.locations().collect()).unwrap_or_default()
    }

    #[test]
    fn test_new_game_state() {
        let game = quiet_game();
        assert!(!game.started());
        assert_eq!(game.phase(), Phase::Spawning);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.orientation(), Orientation::Down);
        assert!(game.active().is_none());
        assert_eq!((game.grid().width(), game.grid().height()), (12, 22));
    }

    #[test]
    fn test_start_spawns_piece() {
        let mut game = quiet_game();
        game.start();
        assert!(game.active().is_some());
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.piece_id(), 1);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let mut game = quiet_game();
        assert!(!game.tick());
    }

    #[test]
    fn test_spawn_anchor_per_orientation() {
        let mut game = started_with(ShapeKind::Bar3);
        assert_eq!(active_cells(&game), vec![(3, 4), (3, 5), (3, 6)]);

        game.orientation = Orientation::Up;
        game.spawn_shape(ShapeKind::Bar3);
        assert_eq!(active_cells(&game), vec![(18, 4), (18, 5), (18, 6)]);

        game.grid = Grid::new(22, 12);
        game.orientation = Orientation::Left;
        game.spawn_shape(ShapeKind::Bar3);
        assert_eq!(active_cells(&game), vec![(5, 16), (5, 17), (5, 18)]);

        game.orientation = Orientation::Right;
        game.spawn_shape(ShapeKind::Bar3);
        assert_eq!(active_cells(&game), vec![(5, 3), (5, 4), (5, 5)]);
    }

    #[test]
    fn test_every_shape_spawns_in_bounds() {
        let mut game = quiet_game();
        game.start();
        for orientation in Orientation::CYCLE {
            game.orientation = orientation;
            for kind in ShapeKind::ALL {
                game.spawn_shape(kind);
                let piece = game.active().unwrap();
                assert!(piece.fits(game.grid()), "{:?} {:?}", orientation, kind);
            }
            game.grid.rotate_clockwise();
        }
    }

    #[test]
    fn test_gravity_follows_orientation() {
        let mut game = started_with(ShapeKind::Bar1);
        game.tick();
        assert_eq!(active_cells(&game), vec![(4, 5)]);

        game.orientation = Orientation::Up;
        game.tick();
        assert_eq!(active_cells(&game), vec![(3, 5)]);

        game.orientation = Orientation::Left;
        game.tick();
        assert_eq!(active_cells(&game), vec![(3, 4)]);

        game.orientation = Orientation::Right;
        game.tick();
        assert_eq!(active_cells(&game), vec![(3, 5)]);
    }

    #[test]
    fn test_bar3_locks_on_nineteenth_tick() {
        let mut game = started_with(ShapeKind::Bar3);
        for _ in 0..18 {
            game.tick();
        }
        assert_eq!(active_cells(&game), vec![(21, 4), (21, 5), (21, 6)]);
        assert_eq!(game.pieces_locked(), 0);

        game.tick();
        assert_eq!(game.pieces_locked(), 1);
        assert!(!game.game_over());
        assert_eq!(game.orientation(), Orientation::Left);
        assert_eq!((game.grid().width(), game.grid().height()), (22, 12));
        // Old bottom row is now the left column.
        assert!(game.grid().is_occupied(4, 0));
        assert!(game.grid().is_occupied(5, 0));
        assert!(game.grid().is_occupied(6, 0));

        let ev = game.take_last_event().unwrap();
        assert!(ev.locked);
        assert_eq!(ev.lines_cleared, 0);
        assert_eq!(ev.orientation, Orientation::Left);
        assert!(game.take_last_event().is_none());
    }

    #[test]
    fn test_lateral_moves_are_gravity_relative() {
        let mut game = started_with(ShapeKind::Bar1);
        assert!(game.apply_action(GameAction::MoveLeft));
        assert_eq!(active_cells(&game), vec![(3, 4)]);

        game.orientation = Orientation::Left;
        assert!(game.apply_action(GameAction::MoveLeft));
        assert_eq!(active_cells(&game), vec![(2, 4)]);
        assert!(game.apply_action(GameAction::MoveRight));
        assert_eq!(active_cells(&game), vec![(3, 4)]);
    }

    #[test]
    fn test_soft_drop_scores_and_never_locks() {
        let mut game = started_with(ShapeKind::Bar1);
        assert!(game.apply_action(GameAction::SoftDrop));
        assert_eq!(game.score(), 1);

        let mut steps = 1;
        while game.apply_action(GameAction::SoftDrop) {
            steps += 1;
        }
        assert_eq!(steps, 18);
        assert_eq!(game.score(), 18);
        assert_eq!(game.pieces_locked(), 0);
        assert!(game.active().is_some());
    }

    #[test]
    fn test_hard_drop_scores_two_per_cell_and_locks() {
        let mut game = started_with(ShapeKind::Bar3);
        let id = game.piece_id();
        assert!(game.apply_action(GameAction::HardDrop));
        assert_eq!(game.score(), 36);
        assert_eq!(game.pieces_locked(), 1);
        assert_ne!(game.piece_id(), id);
        let ev = game.take_last_event().unwrap();
        assert_eq!(ev.drop_points, 36);
    }

    #[test]
    fn test_lock_clears_row_and_scores() {
        let mut game = started_with(ShapeKind::Bar1);
        for col in 0..12 {
            if col != 5 {
                game.grid_mut().set_cell(21, col, BubbleColor::Navy);
            }
        }
        game.grid_mut().set_cell(20, 0, BubbleColor::Pink);
        game.hard_drop();

        assert_eq!(game.lines(), 1);
        assert_eq!(game.score(), 36 + 100);
        let ev = game.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.line_clear_score, 100);
        // Only the shifted Pink cell is left, now on the left column after rotation.
        assert_eq!(game.grid().occupied_count(), 1);
        assert_eq!(game.grid().get(0, 0), Some(Some(BubbleColor::Pink)));
    }

    #[test]
    fn test_line_score_uses_level_before_clear() {
        let mut game = started_with(ShapeKind::Bar1);
        game.score = 2950;
        game.level = 3;
        for col in 0..12 {
            if col != 5 {
                game.grid_mut().set_cell(21, col, BubbleColor::Navy);
            }
        }
        game.hard_drop();
        assert_eq!(game.score(), 2950 + 36 + 300);
        assert_eq!(game.level(), 4);
    }

    #[test]
    fn test_lock_on_spawn_edge_ends_game() {
        let mut game = started_with(ShapeKind::Bar3);
        for row in 1..22 {
            game.grid_mut().set_cell(row, 5, BubbleColor::Navy);
        }
        game.active = Some(Piece::spawn(ShapeKind::Bar1, Block::new(0, 5)));
        game.tick();
        assert!(game.game_over());
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.active().is_none());
        assert!(game.take_last_event().unwrap().game_over);

        // Nothing moves after game over.
        assert!(!game.tick());
        assert!(!game.apply_action(GameAction::MoveLeft));
    }

    #[test]
    fn test_lock_onto_occupied_spawn_ends_game() {
        let mut game = started_with(ShapeKind::Bar3);
        for row in 3..22 {
            for col in 0..11 {
                game.grid_mut().set_cell(row, col, BubbleColor::Navy);
            }
        }
        game.spawn_shape(ShapeKind::Bar3);
        game.tick();
        assert!(game.game_over());
    }

    #[test]
    fn test_pause_blocks_tick_and_input() {
        let mut game = started_with(ShapeKind::Bar1);
        assert!(game.apply_action(GameAction::Pause));
        assert!(game.paused());
        let before = active_cells(&game);
        assert!(!game.tick());
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert_eq!(active_cells(&game), before);

        assert!(game.apply_action(GameAction::Pause));
        assert!(!game.paused());
        assert!(game.tick());
    }

    #[test]
    fn test_rotate_board_action_discards_piece() {
        let mut game = started_with(ShapeKind::Bar3);
        let id = game.piece_id();
        game.grid_mut().set_cell(21, 0, BubbleColor::Pink);

        assert!(game.apply_action(GameAction::RotateBoard));
        assert_eq!(game.orientation(), Orientation::Left);
        assert_eq!(game.piece_id(), id + 1);
        assert_eq!(game.grid().occupied_count(), 1);
        assert!(game.grid().is_occupied(0, 0));
        assert_eq!(game.score(), 0);
        assert_eq!(game.pieces_locked(), 0);
    }

    #[test]
    fn test_rotate_is_single_fixed_transform() {
        let mut game = started_with(ShapeKind::V3);
        let mut twin = game.clone();
        assert!(game.apply_action(GameAction::Rotate));
        assert!(twin.rotate_piece());
        assert_eq!(active_cells(&game), active_cells(&twin));
        assert_eq!(active_cells(&game), vec![(2, 6), (3, 6), (3, 5)]);
    }

    #[test]
    fn test_restart_resets_board_and_keeps_rng_moving() {
        let mut game = started_with(ShapeKind::Bar1);
        game.hard_drop();
        game.apply_action(GameAction::Pause);
        assert!(game.apply_action(GameAction::Restart));

        assert!(!game.paused());
        assert_eq!(game.score(), 0);
        assert_eq!(game.orientation(), Orientation::Down);
        assert_eq!(game.grid().occupied_count(), 0);
        assert_eq!((game.grid().width(), game.grid().height()), (12, 22));
        assert!(game.active().is_some());
    }

    #[test]
    fn test_power_up_expires_after_lifetime() {
        let mut game = started_with(ShapeKind::Bar1);
        game.place_power_up(PowerUp::new(PowerUpKind::ExtraPoints, 10, 0));
        assert_eq!(
            game.take_power_up_event().map(|e| e.outcome),
            Some(PowerUpOutcome::Spawned)
        );

        // Keep the piece hovering by pushing it back up each tick.
        for _ in 0..POWERUP_LIFETIME_TICKS - 1 {
            game.tick();
            game.active = Some(Piece::spawn(ShapeKind::Bar1, Block::new(3, 5)));
            assert!(game.power_up().is_some());
        }
        game.tick();
        assert!(game.power_up().is_none());
        let ev = game.take_power_up_event().unwrap();
        assert_eq!(ev.outcome, PowerUpOutcome::Expired);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_extra_points_collected_by_move() {
        let mut game = started_with(ShapeKind::Bar1);
        game.place_power_up(PowerUp::new(PowerUpKind::ExtraPoints, 3, 4));
        assert!(game.apply_action(GameAction::MoveLeft));
        assert!(game.power_up().is_none());
        assert_eq!(game.score(), EXTRA_POINTS_BONUS);
        assert_eq!(
            game.take_power_up_event().map(|e| e.outcome),
            Some(PowerUpOutcome::Collected)
        );
    }

    #[test]
    fn test_clear_line_power_up_removes_fixed_row() {
        let mut game = started_with(ShapeKind::Bar1);
        game.grid_mut().set_cell(19, 2, BubbleColor::Navy);
        game.grid_mut().set_cell(18, 7, BubbleColor::Coral);
        game.grid_mut().set_cell(21, 1, BubbleColor::Pink);
        game.place_power_up(PowerUp::new(PowerUpKind::ClearLine, 4, 5));

        assert!(game.tick());
        assert!(game.power_up().is_none());
        // Row 19 removed, rows above shifted down, row 21 untouched.
        assert!(game.grid().is_empty(19, 2));
        assert!(game.grid().is_occupied(19, 7));
        assert!(game.grid().is_occupied(21, 1));
        assert_eq!(game.lines(), 0);
        assert_eq!(game.score(), 0);
        // The piece was above the line and moved with the shift.
        assert_eq!(active_cells(&game), vec![(5, 5)]);
    }

    #[test]
    fn test_power_ups_spawn_after_lock_when_enabled() {
        let mut game = GameState::new(GameConfig::default().with_seed(11));
        game.start();
        let mut spawned = 0;
        for _ in 0..10 {
            game.power_up = None;
            game.hard_drop();
            if game.game_over() {
                break;
            }
            if let Some(p) = game.power_up() {
                spawned += 1;
                assert!(game.grid().is_empty(p.row, p.col));
            }
        }
        assert!(spawned > 0);
    }

    #[test]
    fn test_clear_line_only_selection() {
        let config = GameConfig::default()
            .with_seed(5)
            .with_power_ups(PowerUpSelection::ClearLineOnly);
        let mut game = GameState::new(config);
        game.start();
        for _ in 0..20 {
            game.power_up = None;
            if game.spawn_power_up() {
                assert_eq!(game.power_up().unwrap().kind, PowerUpKind::ClearLine);
            }
        }
    }

    #[test]
    fn test_disabled_power_ups_never_spawn() {
        let mut game = started_with(ShapeKind::Bar1);
        for _ in 0..20 {
            assert!(!game.spawn_power_up());
        }
    }

    #[test]
    fn test_restore_rejects_bad_dimensions() {
        let mut game = quiet_game();
        let saved = SavedGame {
            score: 0,
            level: 1,
            orientation: Orientation::Down,
            grid: Grid::new(3, 3),
        };
        assert!(matches!(
            game.restore(saved),
            Err(RestoreError::Dimensions { width: 3, height: 3, .. })
        ));
    }

    #[test]
    fn test_restore_replaces_state_and_spawns() {
        let mut game = started_with(ShapeKind::Bar1);
        game.place_power_up(PowerUp::new(PowerUpKind::ClearLine, 10, 3));
        let mut grid = Grid::new(22, 12);
        grid.set_cell(4, 0, BubbleColor::Sky);
        let saved = SavedGame {
            score: 2500,
            level: 3,
            orientation: Orientation::Left,
            grid,
        };

        game.restore(saved.clone()).unwrap();
        assert_eq!(game.score(), 2500);
        assert_eq!(game.level(), 3);
        assert_eq!(game.orientation(), Orientation::Left);
        assert!(game.power_up().is_none());
        assert!(game.active().is_some());
        assert_eq!(game.to_saved(), saved);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = started_with(ShapeKind::Bar2);
        game.grid_mut().set_cell(21, 0, BubbleColor::Pink);
        let s = game.snapshot();
        assert_eq!((s.width, s.height), (12, 22));
        assert_eq!(s.cell(21, 0), Some(BubbleColor::Pink));
        let active = s.active.as_ref().unwrap();
        assert_eq!(active.shape, ShapeKind::Bar2);
        assert_eq!(s.phase, Phase::Falling);

        let mut reused = GameSnapshot::default();
        game.snapshot_into(&mut reused);
        assert_eq!(reused, s);
    }
}
