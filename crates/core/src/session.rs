//! Session module - the game state machine
//!
//! Ties the grid, bag, movement rules and line resolver together:
//!
//! ```text
//! Spawning -> Falling -> Locking -> (Clearing) -> Spawning
//!                 ^          |
//!                 +-- nudge -+          any -> GameOver (absorbing)
//! ```
//!
//! `paused` is orthogonal to the phase and freezes everything except
//! `toggle_pause`. All time is logical: the caller passes elapsed milliseconds
//! to [`Session::tick`] or triggers gravity directly with
//! [`Session::advance_gravity_tick`].

use log::{debug, info, trace};

use crate::bag::BagQueue;
use crate::catalog::Shape;
use crate::config::SessionConfig;
use crate::grid::Grid;
use crate::lines::{self, LineClear, Progress};
use crate::movement::{self, ActivePiece};
use crate::snapshot::SessionSnapshot;
use crate::types::{Direction, GameAction, PieceKind, NEXT_PREVIEW, VISIBLE_ROWS};

/// Where the state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Between pieces (also the phase of a session that has not started)
    #[default]
    Spawning,
    /// The active piece is airborne and gravity moves it
    Falling,
    /// The active piece rests; the lock timer is running
    Locking,
    /// A locked piece is being resolved against full rows
    Clearing,
    /// Terminal
    GameOver,
}

/// What happened when a piece was committed to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub clear: LineClear,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    can_hold: bool,
    bag: BagQueue,
    progress: Progress,
    phase: Phase,
    paused: bool,
    started: bool,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u8,
    pieces_spawned: u32,
    /// Last lock event (consumed by observers).
    last_lock: Option<LockEvent>,
}

impl Session {
    /// Create a session with an empty grid. Call [`Session::start`] to spawn
    /// the first piece.
    pub fn new(config: SessionConfig) -> Self {
        Self::from_grid(config, Grid::new())
    }

    /// Create a session on top of a prepared stack.
    pub fn from_grid(config: SessionConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            active: None,
            hold: None,
            can_hold: true,
            bag: BagQueue::new(config.seed),
            progress: Progress::new(),
            phase: Phase::Spawning,
            paused: false,
            started: false,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            pieces_spawned: 0,
            last_lock: None,
        }
    }

    /// Spawn the first piece. Does nothing on a session that already started.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        debug!("session started (seed {})", self.config.seed);
        self.spawn_next();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    /// Upcoming pieces, next one first.
    pub fn next_queue(&self) -> [PieceKind; NEXT_PREVIEW] {
        self.bag.preview()
    }

    /// Current gravity interval, derived from the level.
    pub fn gravity_interval_ms(&self) -> u32 {
        self.config.gravity_interval_ms(self.progress.level)
    }

    /// Where the active piece would land. `None` without an active piece.
    pub fn ghost(&self) -> Option<Shape> {
        self.active
            .as_ref()
            .map(|piece| movement::ghost_shape(&self.grid, &piece.shape))
    }

    /// Whether the active piece is resting on the floor or the stack.
    pub fn is_grounded(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|piece| movement::can_settle_below(&self.grid, &piece.shape))
    }

    pub fn last_lock(&self) -> Option<&LockEvent> {
        self.last_lock.as_ref()
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.grid.clone_from(&self.grid);
        out.active = self.active;
        out.ghost = self.ghost();
        out.hold = self.hold;
        out.next_queue = self.next_queue();
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.phase = self.phase;
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(Direction::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(Direction::Right)
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let (grid, piece) = self.grid_and_piece();
        let rotated = movement::rotate_clockwise(grid, piece);
        if rotated {
            self.after_nudge();
        } else {
            trace!("rotation rejected");
        }
        rotated
    }

    /// One player-requested step down. Returns true if the piece moved or the
    /// session entered `Locking` because it could not.
    pub fn soft_drop_tick(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.step_down()
    }

    /// One gravity step, independent of the gravity timer.
    pub fn advance_gravity_tick(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.drop_timer_ms = 0;
        self.step_down()
    }

    /// Drop to the resting position and lock at once.
    pub fn hard_drop(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let (grid, piece) = self.grid_and_piece();
        let mut distance = 0u32;
        while movement::move_down(grid, piece) {
            distance += 1;
        }
        debug_assert!(movement::can_settle_below(grid, &piece.shape));
        trace!("hard drop fell {distance} rows");

        self.enter_locking();
        self.lock_active();
        true
    }

    /// Stash the active piece, or swap it with the stashed one.
    ///
    /// Allowed once per piece; the right comes back with the next spawn after
    /// a lock.
    pub fn hold(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if !self.can_hold {
            trace!("hold rejected: already used for this piece");
            return false;
        }

        let current = self.take_active();
        movement::erase(&mut self.grid, &current.shape);
        self.phase = Phase::Spawning;

        match self.hold.replace(current.kind) {
            None => {
                debug!("holding {:?}", current.kind);
                self.spawn_next();
            }
            Some(held) => {
                debug!("swapping {:?} for held {:?}", current.kind, held);
                self.spawn_kind(held);
            }
        }

        self.can_hold = false;
        true
    }

    /// Flip the pause flag. A finished session cannot be paused.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over() {
            return false;
        }
        self.paused = !self.paused;
        debug!("paused = {}", self.paused);
        true
    }

    /// Advance the gravity or lock timer by `elapsed_ms`.
    ///
    /// Returns true if the piece moved, started resting, or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.accepts_input() {
            return false;
        }

        match self.phase {
            Phase::Falling => {
                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms < self.gravity_interval_ms() {
                    return false;
                }
                self.drop_timer_ms = 0;
                self.step_down()
            }
            Phase::Locking => {
                self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
                if self.lock_timer_ms < self.config.lock_delay_ms {
                    return false;
                }
                self.lock_active();
                true
            }
            _ => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        trace!("action {}", action.as_str());
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop_tick(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_clockwise(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
        }
    }

    /// Gate for every piece-moving command.
    ///
    /// # Panics
    ///
    /// Panics when called before [`Session::start`]: there is no piece to act
    /// on yet.
    fn accepts_input(&self) -> bool {
        assert!(self.started, "session used before start()");
        !self.paused && matches!(self.phase, Phase::Falling | Phase::Locking)
    }

    fn grid_and_piece(&mut self) -> (&mut Grid, &mut ActivePiece) {
        match self.active.as_mut() {
            Some(piece) => (&mut self.grid, piece),
            None => panic!("phase {:?} without an active piece", self.phase),
        }
    }

    fn take_active(&mut self) -> ActivePiece {
        match self.active.take() {
            Some(piece) => piece,
            None => panic!("phase {:?} without an active piece", self.phase),
        }
    }

    fn shift(&mut self, direction: Direction) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let (grid, piece) = self.grid_and_piece();
        let moved = movement::move_horizontal(grid, piece, direction);
        if moved {
            self.after_nudge();
        } else {
            trace!("{direction:?} move rejected");
        }
        moved
    }

    /// Bookkeeping after a successful sideways move or rotation.
    fn after_nudge(&mut self) {
        if self.phase != Phase::Locking {
            return;
        }
        if !self.is_grounded() {
            trace!("nudge freed the piece");
            self.phase = Phase::Falling;
            self.lock_timer_ms = 0;
            self.drop_timer_ms = 0;
        } else if self.lock_resets < self.config.lock_reset_limit {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
    }

    fn step_down(&mut self) -> bool {
        let (grid, piece) = self.grid_and_piece();
        if movement::move_down(grid, piece) {
            if self.phase == Phase::Locking {
                self.phase = Phase::Falling;
                self.lock_timer_ms = 0;
            }
            return true;
        }
        if self.phase == Phase::Falling {
            self.enter_locking();
            return true;
        }
        false
    }

    fn enter_locking(&mut self) {
        if self.phase != Phase::Locking {
            self.phase = Phase::Locking;
            self.lock_timer_ms = 0;
        }
    }

    /// Commit the active piece, clear rows, then spawn or end the game.
    fn lock_active(&mut self) {
        // The piece's cells are already in the grid; dropping the handle commits them.
        let piece = self.take_active();

        self.phase = Phase::Clearing;
        let clear = lines::resolve(&mut self.grid, &mut self.progress);
        if clear.count() > 0 {
            debug!(
                "cleared {} rows {:?}: +{} (score {}, lines {}, level {})",
                clear.count(),
                clear.rows.as_slice(),
                clear.points,
                self.progress.score,
                self.progress.lines,
                self.progress.level
            );
        }
        self.last_lock = Some(LockEvent {
            kind: piece.kind,
            clear,
        });

        if self
            .grid
            .highest_occupied_row()
            .is_some_and(|row| row >= VISIBLE_ROWS)
        {
            self.end_game("stack reached the hidden buffer");
            return;
        }

        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = self.bag.next();
        if self.spawn_kind(kind) {
            self.can_hold = true;
        }
    }

    /// Place a fresh piece of `kind` at its spawn position.
    fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        self.phase = Phase::Spawning;
        let piece = ActivePiece::spawn(kind);
        if !movement::fits(&self.grid, &piece.shape) {
            self.end_game("spawn position blocked");
            return false;
        }

        movement::place(&mut self.grid, &piece);
        self.active = Some(piece);
        self.phase = Phase::Falling;
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!("spawned {:?} (piece #{})", kind, self.pieces_spawned);
        true
    }

    fn end_game(&mut self, reason: &str) {
        self.active = None;
        self.phase = Phase::GameOver;
        info!(
            "game over: {reason} (score {}, lines {}, level {})",
            self.progress.score, self.progress.lines, self.progress.level
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
