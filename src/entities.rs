/// All game data types — pure data, no logic.

/// Enemy variants.  Only the beetlemorph exists today; spawn parameters for
/// each kind live in `compute::spawn_params` so new kinds slot in without
/// dynamic dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    BeetleMorph,
}

/// Outcome of one enemy update, applied by the controller tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyEvent {
    /// Nothing noteworthy happened.
    None,
    /// The enemy fell past the bottom edge — costs one crew life.
    Escaped,
    /// The death animation finished — worth one point while the game is on.
    Destroyed,
}

/// Axis-aligned bounding box in logical pixels.
#[derive(Clone, Copy, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

// ── Pooled enemy ──────────────────────────────────────────────────────────────

/// One slot of the enemy pool.  `free == true` means dormant: the slot holds
/// stale data from its previous life and is skipped by update and draw until
/// the next spawn overwrites it.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Per-frame displacement in logical pixels.
    pub speed_x: f32,
    pub speed_y: f32,
    /// Current death-animation frame (column on the sprite sheet).
    pub frame_x: u32,
    /// Visual variant (row on the sprite sheet), fixed at spawn.
    pub frame_y: u32,
    /// Terminal death-animation frame.
    pub last_frame: u32,
    pub lives: u32,
    pub free: bool,
}

// ── Pointer state ─────────────────────────────────────────────────────────────

/// Pointer tracker fed by the platform event stream.  `fired` is a one-shot
/// consumption marker: set once a press has registered a hit, cleared on the
/// next press, so a single click damages at most one enemy.
#[derive(Clone, Copy, Debug)]
pub struct Mouse {
    pub x: f32,
    pub y: f32,
    /// Hit-box size used for collision (1×1 logical px).
    pub width: f32,
    pub height: f32,
    pub pressed: bool,
    pub fired: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game session.  Owned by the frame loop and mutated only inside
/// `compute::tick` (plus the event handlers that feed `mouse`).
#[derive(Clone, Debug)]
pub struct Game {
    /// Playfield size in logical pixels, refreshed on terminal resize.
    pub width: f32,
    pub height: f32,

    /// Fixed-capacity pool, built once at startup and never resized.
    pub enemy_pool: Vec<Enemy>,
    /// Spawn accumulator (ms) against `enemy_interval`.
    pub enemy_timer: f32,
    pub enemy_interval: f32,

    /// Global death-animation gate: `sprite_update` pulses true for exactly
    /// one tick each `sprite_interval` ms so all enemies animate in lockstep.
    pub sprite_timer: f32,
    pub sprite_interval: f32,
    pub sprite_update: bool,

    pub score: u32,
    pub lives: u32,
    pub winning_score: u32,
    pub game_over: bool,

    /// Status lines shown on the game-over / idle overlay.
    pub message1: &'static str,
    pub message2: &'static str,
    pub message3: &'static str,

    pub mouse: Mouse,
}
