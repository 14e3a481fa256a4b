/// Pure game-logic functions.
///
/// The session is advanced in place: `tick` mutates the `Game` it is given
/// once per display frame.  All randomness comes through an injected RNG
/// handle so callers control determinism (tests use a seeded `StdRng`).
/// Nothing in here performs I/O and nothing in here can fail.

use rand::Rng;

use crate::entities::{Enemy, EnemyEvent, EnemyKind, Game, Mouse, Rect};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Pool capacity — built once at startup, never resized.
pub const NUMBER_OF_ENEMIES: usize = 50;
/// Milliseconds between spawn attempts.
pub const ENEMY_INTERVAL_MS: f32 = 1000.0;
/// Milliseconds between death-animation frame advances (all enemies share
/// the pulse, so animations run in lockstep regardless of frame rate).
pub const SPRITE_INTERVAL_MS: f32 = 150.0;
/// Crew lives at session start.
pub const STARTING_LIVES: u32 = 15;
/// Score needed to win.
pub const WINNING_SCORE: u32 = 30;
/// Enemy sprite frames are square, in logical pixels.
pub const ENEMY_SIZE: f32 = 100.0;
/// Number of visual variant rows on the sprite sheet.
pub const VARIANT_ROWS: u32 = 4;

/// Enemies spawned immediately by `start` so the field is never empty.
const INITIAL_SPAWNS: usize = 2;
/// While above this line an enemy glides downward into view.
const FLOAT_IN_EDGE: f32 = 2.0;
/// Glide step per frame during float-in.
const FLOAT_IN_STEP: f32 = 5.0;

const MSG_IDLE_1: &str = "Run!";
const MSG_IDLE_2: &str = "Or get eaten!";
const MSG_PROMPT: &str = "Press \"ENTER\" or \"R\" to start!";
const MSG_WIN_1: &str = "Well done!";
const MSG_WIN_2: &str = "You escaped the swarm!";
const MSG_LOSE_1: &str = "Aargh!";
const MSG_LOSE_2: &str = "The crew was eaten";

// ── Per-kind spawn parameters ────────────────────────────────────────────────

struct SpawnParams {
    speed_x: f32,
    speed_y: f32,
    lives: u32,
    last_frame: u32,
}

/// Kind-specific fields set right after generic placement.
fn spawn_params(kind: EnemyKind, rng: &mut impl Rng) -> SpawnParams {
    match kind {
        EnemyKind::BeetleMorph => SpawnParams {
            speed_x: 0.0,
            speed_y: rng.gen::<f32>() * 2.0 + 0.2,
            lives: 2,
            last_frame: 3,
        },
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Strict AABB overlap — rectangles that merely touch do not collide.
pub fn check_collision(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width
        && a.x + a.width > b.x
        && a.y < b.y + b.height
        && a.y + a.height > b.y
}

fn enemy_bounds(enemy: &Enemy) -> Rect {
    Rect {
        x: enemy.x,
        y: enemy.y,
        width: enemy.width,
        height: enemy.height,
    }
}

fn mouse_bounds(mouse: &Mouse) -> Rect {
    Rect {
        x: mouse.x,
        y: mouse.y,
        width: mouse.width,
        height: mouse.height,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn dormant_enemy(kind: EnemyKind) -> Enemy {
    Enemy {
        kind,
        x: 0.0,
        y: 0.0,
        width: ENEMY_SIZE,
        height: ENEMY_SIZE,
        speed_x: 0.0,
        speed_y: 0.0,
        frame_x: 0,
        frame_y: 0,
        last_frame: 0,
        lives: 0,
        free: true,
    }
}

/// Build the idle game state for a playfield of the given logical size.
/// The session starts in the game-over overlay showing the start prompt;
/// `start` begins actual play.
pub fn init_game(width: f32, height: f32) -> Game {
    Game {
        width,
        height,
        enemy_pool: (0..NUMBER_OF_ENEMIES)
            .map(|_| dormant_enemy(EnemyKind::BeetleMorph))
            .collect(),
        enemy_timer: 0.0,
        enemy_interval: ENEMY_INTERVAL_MS,
        sprite_timer: 0.0,
        sprite_interval: SPRITE_INTERVAL_MS,
        sprite_update: false,
        score: 0,
        lives: 0,
        winning_score: WINNING_SCORE,
        game_over: true,
        message1: MSG_IDLE_1,
        message2: MSG_IDLE_2,
        message3: MSG_PROMPT,
        mouse: Mouse {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            pressed: false,
            fired: false,
        },
    }
}

/// Adopt a new playfield size.  Active enemies are re-clamped lazily on
/// their next update, so nothing else needs to change here.
pub fn resize(game: &mut Game, width: f32, height: f32) {
    game.width = width;
    game.height = height;
}

// ── Session lifecycle ────────────────────────────────────────────────────────

/// (Re)start a session.  Valid at any time, including mid-play: every pooled
/// enemy goes dormant, score/lives/timers are reinitialised, and two enemies
/// spawn immediately so the field is not empty on the first frame.
pub fn start(game: &mut Game, rng: &mut impl Rng) {
    game.score = 0;
    game.lives = STARTING_LIVES;
    game.game_over = false;
    game.enemy_timer = 0.0;
    game.sprite_timer = 0.0;
    game.sprite_update = false;

    for enemy in &mut game.enemy_pool {
        reset_enemy(enemy);
    }

    for _ in 0..INITIAL_SPAWNS {
        if let Some(i) = acquire_free_enemy(&game.enemy_pool) {
            let width = game.width;
            spawn_enemy(&mut game.enemy_pool[i], width, rng);
        }
    }
}

/// Latch game-over and pick the end-of-round message pair.  Only the first
/// edge counts; later calls are no-ops.
pub fn trigger_game_over(game: &mut Game) {
    if !game.game_over {
        game.game_over = true;

        if game.lives < 1 {
            game.message1 = MSG_LOSE_1;
            game.message2 = MSG_LOSE_2;
        } else if game.score >= game.winning_score {
            game.message1 = MSG_WIN_1;
            game.message2 = MSG_WIN_2;
        }
    }
}

// ── Pool & spawner ───────────────────────────────────────────────────────────

/// First dormant slot by index, or `None` when the pool is exhausted.
pub fn acquire_free_enemy(pool: &[Enemy]) -> Option<usize> {
    pool.iter().position(|enemy| enemy.free)
}

/// Activate a dormant enemy: generic placement first (fully above the top
/// edge, random column, random variant row), then kind-specific motion,
/// lives and animation length.
pub fn spawn_enemy(enemy: &mut Enemy, playfield_width: f32, rng: &mut impl Rng) {
    enemy.x = rng.gen::<f32>() * playfield_width;
    enemy.y = -enemy.height;
    enemy.frame_y = rng.gen_range(0..VARIANT_ROWS);
    enemy.frame_x = 0;
    enemy.free = false;

    let params = spawn_params(enemy.kind, rng);
    enemy.speed_x = params.speed_x;
    enemy.speed_y = params.speed_y;
    enemy.lives = params.lives;
    enemy.last_frame = params.last_frame;
}

/// Return a slot to the pool.  Idempotent; stale fields are overwritten by
/// the next spawn.
pub fn reset_enemy(enemy: &mut Enemy) {
    enemy.free = true;
}

pub fn is_alive(enemy: &Enemy) -> bool {
    enemy.lives >= 1
}

/// Accumulate toward the spawn interval; on crossing it, zero the timer and
/// attempt one spawn.  Pool exhaustion silently skips the attempt — that is
/// the system's only admission control.
pub fn handle_enemy_timer(game: &mut Game, delta_ms: f32, rng: &mut impl Rng) {
    if game.enemy_timer < game.enemy_interval {
        game.enemy_timer += delta_ms;
    } else {
        game.enemy_timer = 0.0;
        if let Some(i) = acquire_free_enemy(&game.enemy_pool) {
            let width = game.width;
            spawn_enemy(&mut game.enemy_pool[i], width, rng);
        }
    }
}

/// Pulse `sprite_update` true for exactly the tick that crosses the
/// interval, false on every other tick.
pub fn handle_sprite_timer(game: &mut Game, delta_ms: f32) {
    if game.sprite_timer < game.sprite_interval {
        game.sprite_timer += delta_ms;
        game.sprite_update = false;
    } else {
        game.sprite_timer = 0.0;
        game.sprite_update = true;
    }
}

// ── Per-enemy update ─────────────────────────────────────────────────────────

/// Damage the enemy if the pointer's 1×1 box overlaps it while a press is
/// live and unconsumed.  Consumes the press either way (a click on a dying
/// enemy is still spent), and never drives lives below zero.
pub fn register_hit(enemy: &mut Enemy, mouse: &mut Mouse) {
    if check_collision(enemy_bounds(enemy), mouse_bounds(mouse)) && mouse.pressed && !mouse.fired {
        if enemy.lives != 0 {
            enemy.lives -= 1;
        }
        mouse.fired = true;
    }
}

/// Advance one enemy by one frame.  Dormant slots are untouched.  The
/// returned event tells the controller what to charge to the session:
/// `Escaped` costs a life, `Destroyed` scores a point.
pub fn update_enemy(
    enemy: &mut Enemy,
    mouse: &mut Mouse,
    playfield_width: f32,
    playfield_height: f32,
    sprite_update: bool,
) -> EnemyEvent {
    if enemy.free {
        return EnemyEvent::None;
    }

    // Float in: spawned above the top edge, glide down until visible.
    if enemy.y < FLOAT_IN_EDGE {
        enemy.y += FLOAT_IN_STEP;
    }

    // Keep the right edge inside the playfield (also repairs stale positions
    // after a shrink-resize).
    if enemy.x > playfield_width - enemy.width {
        enemy.x = playfield_width - enemy.width;
    }

    enemy.x += enemy.speed_x;
    enemy.y += enemy.speed_y;

    register_hit(enemy, mouse);

    if enemy.y > playfield_height {
        reset_enemy(enemy);
        return EnemyEvent::Escaped;
    }

    if !is_alive(enemy) && sprite_update {
        enemy.frame_x += 1;
        if enemy.frame_x > enemy.last_frame {
            reset_enemy(enemy);
            return EnemyEvent::Destroyed;
        }
    }

    EnemyEvent::None
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the whole session by one display frame.
///
/// Order matters and mirrors the frame layout: sprite gate first, then the
/// win/lose check, then (while playing) the spawner, then every pool slot in
/// index order whether active or not — the per-enemy functions self-guard on
/// `free`, and the first active enemy in pool order wins a live press.
pub fn tick(game: &mut Game, delta_ms: f32, rng: &mut impl Rng) {
    handle_sprite_timer(game, delta_ms);

    if game.lives < 1 || game.score >= game.winning_score {
        trigger_game_over(game);
    }

    if !game.game_over {
        handle_enemy_timer(game, delta_ms, rng);
    }

    let sprite_update = game.sprite_update;
    let (width, height) = (game.width, game.height);
    for enemy in &mut game.enemy_pool {
        match update_enemy(enemy, &mut game.mouse, width, height, sprite_update) {
            EnemyEvent::Escaped => game.lives = game.lives.saturating_sub(1),
            EnemyEvent::Destroyed => {
                if !game.game_over {
                    game.score += 1;
                }
            }
            EnemyEvent::None => {}
        }
    }
}
