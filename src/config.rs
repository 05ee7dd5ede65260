//! Gameplay tuning.
//!
//! The constants are the stock values; `GameConfig` carries them into
//! `World` and `Session` so tests can tweak a single knob (screen size,
//! power-up chance, ...) without touching anything global.

// ── Screen & pacing ──────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;
pub const FPS: u32 = 60;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 60;
/// Gap between the ship's bottom edge and the bottom of the screen.
pub const PLAYER_BOTTOM_MARGIN: i32 = 10;
pub const PLAYER_SPEED: i32 = 5;
pub const PLAYER_HEALTH: u32 = 100;
pub const SHOT_COOLDOWN_MS: u64 = 300;
pub const RAPID_FIRE_COOLDOWN_MS: u64 = 100;
pub const HEAL_AMOUNT: u32 = 20;

// ── Projectiles, enemies, pickups ────────────────────────────────────────────

pub const BULLET_WIDTH: i32 = 10;
pub const BULLET_HEIGHT: i32 = 20;
pub const BULLET_SPEED: i32 = -12;

pub const ENEMY_SIZE: i32 = 30;
pub const ENEMY_SPEED: i32 = 2;

pub const PICKUP_SIZE: i32 = 25;
pub const PICKUP_SPEED: i32 = 3;

// ── Spawning & difficulty ────────────────────────────────────────────────────

pub const SPAWN_DELAY_MS: u64 = 1200;
pub const MIN_SPAWN_DELAY_MS: u64 = 600;
/// Spawn delay shaved off for every `POINTS_PER_LEVEL` points.
pub const SPAWN_DELAY_STEP_MS: u64 = 100;
pub const POINTS_PER_LEVEL: u32 = 100;
pub const MAX_DIFFICULTY_LEVEL: u32 = 5;

// ── Scoring & damage ─────────────────────────────────────────────────────────

pub const KILL_REWARD: u32 = 10;
pub const ESCAPED_ENEMY_DAMAGE: u32 = 20;
pub const ENEMY_DAMAGE: u32 = 15;
pub const POWERUP_CHANCE: f64 = 0.1;
pub const LOW_HEALTH_WARNING: u32 = 30;

/// Everything the simulation needs to know about the rules of the game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub player_width: i32,
    pub player_height: i32,
    pub player_bottom_margin: i32,
    pub player_speed: i32,
    pub max_health: u32,
    pub shot_cooldown_ms: u64,
    pub rapid_fire_cooldown_ms: u64,
    pub heal_amount: u32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullet_speed: i32,
    pub enemy_size: i32,
    pub enemy_speed: i32,
    pub pickup_size: i32,
    pub pickup_speed: i32,
    pub spawn_delay_ms: u64,
    pub min_spawn_delay_ms: u64,
    pub spawn_delay_step_ms: u64,
    pub points_per_level: u32,
    pub max_difficulty_level: u32,
    pub kill_reward: u32,
    pub escaped_enemy_damage: u32,
    pub enemy_damage: u32,
    pub powerup_chance: f64,
    pub low_health_warning: u32,
    /// Fire on every tick (rate-limited by the cooldown) in addition to Space.
    pub auto_fire: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: FPS,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            player_speed: PLAYER_SPEED,
            max_health: PLAYER_HEALTH,
            shot_cooldown_ms: SHOT_COOLDOWN_MS,
            rapid_fire_cooldown_ms: RAPID_FIRE_COOLDOWN_MS,
            heal_amount: HEAL_AMOUNT,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            pickup_size: PICKUP_SIZE,
            pickup_speed: PICKUP_SPEED,
            spawn_delay_ms: SPAWN_DELAY_MS,
            min_spawn_delay_ms: MIN_SPAWN_DELAY_MS,
            spawn_delay_step_ms: SPAWN_DELAY_STEP_MS,
            points_per_level: POINTS_PER_LEVEL,
            max_difficulty_level: MAX_DIFFICULTY_LEVEL,
            kill_reward: KILL_REWARD,
            escaped_enemy_damage: ESCAPED_ENEMY_DAMAGE,
            enemy_damage: ENEMY_DAMAGE,
            powerup_chance: POWERUP_CHANCE,
            low_health_warning: LOW_HEALTH_WARNING,
            auto_fire: true,
        }
    }
}
