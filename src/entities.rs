/// All game entity types plus their per-tick movement rules.
///
/// Movement never deletes anything: an entity that wants to go away clears
/// its `alive` flag (or, for enemies, raises `escaped`) and `compute` sweeps
/// the collections afterwards.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in screen pixels, origin top-left, y grows down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// A `w`×`h` rectangle whose centre sits at (`cx`, `cy`).
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Strict intersection: rectangles that only share an edge do not overlap.
    pub const fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    /// Always within `0..=max_health`.
    pub health: u32,
    pub speed: i32,
    /// Session time of the last shot; `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub shot_cooldown_ms: u64,
}

impl Player {
    /// A fresh ship centred horizontally, resting just above the bottom edge.
    pub fn spawn(config: &GameConfig) -> Self {
        let x = config.width / 2 - config.player_width / 2;
        let y = config.height - config.player_bottom_margin - config.player_height;
        Player {
            rect: Rect::new(x, y, config.player_width, config.player_height),
            health: config.max_health,
            speed: config.player_speed,
            last_shot_ms: None,
            shot_cooldown_ms: config.shot_cooldown_ms,
        }
    }

    /// Apply held direction keys for one tick.  Both keys held cancel out.
    /// The result is re-clamped so the ship never leaves the screen.
    pub fn steer(&mut self, left: bool, right: bool, screen_width: i32) {
        let mut x = self.rect.x;
        if left {
            x -= self.speed;
        }
        if right {
            x += self.speed;
        }
        self.rect.x = x.clamp(0, (screen_width - self.rect.w).max(0));
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    /// Negative: travels up.
    pub velocity_y: i32,
    pub alive: bool,
}

impl Projectile {
    pub fn advance(&mut self) {
        self.rect.y += self.velocity_y;
        if self.rect.bottom() < 0 {
            self.alive = false;
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity_y: i32,
    /// Set once the enemy has slipped past the bottom edge.  The enemy stays
    /// in the world until escape damage has been applied.
    pub escaped: bool,
    pub alive: bool,
}

impl Enemy {
    pub fn advance(&mut self, screen_height: i32) {
        self.rect.y += self.velocity_y;
        if self.rect.top() > screen_height {
            self.escaped = true;
        }
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// Restores `heal_amount` health, capped at the maximum.
    Health,
    /// Drops the shot cooldown to the rapid-fire value for the rest of the game.
    RapidFire,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub rect: Rect,
    pub kind: PickupKind,
    pub velocity_y: i32,
    pub alive: bool,
}

impl Pickup {
    pub fn advance(&mut self, screen_height: i32) {
        self.rect.y += self.velocity_y;
        if self.rect.top() > screen_height {
            self.alive = false;
        }
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// One round of play.  Cloneable so the update functions in `compute` can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub score: u32,
    pub status: GameStatus,
    /// Milliseconds of play since the round started.
    pub elapsed_ms: u64,
    /// Session time of the most recent enemy spawn.
    pub last_spawn_ms: u64,
}
