/// Render collaborator and scene composition.
///
/// `Canvas` is the handful of drawing primitives a backend must provide.
/// The `draw_*` functions translate game state into calls on it; no game
/// logic is performed here.

use std::io;

use crate::compute::difficulty_level;
use crate::config::GameConfig;
use crate::entities::{Enemy, Pickup, PickupKind, Player, Projectile, Rect, World};

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const BLUE: Rgb = Rgb(0, 200, 255);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const BACKGROUND: Rgb = Rgb(20, 20, 30);

/// Which point of a text label `pos` refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
    Center,
}

pub trait Canvas {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb);
    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Rgb);
    fn text(&mut self, pos: (i32, i32), anchor: Anchor, text: &str, color: Rgb);
    /// Show everything drawn since the last `clear`.
    fn present(&mut self) -> io::Result<()>;
}

/// Anything with a position, a size and a look.
pub trait Sprite {
    /// Area the sprite covers.  Sprites outside the screen are not painted.
    fn bounds(&self) -> Rect;
    fn paint(&self, canvas: &mut dyn Canvas);
}

impl Sprite for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect, GREEN);
    }
}

impl Sprite for Projectile {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        // 1-px white outline around a yellow body
        let r = self.rect;
        canvas.fill_rect(r, WHITE);
        canvas.fill_rect(Rect::new(r.x + 1, r.y + 1, r.w - 2, r.h - 2), YELLOW);
    }
}

impl Sprite for Enemy {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let r = self.rect;
        let (cx, cy) = r.center();
        let diamond = [(cx, r.top()), (r.right(), cy), (cx, r.bottom()), (r.left(), cy)];
        canvas.fill_polygon(&diamond, RED);
        canvas.fill_circle((cx, cy), 3, YELLOW);
    }
}

impl Sprite for Pickup {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let color = match self.kind {
            PickupKind::Health => GREEN,
            PickupKind::RapidFire => YELLOW,
        };
        canvas.fill_rect(self.rect, color);
    }
}

// ── Scenes ────────────────────────────────────────────────────────────────────

pub fn draw_menu(canvas: &mut dyn Canvas, config: &GameConfig) {
    canvas.clear(BLACK);
    canvas.text(
        (config.width / 2, config.height / 2),
        Anchor::Center,
        "Press Any Key to Start",
        WHITE,
    );
}

pub fn draw_game_over(canvas: &mut dyn Canvas, world: &World) {
    canvas.clear(BLACK);
    canvas.text(
        (world.config.width / 2, world.config.height / 2),
        Anchor::Center,
        &format!("Game Over! Score: {}", world.score),
        WHITE,
    );
}

/// One frame of play: every entity, then the HUD on top.
pub fn draw_world(canvas: &mut dyn Canvas, world: &World) {
    canvas.clear(BACKGROUND);

    let screen = Rect::new(0, 0, world.config.width, world.config.height);
    let sprites = world
        .enemies
        .iter()
        .map(|e| e as &dyn Sprite)
        .chain(world.pickups.iter().map(|p| p as &dyn Sprite))
        .chain(world.projectiles.iter().map(|p| p as &dyn Sprite))
        .chain(std::iter::once(&world.player as &dyn Sprite));
    for sprite in sprites.filter(|s| s.bounds().overlaps(&screen)) {
        sprite.paint(canvas);
    }

    draw_hud(canvas, world);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

const HEALTH_BAR: Rect = Rect::new(10, 10, 100, 10);

/// Width of the green part of the health bar.
pub fn health_bar_width(health: u32, max_health: u32) -> i32 {
    if max_health == 0 {
        return 0;
    }
    (i64::from(HEALTH_BAR.w) * i64::from(health.min(max_health)) / i64::from(max_health)) as i32
}

pub fn draw_hud(canvas: &mut dyn Canvas, world: &World) {
    let cfg = &world.config;
    let health = world.player.health;

    canvas.fill_rect(HEALTH_BAR, RED);
    canvas.fill_rect(
        Rect { w: health_bar_width(health, cfg.max_health), ..HEALTH_BAR },
        GREEN,
    );
    canvas.text((10, 30), Anchor::TopLeft, &format!("Health: {}", health), WHITE);

    canvas.text(
        (cfg.width - 10, 10),
        Anchor::TopRight,
        &format!("Score: {}", world.score),
        WHITE,
    );
    canvas.text(
        (cfg.width - 10, 50),
        Anchor::TopRight,
        &format!("Level: {}", difficulty_level(cfg, world.score)),
        YELLOW,
    );
    canvas.text(
        (10, 60),
        Anchor::TopLeft,
        &format!("Enemies: {}", world.enemies.len()),
        BLUE,
    );

    if health <= cfg.low_health_warning {
        canvas.text((cfg.width / 2, 50), Anchor::Center, "CRITICAL HEALTH!", RED);
    }
}
