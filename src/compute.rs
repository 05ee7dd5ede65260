/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `World` (and, where needed, an RNG handle) and returns a brand-new
/// `World`.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::entities::{Enemy, GameStatus, Pickup, PickupKind, Player, Projectile, Rect, World};
use crate::input::{FrameInput, Key};

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Milliseconds between enemy spawns at a given score.
///
/// Linear ramp: every `points_per_level` points shave `spawn_delay_step_ms`
/// off the base delay, never going below `min_spawn_delay_ms`.
pub fn spawn_interval(config: &GameConfig, score: u32) -> u64 {
    let steps = u64::from(score / config.points_per_level.max(1));
    config
        .spawn_delay_ms
        .saturating_sub(steps * config.spawn_delay_step_ms)
        .max(config.min_spawn_delay_ms)
}

/// Level shown on the HUD, 1-based and capped.
pub fn difficulty_level(config: &GameConfig, score: u32) -> u32 {
    (score / config.points_per_level.max(1) + 1).min(config.max_difficulty_level)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh round: one player, nothing else on screen, score 0.
pub fn init_world(config: &GameConfig) -> World {
    World {
        config: config.clone(),
        player: Player::spawn(config),
        enemies: Vec::new(),
        projectiles: Vec::new(),
        pickups: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        elapsed_ms: 0,
        last_spawn_ms: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(world: &World, left: bool, right: bool) -> World {
    let mut player = world.player.clone();
    player.steer(left, right, world.config.width);
    World {
        player,
        ..world.clone()
    }
}

/// Fire one projectile from the centre of the ship's top edge, unless the
/// previous shot was `shot_cooldown_ms` or less ago.
pub fn player_shoot(world: &World, now_ms: u64) -> World {
    let player = &world.player;
    if let Some(last) = player.last_shot_ms {
        if now_ms.saturating_sub(last) <= player.shot_cooldown_ms {
            return world.clone();
        }
    }

    let (cx, _) = player.rect.center();
    let cfg = &world.config;
    let projectile = Projectile {
        rect: Rect::new(
            cx - cfg.bullet_width / 2,
            player.rect.top() - cfg.bullet_height,
            cfg.bullet_width,
            cfg.bullet_height,
        ),
        velocity_y: cfg.bullet_speed,
        alive: true,
    };

    let mut projectiles = world.projectiles.clone();
    projectiles.push(projectile);
    World {
        player: Player {
            last_shot_ms: Some(now_ms),
            ..player.clone()
        },
        projectiles,
        ..world.clone()
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Drop a new enemy in at a random column once the current spawn interval
/// has elapsed since the previous one.
pub fn spawn_enemy(world: &World, now_ms: u64, rng: &mut impl Rng) -> World {
    let interval = spawn_interval(&world.config, world.score);
    if now_ms.saturating_sub(world.last_spawn_ms) <= interval {
        return world.clone();
    }

    let size = world.config.enemy_size;
    let x = rng.gen_range(0..=(world.config.width - size).max(0));
    debug!(x, interval, "enemy spawned");

    let mut enemies = world.enemies.clone();
    enemies.push(Enemy {
        rect: Rect::new(x, -size, size, size),
        velocity_y: world.config.enemy_speed,
        escaped: false,
        alive: true,
    });
    World {
        enemies,
        last_spawn_ms: now_ms,
        ..world.clone()
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

/// Step every projectile, enemy and pickup once and sweep out the ones that
/// left the screen.  Escaped enemies are kept for `resolve_escapes`.
pub fn advance_entities(world: &World) -> World {
    let height = world.config.height;

    let projectiles = world
        .projectiles
        .iter()
        .cloned()
        .filter_map(|mut p| {
            p.advance();
            p.alive.then_some(p)
        })
        .collect();

    let enemies = world
        .enemies
        .iter()
        .cloned()
        .map(|mut e| {
            e.advance(height);
            e
        })
        .collect();

    let pickups = world
        .pickups
        .iter()
        .cloned()
        .filter_map(|mut p| {
            p.advance(height);
            p.alive.then_some(p)
        })
        .collect();

    World {
        projectiles,
        enemies,
        pickups,
        ..world.clone()
    }
}

// ── Collision resolution ──────────────────────────────────────────────────────

/// Projectiles ↔ enemies.  Every enemy touched by at least one live
/// projectile dies together with those projectiles; each kill scores
/// `kill_reward` and may drop a pickup at the enemy's centre.
pub fn resolve_projectile_hits(world: &World, rng: &mut impl Rng) -> World {
    let cfg = &world.config;
    let mut projectiles = world.projectiles.clone();
    let mut enemies = world.enemies.clone();
    let mut pickups = world.pickups.clone();
    let mut score = world.score;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let mut hit = false;
        for projectile in projectiles.iter_mut().filter(|p| p.alive) {
            if projectile.rect.overlaps(&enemy.rect) {
                projectile.alive = false;
                hit = true;
            }
        }
        if !hit {
            continue;
        }

        enemy.alive = false;
        score += cfg.kill_reward;

        if rng.gen_bool(cfg.powerup_chance) {
            let kind = if rng.gen_bool(0.5) {
                PickupKind::Health
            } else {
                PickupKind::RapidFire
            };
            let (cx, cy) = enemy.rect.center();
            debug!(?kind, cx, cy, "pickup dropped");
            pickups.push(Pickup {
                rect: Rect::centered(cx, cy, cfg.pickup_size, cfg.pickup_size),
                kind,
                velocity_y: cfg.pickup_speed,
                alive: true,
            });
        }
    }

    projectiles.retain(|p| p.alive);
    enemies.retain(|e| e.alive);
    World {
        projectiles,
        enemies,
        pickups,
        score,
        ..world.clone()
    }
}

/// Escaped enemies hurt the player once each and are then removed.
/// Processing stops at the escape that empties the health bar.
pub fn resolve_escapes(world: &World) -> World {
    let mut player = world.player.clone();
    let mut enemies = world.enemies.clone();
    let mut status = world.status.clone();

    for enemy in enemies.iter_mut().filter(|e| e.alive && e.escaped) {
        player.health = player.health.saturating_sub(world.config.escaped_enemy_damage);
        enemy.alive = false;
        if player.health == 0 {
            status = GameStatus::GameOver;
            break;
        }
    }

    enemies.retain(|e| e.alive);
    World {
        player,
        enemies,
        status,
        ..world.clone()
    }
}

/// Enemies ramming the ship.  Same early stop as `resolve_escapes`.
pub fn resolve_melee(world: &World) -> World {
    let mut player = world.player.clone();
    let mut enemies = world.enemies.clone();
    let mut status = world.status.clone();

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        if !enemy.rect.overlaps(&player.rect) {
            continue;
        }
        player.health = player.health.saturating_sub(world.config.enemy_damage);
        enemy.alive = false;
        if player.health == 0 {
            status = GameStatus::GameOver;
            break;
        }
    }

    enemies.retain(|e| e.alive);
    World {
        player,
        enemies,
        status,
        ..world.clone()
    }
}

/// Pickups touching the ship are consumed and applied.
pub fn resolve_pickups(world: &World) -> World {
    let cfg = &world.config;
    let mut player = world.player.clone();
    let mut pickups = world.pickups.clone();

    for pickup in pickups.iter_mut().filter(|p| p.alive) {
        if !pickup.rect.overlaps(&player.rect) {
            continue;
        }
        pickup.alive = false;
        match pickup.kind {
            PickupKind::Health => {
                player.health = (player.health + cfg.heal_amount).min(cfg.max_health);
            }
            PickupKind::RapidFire => {
                player.shot_cooldown_ms = cfg.rapid_fire_cooldown_ms;
            }
        }
        debug!(kind = ?pickup.kind, health = player.health, "pickup collected");
    }

    pickups.retain(|p| p.alive);
    World {
        player,
        pickups,
        ..world.clone()
    }
}

/// All four collision phases in their fixed order.  Once the round is over
/// nothing further is resolved for this tick.
pub fn resolve_collisions(world: &World, rng: &mut impl Rng) -> World {
    let world = resolve_projectile_hits(world, rng);
    let world = resolve_escapes(&world);
    if world.status == GameStatus::GameOver {
        return world;
    }
    let world = resolve_melee(&world);
    if world.status == GameStatus::GameOver {
        return world;
    }
    resolve_pickups(&world)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the round by one tick of `dt_ms` milliseconds.  All randomness
/// comes through `rng` so callers control determinism.
pub fn tick(world: &World, input: &FrameInput, dt_ms: u64, rng: &mut impl Rng) -> World {
    if world.status == GameStatus::GameOver {
        return world.clone();
    }

    let now = world.elapsed_ms + dt_ms;
    let mut next = World {
        elapsed_ms: now,
        ..world.clone()
    };

    // ── 1. Shooting ──────────────────────────────────────────────────────────
    if input.was_pressed(Key::Fire) {
        next = player_shoot(&next, now);
    }
    if next.config.auto_fire {
        next = player_shoot(&next, now);
    }

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    next = spawn_enemy(&next, now, rng);

    // ── 3. Move everything ───────────────────────────────────────────────────
    next = move_player(&next, input.is_held(Key::Left), input.is_held(Key::Right));
    next = advance_entities(&next);

    // ── 4. Collisions & scoring ──────────────────────────────────────────────
    let before = next.score;
    next = resolve_collisions(&next, rng);
    trace!(
        score = next.score,
        gained = next.score - before,
        health = next.player.health,
        enemies = next.enemies.len(),
        "tick resolved"
    );

    if next.status == GameStatus::GameOver {
        info!(score = next.score, elapsed_ms = now, "player destroyed");
    }
    next
}
