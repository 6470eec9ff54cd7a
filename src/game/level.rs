//! Level
//!
//! Owns every entity of one play session and steps them once per frame:
//!
//! 1. pan tiles, enemies, bullets and particles by last frame's world shift
//! 2. pick this frame's camera shift and player speed
//! 3. player input, animation and bullets; jump events become particles
//! 4. horizontal collisions for the player, then each enemy
//! 5. gravity and vertical collisions for the player, pickups
//! 6. landing dust, enemy animation
//!
//! A hazard contact or the quit key ends the level. Once ended, `update`
//! keeps returning the same outcome without simulating anything.

use std::rc::Rc;
use tracing::{debug, info, warn};
use crate::geometry::Vec2;
use crate::save::Save;
use super::animation::AnimationSet;
use super::character::{Movable, Orientation, Shooting};
use super::collision::{resolve_horizontal, resolve_vertical};
use super::constants::{PLAYER_SPEED, SCREEN_WIDTH};
use super::enemy::Enemy;
use super::event::{EventQueue, PlayerEvent};
use super::input::FrameInput;
use super::layout::{parse_layout, LayoutError};
use super::particles::{ParticleEffect, ParticleKind};
use super::player::Player;
use super::render::{Canvas, SpriteRef};
use super::tile::Tile;

const JUMP_DUST_OFFSET: Vec2 = Vec2::new(10.0, 5.0);
const LAND_DUST_OFFSET: Vec2 = Vec2::new(10.0, 15.0);

/// Why a level stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    Died,
}

/// Result of one simulation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The player asked to save; the caller owns persistence
    SaveRequested,
    LevelEnded(EndReason),
}

/// Context a level is built with
#[derive(Debug, Clone)]
pub struct LevelSettings {
    pub screen_width: f32,
    pub level_index: u32,
    pub animations: Rc<AnimationSet>,
}

impl LevelSettings {
    pub fn new(screen_width: f32, level_index: u32, animations: Rc<AnimationSet>) -> Self {
        Self {
            screen_width,
            level_index,
            animations,
        }
    }
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, 0, Rc::new(AnimationSet::default()))
    }
}

pub struct Level {
    layout: Vec<String>,
    level_index: u32,
    screen_width: f32,
    animations: Rc<AnimationSet>,
    tiles: Vec<Tile>,
    player: Player,
    enemies: Vec<Enemy>,
    particles: Vec<ParticleEffect>,
    events: EventQueue<PlayerEvent>,
    world_shift: f32,
    /// Collision anchor shared by every character's horizontal pass
    current_x: f32,
    ended: Option<EndReason>,
}

impl Level {
    /// Build a level from layout rows; fails without exactly one player cell
    pub fn new<S: AsRef<str>>(layout: &[S], settings: &LevelSettings) -> Result<Self, LayoutError> {
        let spawns = parse_layout(layout).inspect_err(|e| warn!("Level construction failed: {}", e))?;
        let animations = Rc::clone(&settings.animations);

        let (px, py) = spawns.player;
        let player = Player::new(px, py, &animations);
        let enemies = spawns
            .enemies
            .iter()
            .map(|&(x, y)| Enemy::new(x, y, &animations))
            .collect::<Vec<_>>();

        info!(
            "Level {} ready: {} tiles, {} enemies",
            settings.level_index,
            spawns.tiles.len(),
            enemies.len()
        );

        Ok(Self {
            layout: layout.iter().map(|row| row.as_ref().to_string()).collect(),
            level_index: settings.level_index,
            screen_width: settings.screen_width,
            animations,
            tiles: spawns.tiles,
            player,
            enemies,
            particles: Vec::new(),
            events: EventQueue::new(),
            world_shift: 0.0,
            current_x: 0.0,
            ended: None,
        })
    }

    /// Advance the simulation by one frame. `now` is the clock in seconds.
    pub fn update(&mut self, input: FrameInput, now: f64) -> FrameOutcome {
        if let Some(reason) = self.ended {
            return FrameOutcome::LevelEnded(reason);
        }

        self.apply_world_shift();
        self.scroll_x();

        self.player.update(input, now, &self.animations, &mut self.events);
        let orientation = self.player.body.orientation;
        for event in self.events.drain() {
            match event {
                PlayerEvent::Jumped { at } => {
                    self.particles.push(jump_particle(at, orientation, &self.animations));
                }
            }
        }

        if resolve_horizontal(&mut self.player, &self.tiles, &mut self.current_x).killed {
            warn!("Player was killed");
            return self.end(EndReason::Died);
        }
        for enemy in &mut self.enemies {
            resolve_horizontal(enemy, &self.tiles, &mut self.current_x);
        }

        let vertical = resolve_vertical(&mut self.player, &mut self.tiles);
        if vertical.killed {
            warn!("Player was killed");
            return self.end(EndReason::Died);
        }
        self.player.score += vertical.collected;
        if vertical.landed {
            let at = self.player.body.rect.mid_bottom();
            self.particles.push(land_particle(at, orientation, &self.animations));
        }

        for enemy in &mut self.enemies {
            enemy.update(&self.animations);
        }

        if input.contains(FrameInput::QUIT) {
            return self.end(EndReason::Quit);
        }
        if input.contains(FrameInput::SAVE) {
            return FrameOutcome::SaveRequested;
        }
        FrameOutcome::Continue
    }

    /// Pan everything world-anchored by the shift chosen last frame
    fn apply_world_shift(&mut self) {
        let shift = self.world_shift;
        self.particles.retain_mut(|p| p.update(shift));
        if shift == 0.0 {
            return;
        }
        for tile in &mut self.tiles {
            tile.update(shift);
        }
        for enemy in &mut self.enemies {
            enemy.shift(shift);
        }
        self.player.shift_world(shift);
    }

    /// Near a screen edge and walking toward it, the world scrolls at double
    /// speed while the player stands still
    fn scroll_x(&mut self) {
        let player_x = self.player.body.rect.center_x();
        let direction_x = self.player.body.direction.x;
        let quarter = self.screen_width / 4.0;

        if player_x < quarter && direction_x < 0.0 {
            self.world_shift = PLAYER_SPEED * 2.0;
            self.player.body.speed = 0.0;
        } else if player_x > self.screen_width - quarter && direction_x > 0.0 {
            self.world_shift = -PLAYER_SPEED * 2.0;
            self.player.body.speed = 0.0;
        } else {
            self.world_shift = 0.0;
            self.player.body.speed = PLAYER_SPEED;
        }
    }

    fn end(&mut self, reason: EndReason) -> FrameOutcome {
        if reason == EndReason::Died {
            self.player.alive = false;
        }
        info!("Level {} ended: {:?} (score {})", self.level_index, reason, self.player.score);
        self.ended = Some(reason);
        FrameOutcome::LevelEnded(reason)
    }

    /// Submit draw calls: tiles, particles, player and its dust, bullets, enemies
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for tile in &self.tiles {
            canvas.draw(SpriteRef::Tile(tile.kind), tile.rect, false);
        }
        for particle in &self.particles {
            canvas.draw(
                SpriteRef::Particle(particle.kind.animation(), particle.frame()),
                particle.rect,
                particle.flip_x,
            );
        }

        if self.player.alive {
            let body = &self.player.body;
            canvas.draw(
                SpriteRef::Player(self.player.state.animation(), self.player.frame()),
                body.rect,
                body.orientation.flip_x(),
            );
            if let Some(dust) = &self.player.run_dust {
                canvas.draw(SpriteRef::Particle(dust.kind.animation(), dust.frame()), dust.rect, dust.flip_x);
            }
            for bullet in self.player.bullets() {
                canvas.draw(SpriteRef::Bullet, bullet.rect, bullet.orientation.flip_x());
            }
        }

        for enemy in &self.enemies {
            canvas.draw(SpriteRef::Enemy(enemy.frame()), enemy.rect(), enemy.body.orientation.flip_x());
        }
    }

    /// Snapshot of the current progress
    pub fn current_save(&self, name: &str, created_at: &str) -> Save {
        debug!("Snapshot of level {} at score {}", self.level_index, self.player.score);
        Save {
            name: name.to_string(),
            score: self.player.score,
            level: self.level_index,
            map: self.layout.clone(),
            created_at: created_at.to_string(),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn particles(&self) -> &[ParticleEffect] {
        &self.particles
    }

    pub fn world_shift(&self) -> f32 {
        self.world_shift
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn layout(&self) -> &[String] {
        &self.layout
    }

    pub fn level_index(&self) -> u32 {
        self.level_index
    }

    pub fn ended(&self) -> Option<EndReason> {
        self.ended
    }
}

fn jump_particle(at: Vec2, orientation: Orientation, animations: &AnimationSet) -> ParticleEffect {
    let pos = match orientation {
        Orientation::Right => at - JUMP_DUST_OFFSET,
        Orientation::Left => at + Vec2::new(JUMP_DUST_OFFSET.x, -JUMP_DUST_OFFSET.y),
    };
    ParticleEffect::spawn(ParticleKind::Jump, pos, animations)
}

fn land_particle(at: Vec2, orientation: Orientation, animations: &AnimationSet) -> ParticleEffect {
    let pos = match orientation {
        Orientation::Right => at - LAND_DUST_OFFSET,
        Orientation::Left => at + Vec2::new(LAND_DUST_OFFSET.x, -LAND_DUST_OFFSET.y),
    };
    ParticleEffect::spawn(ParticleKind::Land, pos, animations)
}
