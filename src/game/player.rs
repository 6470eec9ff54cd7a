//! Player
//!
//! Input-driven character: walks, jumps when grounded, shoots with a
//! cooldown and leaves a dust trail while running. Its animation state is
//! recomputed from velocity every frame.

use crate::geometry::{Anchor, Rect, Vec2};
use super::animation::{advance_looping, AnimationId, AnimationSet};
use super::character::{edge_snap, Body, CharacterKind, Collisions, Movable, Orientation, Shooter, Shooting};
use super::constants::{BULLET_SPEED, FALL_THRESHOLD, PLAYER_ANIMATION_SPEED, PLAYER_JUMP, PLAYER_SPEED};
use super::event::{EventQueue, PlayerEvent};
use super::input::FrameInput;
use super::particles::{ParticleEffect, ParticleKind};

/// Foot offset of the running dust trail
const RUN_DUST_OFFSET: Vec2 = Vec2::new(6.0, 10.0);

/// Animation state, a pure function of velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
}

impl PlayerState {
    /// Rising → Jump, falling faster than the threshold → Fall,
    /// otherwise Run while walking and Idle when still
    pub fn derive(velocity: Vec2) -> Self {
        if velocity.y < 0.0 {
            PlayerState::Jump
        } else if velocity.y > FALL_THRESHOLD {
            PlayerState::Fall
        } else if velocity.x != 0.0 {
            PlayerState::Run
        } else {
            PlayerState::Idle
        }
    }

    pub fn animation(&self) -> AnimationId {
        match self {
            PlayerState::Idle => AnimationId::PlayerIdle,
            PlayerState::Run => AnimationId::PlayerRun,
            PlayerState::Jump => AnimationId::PlayerJump,
            PlayerState::Fall => AnimationId::PlayerFall,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub shooter: Shooter,
    pub state: PlayerState,
    pub score: u32,
    pub run_dust: Option<ParticleEffect>,
    pub alive: bool,
}

impl Player {
    /// Spawn with the top-left corner at (x, y)
    pub fn new(x: f32, y: f32, animations: &AnimationSet) -> Self {
        let idle = animations.get(AnimationId::PlayerIdle);
        Self {
            body: Body::new(Rect::new(x, y, idle.width, idle.height), PLAYER_SPEED),
            shooter: Shooter::new(),
            state: PlayerState::Idle,
            score: 0,
            run_dust: None,
            alive: true,
        }
    }

    /// One frame of player logic (collision resolution is the level's job)
    pub fn update(
        &mut self,
        input: FrameInput,
        now: f64,
        animations: &AnimationSet,
        events: &mut EventQueue<PlayerEvent>,
    ) {
        self.handle_input(input, now, animations, events);
        self.state = PlayerState::derive(self.body.direction);
        self.animate(animations);
        self.run_dust_animation(animations);
        self.shooter.advance_bullets();
    }

    fn handle_input(
        &mut self,
        input: FrameInput,
        now: f64,
        animations: &AnimationSet,
        events: &mut EventQueue<PlayerEvent>,
    ) {
        self.body.direction.x = input.horizontal();
        if self.body.direction.x > 0.0 {
            self.set_orientation(Orientation::Right, animations);
        } else if self.body.direction.x < 0.0 {
            self.set_orientation(Orientation::Left, animations);
        }

        if input.contains(FrameInput::UP) && self.body.grounded() {
            self.jump();
            events.send(PlayerEvent::Jumped { at: self.body.rect.mid_bottom() });
        }

        if input.contains(FrameInput::SHOOT) {
            self.try_shoot(BULLET_SPEED, now);
        }
    }

    /// Turning re-fits the rect to the current frame at its top-left
    fn set_orientation(&mut self, orientation: Orientation, animations: &AnimationSet) {
        self.body.orientation = orientation;
        let frame = animations.get(self.state.animation());
        self.body.rect = self.body.rect.resized_at(Anchor::TopLeft, frame.width, frame.height);
    }

    pub fn jump(&mut self) {
        self.body.direction.y = PLAYER_JUMP;
    }

    fn animate(&mut self, animations: &AnimationSet) {
        let frame = animations.get(self.state.animation());
        self.body.frame_index = advance_looping(self.body.frame_index, PLAYER_ANIMATION_SPEED, frame.frames);
        edge_snap(&mut self.body, frame);
    }

    fn run_dust_animation(&mut self, animations: &AnimationSet) {
        if let Some(dust) = &mut self.run_dust {
            if !dust.animate() {
                self.run_dust = None;
            }
        }

        if self.state == PlayerState::Run && self.body.grounded() && self.run_dust.is_none() {
            let foot = match self.body.orientation {
                Orientation::Right => self.body.rect.bottom_left(),
                Orientation::Left => self.body.rect.bottom_right(),
            };
            let flip = self.body.orientation.flip_x();
            self.run_dust = Some(
                ParticleEffect::spawn(ParticleKind::RunDust, foot - RUN_DUST_OFFSET, animations).flipped(flip),
            );
        }
    }

    /// Camera pan for everything the player owns that lives in the world
    pub fn shift_world(&mut self, dx: f32) {
        for bullet in &mut self.shooter.bullets {
            bullet.shift(dx);
        }
        if let Some(dust) = &mut self.run_dust {
            dust.rect.x += dx;
        }
    }

    /// Frame to draw for the current state
    pub fn frame(&self) -> usize {
        self.body.frame_index as usize
    }

    pub fn collisions(&self) -> Collisions {
        self.body.collisions
    }
}

impl Movable for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> CharacterKind {
        CharacterKind::Player
    }
}

impl Shooting for Player {
    fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    fn shooter_mut(&mut self) -> &mut Shooter {
        &mut self.shooter
    }

    fn muzzle(&self) -> (f32, f32, Orientation) {
        (self.body.rect.center_x(), self.body.rect.center_y(), self.body.orientation)
    }
}
