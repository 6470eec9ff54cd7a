//! macroquad implementation of the level's `Canvas`

use macroquad::color::{Color, GOLD, GRAY, LIGHTGRAY, RED, SKYBLUE, WHITE, YELLOW};
use macroquad::math::vec2;
use macroquad::shapes::draw_rectangle;
use macroquad::texture::{draw_texture_ex, DrawTextureParams, Texture2D};
use planetes::game::{AnimationId, Canvas, SpriteRef, TileKind};
use planetes::geometry::Rect;
use super::SpriteLibrary;

pub struct MacroquadCanvas<'a> {
    sprites: &'a SpriteLibrary,
}

impl<'a> MacroquadCanvas<'a> {
    pub fn new(sprites: &'a SpriteLibrary) -> Self {
        Self { sprites }
    }

    fn texture(&self, sprite: SpriteRef) -> Option<&'a Texture2D> {
        match sprite {
            SpriteRef::Tile(kind) => self.sprites.tile(kind),
            SpriteRef::Player(id, frame) | SpriteRef::Particle(id, frame) => self.sprites.frame(id, frame),
            SpriteRef::Enemy(frame) => self.sprites.frame(AnimationId::EnemyWalk, frame),
            SpriteRef::Bullet => self.sprites.bullet(),
        }
    }
}

/// Flat color when a sprite has no art; `None` means draw nothing
fn fallback_color(sprite: SpriteRef) -> Option<Color> {
    match sprite {
        SpriteRef::Tile(TileKind::Wall) => Some(GRAY),
        SpriteRef::Tile(TileKind::Coin) => Some(GOLD),
        // Hazards and enemy floors are invisible
        SpriteRef::Tile(TileKind::Hazard | TileKind::EnemyFloor) => None,
        SpriteRef::Player(..) => Some(SKYBLUE),
        SpriteRef::Enemy(_) => Some(RED),
        SpriteRef::Particle(..) => Some(LIGHTGRAY),
        SpriteRef::Bullet => Some(YELLOW),
    }
}

impl Canvas for MacroquadCanvas<'_> {
    fn draw(&mut self, sprite: SpriteRef, rect: Rect, flip_x: bool) {
        if let SpriteRef::Tile(TileKind::Hazard | TileKind::EnemyFloor) = sprite {
            return;
        }
        match self.texture(sprite) {
            Some(texture) => draw_texture_ex(
                texture,
                rect.x,
                rect.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(rect.w, rect.h)),
                    flip_x,
                    ..Default::default()
                },
            ),
            None => {
                if let Some(color) = fallback_color(sprite) {
                    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
                }
            }
        }
    }
}
