//! Keyboard mapping
//!
//! Right/Left walk, Up jumps, Space shoots, S saves, Escape quits.
//! Save is edge-triggered so holding S writes once.

use macroquad::prelude::{is_key_down, is_key_pressed, KeyCode};
use planetes::game::FrameInput;

const HELD: [(KeyCode, FrameInput); 5] = [
    (KeyCode::Right, FrameInput::RIGHT),
    (KeyCode::Left, FrameInput::LEFT),
    (KeyCode::Up, FrameInput::UP),
    (KeyCode::Space, FrameInput::SHOOT),
    (KeyCode::Escape, FrameInput::QUIT),
];

pub fn read_input() -> FrameInput {
    let mut input = HELD
        .iter()
        .filter(|(key, _)| is_key_down(*key))
        .fold(FrameInput::empty(), |acc, (_, flag)| acc | *flag);

    if is_key_pressed(KeyCode::S) {
        input |= FrameInput::SAVE;
    }
    input
}
