//! Per-frame input snapshot
//!
//! The frontend samples the keyboard once per frame and hands the level a
//! `FrameInput`. Key bindings live in the frontend.

use bitflags::bitflags;

bitflags! {
    /// Buttons held (or, for `SAVE`, pressed) this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameInput: u8 {
        const LEFT  = 1 << 0;
        const RIGHT = 1 << 1;
        const UP    = 1 << 2;
        const SHOOT = 1 << 3;
        const QUIT  = 1 << 4;
        const SAVE  = 1 << 5;
    }
}

impl FrameInput {
    /// Horizontal direction requested by the keys; right wins over left
    pub fn horizontal(self) -> f32 {
        if self.contains(FrameInput::RIGHT) {
            1.0
        } else if self.contains(FrameInput::LEFT) {
            -1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal() {
        assert_eq!(FrameInput::empty().horizontal(), 0.0);
        assert_eq!(FrameInput::LEFT.horizontal(), -1.0);
        assert_eq!((FrameInput::LEFT | FrameInput::RIGHT).horizontal(), 1.0);
    }
}
