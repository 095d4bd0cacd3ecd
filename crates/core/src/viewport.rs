// Viewport dimensions shared between the resize and draw paths

use crate::engine::FrameTarget;
use std::sync::atomic::{AtomicU64, Ordering};

/// Width and height packed into one atomic word.
///
/// Last write wins; a reader sees either the old pair or the new pair, never
/// a mix of both.
#[derive(Debug, Default)]
pub struct Viewport {
    packed: AtomicU64,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, width: i32, height: i32) {
        self.packed.store(pack(width, height), Ordering::Release);
    }

    pub fn get(&self) -> (i32, i32) {
        unpack(self.packed.load(Ordering::Acquire))
    }

    /// Target for drawing into the window surface at the current size
    pub fn frame_target(&self) -> FrameTarget {
        let (width, height) = self.get();
        FrameTarget {
            fbo: 0,
            width,
            height,
            flip_y: true,
        }
    }
}

fn pack(width: i32, height: i32) -> u64 {
    ((width as u32 as u64) << 32) | (height as u32 as u64)
}

fn unpack(packed: u64) -> (i32, i32) {
    ((packed >> 32) as u32 as i32, packed as u32 as i32)
}
