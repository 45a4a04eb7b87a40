//! Sprite sheet frame addressing
//!
//! Button art lives on a shared sheet. Some states line up with the sheet's
//! grid and some are offset by a pixel or two, so a frame is described by a
//! single `SpriteFrame` that is either grid-indexed or pixel-indexed.

use crate::pixels::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Size of one frame on the sheet
///
/// Stored as floats because some sheets have a fractional grid stride
/// (e.g. 64.5 px); the sliced frame itself is truncated to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        FrameSize { width, height }
    }

    /// Whole-pixel size of a sliced frame
    pub fn pixels(&self) -> (u32, u32) {
        (self.width.max(0.0) as u32, self.height.max(0.0) as u32)
    }
}

/// Where a frame sits on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpriteFrame {
    /// Column/row on a grid whose cells are one frame in size
    Grid { col: u32, row: u32 },
    /// Top-left corner in sheet pixels
    Pixel { x: i32, y: i32 },
}

/// A resolved source rectangle on the sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    /// Copies this frame out of the sheet
    pub fn slice(&self, sheet: &PixelBuffer) -> PixelBuffer {
        sheet.crop(self.x, self.y, self.width, self.height)
    }
}

impl SpriteFrame {
    /// Resolves the descriptor to a pixel rectangle for frames of `size`
    pub fn resolve(&self, size: FrameSize) -> Frame {
        let (width, height) = size.pixels();
        match *self {
            SpriteFrame::Grid { col, row } => Frame::new(
                (col as f32 * size.width) as i32,
                (row as f32 * size.height) as i32,
                width,
                height,
            ),
            SpriteFrame::Pixel { x, y } => Frame::new(x, y, width, height),
        }
    }

    /// Resolves and slices in one step
    pub fn slice(&self, sheet: &PixelBuffer, size: FrameSize) -> PixelBuffer {
        self.resolve(size).slice(sheet)
    }
}
