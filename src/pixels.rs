//! CPU-side RGBA image buffer
//!
//! Every image utility the menu needs (sprite slicing, glyph binarising,
//! nearest-neighbour scaling, compositing, blur pre-processing) works on
//! `PixelBuffer` so it can run and be tested without an SDL renderer.
//! `render.rs` turns buffers into textures at draw time.

use crate::error::LoadError;
use sdl2::pixels::Color;

/// Bytes per pixel (R, G, B, A)
const BPP: usize = 4;

/// Largest downscale factor used for the blur effect
const MAX_BLUR_FACTOR: u32 = 16;

/// An owned, row-major RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a fully transparent buffer
    pub fn new(width: u32, height: u32) -> Self {
        PixelBuffer {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        }
    }

    /// Creates a buffer filled with a single colour
    #[cfg(test)]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * BPP);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        PixelBuffer { width, height, data }
    }

    /// Wraps raw RGBA bytes, checking they match the dimensions
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, LoadError> {
        let expected = width as usize * height as usize * BPP;
        if data.len() != expected {
            return Err(LoadError::Format {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row length in bytes
    pub fn pitch(&self) -> u32 {
        self.width * BPP as u32
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BPP
    }

    /// Returns the pixel at (x, y), or `None` outside the buffer
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Color::RGBA(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Writes a pixel; writes outside the buffer are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + BPP].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// True if every pixel has zero alpha
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(BPP).all(|px| px[3] == 0)
    }

    /// Copies a `width` x `height` region starting at (x, y)
    ///
    /// Parts of the region that fall outside the buffer come out transparent,
    /// so a badly measured sheet gives a partially empty frame instead of a
    /// panic.
    pub fn crop(&self, x: i32, y: i32, width: u32, height: u32) -> PixelBuffer {
        let mut out = PixelBuffer::new(width, height);
        for dy in 0..height {
            let sy = y + dy as i32;
            if sy < 0 || sy >= self.height as i32 {
                continue;
            }
            for dx in 0..width {
                let sx = x + dx as i32;
                if sx < 0 || sx >= self.width as i32 {
                    continue;
                }
                let src = self.offset(sx as u32, sy as u32);
                let dst = out.offset(dx, dy);
                out.data[dst..dst + BPP].copy_from_slice(&self.data[src..src + BPP]);
            }
        }
        out
    }

    /// Forces every alpha value to 0 or 255
    ///
    /// Alpha at or above `threshold` becomes opaque; everything else becomes
    /// transparent. Colour channels are left alone.
    pub fn binarize_alpha(&mut self, threshold: u8) {
        for px in self.data.chunks_exact_mut(BPP) {
            px[3] = if px[3] >= threshold { 255 } else { 0 };
        }
    }

    /// Nearest-neighbour resize (pixel art stays crisp)
    pub fn scaled_nearest(&self, width: u32, height: u32) -> PixelBuffer {
        let mut out = PixelBuffer::new(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                let src = self.offset(sx, sy);
                let dst = out.offset(x, y);
                out.data[dst..dst + BPP].copy_from_slice(&self.data[src..src + BPP]);
            }
        }
        out
    }

    /// Composites `src` onto this buffer with its top-left at (x, y)
    ///
    /// Standard "source over" blending; pixels outside the buffer are clipped.
    pub fn draw(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        for sy in 0..src.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let s = src.offset(sx, sy);
                let src_px = &src.data[s..s + BPP];
                let sa = src_px[3] as u32;
                if sa == 0 {
                    continue;
                }
                let d = self.offset(dx as u32, dy as u32);
                if sa == 255 {
                    self.data[d..d + BPP].copy_from_slice(src_px);
                    continue;
                }
                let da = self.data[d + 3] as u32;
                let out_a = sa + da * (255 - sa) / 255;
                for c in 0..3 {
                    let sc = src_px[c] as u32;
                    let dc = self.data[d + c] as u32;
                    let blended = (sc * sa + dc * da * (255 - sa) / 255) / out_a.max(1);
                    self.data[d + c] = blended.min(255) as u8;
                }
                self.data[d + 3] = out_a.min(255) as u8;
            }
        }
    }

    /// Box-filtered downsample to `width` x `height`
    ///
    /// Each output pixel averages the source pixels it covers, weighting
    /// colour by alpha so transparent neighbours don't darken edges. When the
    /// target is larger than the source this degenerates to nearest sampling.
    pub fn downsampled(&self, width: u32, height: u32) -> PixelBuffer {
        let width = width.max(1);
        let height = height.max(1);
        let mut out = PixelBuffer::new(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        let (sw, sh) = (self.width as u64, self.height as u64);
        for ty in 0..height as u64 {
            let y0 = ty * sh / height as u64;
            let y1 = ((ty + 1) * sh).div_ceil(height as u64).max(y0 + 1).min(sh);
            for tx in 0..width as u64 {
                let x0 = tx * sw / width as u64;
                let x1 = ((tx + 1) * sw).div_ceil(width as u64).max(x0 + 1).min(sw);

                let mut sum = [0u64; 4];
                let mut count = 0u64;
                for sy in y0..y1 {
                    for sx in x0..x1 {
                        let i = self.offset(sx as u32, sy as u32);
                        let a = self.data[i + 3] as u64;
                        sum[0] += self.data[i] as u64 * a;
                        sum[1] += self.data[i + 1] as u64 * a;
                        sum[2] += self.data[i + 2] as u64 * a;
                        sum[3] += a;
                        count += 1;
                    }
                }
                let d = out.offset(tx as u32, ty as u32);
                if sum[3] > 0 {
                    out.data[d] = (sum[0] / sum[3]) as u8;
                    out.data[d + 1] = (sum[1] / sum[3]) as u8;
                    out.data[d + 2] = (sum[2] / sum[3]) as u8;
                }
                out.data[d + 3] = (sum[3] / count.max(1)) as u8;
            }
        }
        out
    }

    /// Creates a `2r` x `2r` buffer with a filled circle of radius `r`
    pub fn circle(radius: u32, color: Color) -> PixelBuffer {
        let size = radius * 2;
        let mut out = PixelBuffer::new(size, size);
        let r = radius as f32;
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                if dx * dx + dy * dy <= r * r {
                    out.set_pixel(x, y, color);
                }
            }
        }
        out
    }
}

/// Size of the intermediate image used to blur a `width` x `height` area
///
/// The blur is "shrink then stretch back with linear filtering", so the blur
/// strength is the shrink factor, clamped to 1..=16.
pub fn blur_size(width: u32, height: u32, radius: u32) -> (u32, u32) {
    let factor = radius.clamp(1, MAX_BLUR_FACTOR);
    ((width / factor).max(1), (height / factor).max(1))
}
