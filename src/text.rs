//! Bitmap Text Rendering
//!
//! Text is drawn from a pixel-art glyph sheet. The sheet is sliced once into
//! one image per character, each glyph's alpha is snapped to fully opaque or
//! fully transparent (no soft edges), and strings are composed into a single
//! `PixelBuffer` at an integer scale.

use crate::config::FontConfig;
use crate::pixels::PixelBuffer;
use std::collections::HashMap;

/// A pre-sliced bitmap font
///
/// # Example
///
/// ```rust
/// let font = BitmapFont::from_sheet(&sheet, &config.font);
/// let title = font.render("Capture the flag", 3.0, 3);
/// ```
pub struct BitmapFont {
    glyph_width: u32,
    glyph_height: u32,
    glyphs: HashMap<char, PixelBuffer>,
}

impl BitmapFont {
    /// Slices `sheet` row by row, assigning glyphs in `grid.chars` order
    ///
    /// Slicing stops once every character has a glyph, so a sheet with spare
    /// cells is fine. Cells that overrun the sheet are clipped.
    pub fn from_sheet(sheet: &PixelBuffer, grid: &FontConfig) -> Self {
        let mut glyphs = HashMap::new();
        let mut chars = grid.chars.chars();
        let padding = grid.padding.max(0);

        'rows: for row in 0..grid.rows as i32 {
            for col in 0..grid.cols as i32 {
                let Some(ch) = chars.next() else {
                    break 'rows;
                };

                let x = grid.margin_x + col * (grid.glyph_width as i32 + grid.spacing_x) - padding;
                let y = grid.margin_y + row * (grid.glyph_height as i32 + grid.spacing_y) - padding;
                let x = x.max(0);
                let y = y.max(0);
                let w = (grid.glyph_width as i32 + 2 * padding).min(sheet.width() as i32 - x);
                let h = (grid.glyph_height as i32 + 2 * padding).min(sheet.height() as i32 - y);

                let mut glyph = sheet.crop(x, y, w.max(0) as u32, h.max(0) as u32);
                glyph.binarize_alpha(grid.alpha_threshold);
                glyphs.insert(ch, glyph);
            }
        }

        BitmapFont {
            glyph_width: grid.glyph_width,
            glyph_height: grid.glyph_height,
            glyphs,
        }
    }

    /// A font with no glyphs; every character renders as a blank cell
    pub fn empty(glyph_width: u32, glyph_height: u32) -> Self {
        BitmapFont {
            glyph_width,
            glyph_height,
            glyphs: HashMap::new(),
        }
    }

    pub fn glyph(&self, ch: char) -> Option<&PixelBuffer> {
        self.glyphs.get(&ch)
    }

    /// Output size of `render` without drawing anything
    pub fn measure(&self, text: &str, scale: f32, letter_spacing: u32) -> (u32, u32) {
        let s = int_scale(scale);
        let cell = self.glyph_width * s + letter_spacing * s;
        let count = text.to_uppercase().chars().count() as u32;
        ((cell * count).max(1), self.glyph_height * s)
    }

    /// Renders `text` (case-insensitive) into one image
    ///
    /// `scale` is rounded to a whole number (minimum 1). Every character takes
    /// a cell of `glyph_width * scale + letter_spacing * scale` pixels, so
    /// characters missing from the sheet show up as blank space of the same
    /// width rather than collapsing the string.
    pub fn render(&self, text: &str, scale: f32, letter_spacing: u32) -> PixelBuffer {
        let s = int_scale(scale);
        let gw = self.glyph_width * s;
        let gh = self.glyph_height * s;
        let advance = gw + letter_spacing * s;

        let (width, height) = self.measure(text, scale, letter_spacing);
        let mut out = PixelBuffer::new(width, height);

        let mut x = 0i32;
        for ch in text.to_uppercase().chars() {
            if let Some(glyph) = self.glyph(ch) {
                out.draw(&glyph.scaled_nearest(gw, gh), x, 0);
            }
            x += advance as i32;
        }
        out
    }
}

fn int_scale(scale: f32) -> u32 {
    (scale.round() as i64).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::pixels::Color;

    /// Two 2x2 glyphs ("A" solid, "B" one faint pixel) with a 1px margin and gap
    fn tiny_font() -> BitmapFont {
        let mut sheet = PixelBuffer::new(6, 4);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            sheet.set_pixel(x, y, Color::RGBA(255, 255, 255, 200));
        }
        sheet.set_pixel(4, 1, Color::RGBA(255, 0, 0, 40));
        sheet.set_pixel(5, 2, Color::RGBA(255, 0, 0, 255));

        let grid = FontConfig {
            chars: "AB".to_string(),
            glyph_width: 2,
            glyph_height: 2,
            cols: 2,
            rows: 1,
            margin_x: 1,
            margin_y: 1,
            spacing_x: 1,
            spacing_y: 1,
            alpha_threshold: 128,
            padding: 0,
            letter_spacing: 1,
        };
        BitmapFont::from_sheet(&sheet, &grid)
    }

    #[test]
    fn test_glyphs_are_binarized() {
        let font = tiny_font();
        let a = font.glyph('A').unwrap();
        assert_eq!(a.size(), (2, 2));
        assert_eq!(a.pixel(0, 0), Some(Color::RGBA(255, 255, 255, 255)));

        let b = font.glyph('B').unwrap();
        assert_eq!(b.pixel(0, 0).unwrap().a, 0);
        assert_eq!(b.pixel(1, 1).unwrap().a, 255);
    }

    #[test]
    fn test_render_width_is_sum_of_cells() {
        let font = tiny_font();
        let img = font.render("AB", 2.0, 1);
        // (2 * 2 + 1 * 2) per char
        assert_eq!(img.size(), (12, 4));
        assert_eq!(img.pixel(3, 3).unwrap().a, 255);
        // spacing column after "A"
        assert_eq!(img.pixel(4, 0).unwrap().a, 0);
    }

    #[test]
    fn test_unknown_character_is_blank_cell() {
        let font = tiny_font();
        let img = font.render("?", 3.0, 0);
        assert_eq!(img.size(), (6, 6));
        assert!(img.is_blank());

        let mixed = font.render("A?A", 1.0, 0);
        assert_eq!(mixed.size(), (6, 2));
        assert!(mixed.crop(2, 0, 2, 2).is_blank());
        assert_eq!(mixed.pixel(4, 0).unwrap().a, 255);
    }

    #[test]
    fn test_render_is_case_insensitive() {
        let font = tiny_font();
        assert_eq!(font.render("ab", 1.0, 0), font.render("AB", 1.0, 0));
    }

    #[test]
    fn test_scale_rounds_and_clamps() {
        let font = tiny_font();
        assert_eq!(font.measure("A", 2.6, 0), (6, 6));
        assert_eq!(font.measure("A", 0.2, 0), (2, 2));
    }

    #[test]
    fn test_empty_text_is_one_pixel_wide() {
        let font = tiny_font();
        assert_eq!(font.render("", 2.0, 3).size(), (1, 4));
    }

    #[test]
    fn test_empty_font_renders_blank_cells() {
        let font = BitmapFont::empty(6, 8);
        let img = font.render("PLAY", 1.0, 0);
        assert_eq!(img.size(), (24, 8));
        assert!(img.is_blank());
    }
}
