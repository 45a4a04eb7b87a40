/// Title menu render system
///
/// Draws a `MenuScreen` onto an SDL2 canvas in painter's order:
/// background, particles, title, buttons (or the expansion transition),
/// footer hint.
///
/// # Architecture
///
/// - Static art (background, title, hint, button states, particle dots) is
///   uploaded to textures once, when the renderer is built.
/// - Pixel-art scaling happens on the GPU with nearest sampling.
/// - The transition's blur is "shrink on the CPU, stretch back on the GPU
///   with linear sampling", re-uploaded each frame since its size changes.
///
/// # Usage Example
///
/// ```rust
/// let texture_creator = ctx.canvas.texture_creator();
/// let mut renderer = MenuRenderer::new(&texture_creator, &assets, &menu, &layout, &config)?;
/// renderer.draw(&mut ctx.canvas, &menu)?;
/// ctx.canvas.present();
/// ```
use crate::assets::MenuAssets;
use crate::config::MenuConfig;
use crate::easing::lerp_rgb;
use crate::effects::gradient_strip;
use crate::gui::{blur_radius, ButtonState, MenuLayout, MenuScreen};
use crate::pixels::{blur_size, PixelBuffer};
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::surface::Surface;
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;

const SCALE_QUALITY_HINT: &str = "SDL_RENDER_SCALE_QUALITY";

/// Uploads a pixel buffer as an alpha-blended texture
pub fn upload<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    image: &PixelBuffer,
) -> Result<Texture<'a>, String> {
    let mut data = image.data().to_vec();
    let surface = Surface::from_data(
        &mut data,
        image.width(),
        image.height(),
        image.pitch(),
        PixelFormatEnum::RGBA32,
    )?;
    let mut texture = texture_creator
        .create_texture_from_surface(&surface)
        .map_err(|e| e.to_string())?;
    texture.set_blend_mode(BlendMode::Blend);
    Ok(texture)
}

/// Like `upload`, but the texture is sampled linearly when stretched
fn upload_smooth<'a>(
    texture_creator: &'a TextureCreator<WindowContext>,
    image: &PixelBuffer,
) -> Result<Texture<'a>, String> {
    sdl2::hint::set(SCALE_QUALITY_HINT, "1");
    let texture = upload(texture_creator, image);
    sdl2::hint::set(SCALE_QUALITY_HINT, "0");
    texture
}

/// Horizontal spans that make up a filled rounded rectangle
///
/// One full-width band for the straight middle section plus one 1 px row per
/// scanline of the rounded top and bottom edges.
pub fn rounded_rect_rows(rect: Rect, radius: u32) -> Vec<Rect> {
    let r = radius.min(rect.width() / 2).min(rect.height() / 2) as i32;
    let mut rows = Vec::with_capacity(2 * r as usize + 1);

    let middle = rect.height() as i32 - 2 * r;
    if middle > 0 {
        rows.push(Rect::new(rect.x(), rect.y() + r, rect.width(), middle as u32));
    }

    for dy in 0..r {
        // distance from the corner circle's centre to this row's middle
        let v = r as f32 - dy as f32 - 0.5;
        let inset = r - ((r * r) as f32 - v * v).max(0.0).sqrt().round() as i32;
        let width = rect.width() as i32 - 2 * inset;
        if width <= 0 {
            continue;
        }
        rows.push(Rect::new(rect.x() + inset, rect.y() + dy, width as u32, 1));
        rows.push(Rect::new(rect.x() + inset, rect.bottom() - 1 - dy, width as u32, 1));
    }
    rows
}

pub struct MenuRenderer<'a> {
    texture_creator: &'a TextureCreator<WindowContext>,
    screen: (u32, u32),
    background: Option<Texture<'a>>,
    gradient: Texture<'a>,
    headline: Texture<'a>,
    headline_rect: Rect,
    hint: Texture<'a>,
    hint_rect: Rect,
    /// Per button, one texture per `ButtonState`
    buttons: Vec<[Option<Texture<'a>>; 3]>,
    /// White dots keyed by radius; alpha is applied per particle
    dots: HashMap<u32, Texture<'a>>,
    base_color: [u8; 3],
    accent: [u8; 3],
}

impl<'a> MenuRenderer<'a> {
    pub fn new<C>(
        texture_creator: &'a TextureCreator<WindowContext>,
        assets: &MenuAssets,
        menu: &MenuScreen<C>,
        layout: &MenuLayout,
        config: &MenuConfig,
    ) -> Result<Self, String> {
        let screen = menu.screen_size();

        let background = match &assets.background {
            Some(image) => Some(upload(texture_creator, image)?),
            None => None,
        };
        let gradient = upload(
            texture_creator,
            &gradient_strip(screen.1, config.colors.background, config.colors.gradient_bottom),
        )?;

        // A configured logo replaces the rendered title
        let headline_image = match &assets.logo {
            Some(logo) => logo.clone(),
            None => {
                let glyph_w = config.font.glyph_width as f32;
                let scale = (3.0 * glyph_w / 6.0).clamp(2.0, 4.0);
                assets
                    .font
                    .render(&config.window.title, scale, config.font.letter_spacing)
            }
        };
        let headline = upload(texture_creator, &headline_image)?;
        let headline_rect = Rect::from_center(
            layout.title_center(),
            headline_image.width(),
            headline_image.height(),
        );

        let hint_image = assets.font.render(&config.layout.hint, 2.0, 1);
        let mut hint = upload(texture_creator, &hint_image)?;
        let [r, g, b] = config.colors.hint;
        hint.set_color_mod(r, g, b);
        let hint_rect = Rect::from_center(layout.footer_center(), hint_image.width(), hint_image.height());

        let mut buttons = Vec::with_capacity(menu.buttons().len());
        for button in menu.buttons() {
            let mut textures: [Option<Texture<'a>>; 3] = [None, None, None];
            for state in ButtonState::ALL {
                if let Some(image) = &button.art(state).image {
                    textures[state.index()] = Some(upload(texture_creator, image)?);
                }
            }
            buttons.push(textures);
        }

        let mut dots = HashMap::new();
        for particle in menu.particles().particles() {
            if !dots.contains_key(&particle.size) {
                let dot = PixelBuffer::circle(particle.size, Color::RGBA(255, 255, 255, 255));
                dots.insert(particle.size, upload(texture_creator, &dot)?);
            }
        }

        Ok(MenuRenderer {
            texture_creator,
            screen,
            background,
            gradient,
            headline,
            headline_rect,
            hint,
            hint_rect,
            buttons,
            dots,
            base_color: config.colors.background,
            accent: config.colors.accent,
        })
    }

    /// Draws one full menu frame (does not present)
    pub fn draw<C>(&mut self, canvas: &mut Canvas<Window>, menu: &MenuScreen<C>) -> Result<(), String> {
        canvas.set_blend_mode(BlendMode::None);
        canvas.set_draw_color(Color::RGB(0, 0, 0));
        canvas.clear();

        self.draw_background(canvas, menu)?;
        self.draw_particles(canvas, menu)?;
        canvas.copy(&self.headline, None, self.headline_rect)?;

        if menu.is_transitioning() {
            self.draw_expansion(canvas, menu)?;
        } else {
            self.draw_buttons(canvas, menu)?;
        }

        canvas.copy(&self.hint, None, self.hint_rect)?;
        Ok(())
    }

    fn draw_background<C>(&self, canvas: &mut Canvas<Window>, menu: &MenuScreen<C>) -> Result<(), String> {
        let (w, h) = self.screen;
        match &self.background {
            Some(texture) => {
                let background = menu.background();
                let y = background.sway_y();
                for x in background.copy_positions() {
                    canvas.copy(texture, None, Rect::new(x, y, w, h))?;
                }
            }
            None => canvas.copy(&self.gradient, None, Rect::new(0, 0, w, h))?,
        }
        Ok(())
    }

    fn draw_particles<C>(&mut self, canvas: &mut Canvas<Window>, menu: &MenuScreen<C>) -> Result<(), String> {
        for particle in menu.particles().particles() {
            let Some(texture) = self.dots.get_mut(&particle.size) else {
                continue;
            };
            texture.set_alpha_mod(particle.alpha);
            let size = particle.size as f32;
            canvas.copy(
                texture,
                None,
                Rect::new(
                    (particle.pos.0 - size) as i32,
                    (particle.pos.1 - size) as i32,
                    particle.size * 2,
                    particle.size * 2,
                ),
            )?;
        }
        Ok(())
    }

    fn draw_buttons<C>(&self, canvas: &mut Canvas<Window>, menu: &MenuScreen<C>) -> Result<(), String> {
        for (button, textures) in menu.buttons().iter().zip(&self.buttons) {
            let (Some(texture), Some(dest)) = (&textures[button.state().index()], button.art_rect()) else {
                continue;
            };
            canvas.copy(texture, None, dest)?;
        }
        Ok(())
    }

    fn draw_expansion<C>(&self, canvas: &mut Canvas<Window>, menu: &MenuScreen<C>) -> Result<(), String> {
        let Some(expansion) = menu.expansion() else {
            return Ok(());
        };
        let Some(button) = menu.buttons().get(expansion.button()) else {
            return Ok(());
        };
        let config = menu.transition_config();
        let rect = expansion.rect();
        let preview = button.current_art().image.as_ref();

        canvas.set_blend_mode(BlendMode::Blend);

        canvas.set_draw_color(Color::RGBA(0, 0, 0, expansion.shadow_alpha(config.shadow_alpha)));
        canvas.fill_rect(Rect::new(
            rect.x() + config.shadow_offset,
            rect.y() + config.shadow_offset,
            rect.width(),
            rect.height(),
        ))?;

        match preview {
            Some(image) => self.draw_blurred(canvas, image, rect, config.preview_alpha)?,
            None => {
                let [r, g, b] = lerp_rgb(self.base_color, self.accent, expansion.eased());
                canvas.set_draw_color(Color::RGB(r, g, b));
                canvas.fill_rects(&rounded_rect_rows(rect, expansion.corner_radius()))?;
            }
        }

        // 2 px border
        canvas.set_draw_color(Color::RGBA(255, 255, 255, expansion.border_alpha()));
        canvas.draw_rect(rect)?;
        if rect.width() > 2 && rect.height() > 2 {
            canvas.draw_rect(Rect::new(rect.x() + 1, rect.y() + 1, rect.width() - 2, rect.height() - 2))?;
        }

        if let Some(alpha) = expansion.flash_alpha(config) {
            canvas.set_blend_mode(BlendMode::Add);
            canvas.set_draw_color(Color::RGBA(255, 255, 255, alpha));
            canvas.fill_rect(None)?;
            canvas.set_blend_mode(BlendMode::Blend);
        }

        if expansion.is_complete() {
            if let Some(image) = preview {
                let full = Rect::new(0, 0, self.screen.0, self.screen.1);
                self.draw_blurred(canvas, image, full, config.preview_alpha)?;
            }
        }

        canvas.set_blend_mode(BlendMode::None);
        Ok(())
    }

    /// Draws `image` stretched over `dest`, blurred and translucent
    fn draw_blurred(
        &self,
        canvas: &mut Canvas<Window>,
        image: &PixelBuffer,
        dest: Rect,
        alpha: u8,
    ) -> Result<(), String> {
        let radius = blur_radius(dest.width(), dest.height());
        let (w, h) = blur_size(dest.width(), dest.height(), radius);
        let mut texture = upload_smooth(self.texture_creator, &image.downsampled(w, h))?;
        texture.set_alpha_mod(alpha);
        canvas.copy(&texture, None, dest)
    }
}

#[cfg(test)]
mod tests {
    // Drawing needs a live SDL renderer; these cover the pure geometry only.
    use super::*;

    fn covered(rows: &[Rect]) -> u32 {
        rows.iter().map(|r| r.width() * r.height()).sum()
    }

    #[test]
    fn test_rounded_rows_stay_inside_rect() {
        let rect = Rect::new(10, 20, 200, 100);
        for row in rounded_rect_rows(rect, 24) {
            assert!(row.left() >= rect.left() && row.right() <= rect.right());
            assert!(row.top() >= rect.top() && row.bottom() <= rect.bottom());
        }
    }

    #[test]
    fn test_rounded_rows_cover_every_scanline() {
        let rect = Rect::new(0, 0, 200, 100);
        let rows = rounded_rect_rows(rect, 24);
        let mut lines: Vec<i32> = Vec::new();
        for row in &rows {
            lines.extend(row.top()..row.bottom());
        }
        lines.sort();
        lines.dedup();
        assert_eq!(lines.len(), 100);
    }

    #[test]
    fn test_corners_are_cut() {
        let rect = Rect::new(0, 0, 200, 100);
        let area = covered(&rounded_rect_rows(rect, 24));
        assert!(area < 200 * 100);
        // a square corner cut loses well under the full corner squares
        assert!(area > 200 * 100 - 4 * 24 * 24);
    }

    #[test]
    fn test_zero_radius_is_plain_rect() {
        let rect = Rect::new(5, 5, 40, 20);
        assert_eq!(rounded_rect_rows(rect, 0), vec![rect]);
    }

    #[test]
    fn test_radius_clamped_to_small_rect() {
        let rect = Rect::new(0, 0, 4, 4);
        let rows = rounded_rect_rows(rect, 24);
        assert!(covered(&rows) <= 16);
        assert!(!rows.is_empty());
    }
}
