//! Asset loading and per-asset fallbacks
//!
//! Loads happen once, before the menu loop starts. A failed load never stops
//! the menu: each asset class has its own fallback, chosen explicitly here.

use crate::config::{ButtonSpriteConfig, MenuConfig, StateSprite};
use crate::error::LoadError;
use crate::gui::{ButtonArt, ButtonSkin};
use crate::pixels::PixelBuffer;
use crate::sprite::FrameSize;
use crate::text::BitmapFont;
use log::{debug, info, warn};
use sdl2::image::LoadSurface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::surface::Surface;
use std::path::Path;

/// Frame size for buttons that have no sprite configuration
pub const DEFAULT_FRAME_SIZE: FrameSize = FrameSize {
    width: 64.5,
    height: 30.0,
};

/// Decodes an image file into RGBA pixels
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelBuffer, LoadError> {
    let path = path.as_ref();
    std::fs::metadata(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decode_error = |message: String| LoadError::Decode {
        path: path.to_path_buf(),
        message,
    };
    let surface = Surface::from_file(path).map_err(decode_error)?;
    let surface = surface
        .convert_format(PixelFormatEnum::RGBA32)
        .map_err(decode_error)?;
    surface_to_buffer(&surface)
}

/// Copies a 32-bit RGBA surface row by row (surface rows may be padded)
fn surface_to_buffer(surface: &Surface) -> Result<PixelBuffer, LoadError> {
    let (width, height) = surface.size();
    let pitch = surface.pitch() as usize;
    let row = width as usize * 4;
    let mut data = Vec::with_capacity(row * height as usize);
    surface.with_lock(|pixels| {
        for y in 0..height as usize {
            data.extend_from_slice(&pixels[y * pitch..y * pitch + row]);
        }
    });
    PixelBuffer::from_rgba(width, height, data)
}

/// Kinds of asset, each with its own fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Background,
    ButtonSheet,
    FontSheet,
    Logo,
}

impl AssetClass {
    /// What the menu shows instead when this asset is missing
    pub fn fallback(&self) -> &'static str {
        match self {
            AssetClass::Background => "drawing a gradient",
            AssetClass::ButtonSheet => "buttons will have no art",
            AssetClass::FontSheet => "text will render blank",
            AssetClass::Logo => "rendering the title text",
        }
    }
}

/// Loads an optional asset, logging and returning `None` on failure
pub fn load_or_fallback(class: AssetClass, path: Option<&Path>) -> Option<PixelBuffer> {
    let Some(path) = path else {
        debug!("{:?} not configured; {}", class, class.fallback());
        return None;
    };
    match load_image(path) {
        Ok(image) => {
            info!("Loaded {:?} from {} ({}x{})", class, path.display(), image.width(), image.height());
            Some(image)
        }
        Err(e) => {
            warn!("{:?}: {}; {}", class, e, class.fallback());
            None
        }
    }
}

/// Everything the menu draws that comes from disk
pub struct MenuAssets {
    /// Pre-scaled to the screen
    pub background: Option<PixelBuffer>,
    /// Pre-scaled to the configured logo size
    pub logo: Option<PixelBuffer>,
    pub button_sheet: Option<PixelBuffer>,
    pub font: BitmapFont,
}

impl MenuAssets {
    pub fn load(config: &MenuConfig) -> Self {
        let assets = &config.assets;
        let screen = (config.window.width, config.window.height);

        let background = load_or_fallback(AssetClass::Background, assets.background_image.as_deref())
            .map(|img| img.scaled_nearest(screen.0, screen.1));

        let logo = load_or_fallback(AssetClass::Logo, assets.logo_image.as_deref())
            .map(|img| img.scaled_nearest(assets.logo_size.0, assets.logo_size.1));

        let button_sheet = load_or_fallback(AssetClass::ButtonSheet, Some(&assets.button_sheet));
        if let Some(sheet) = &button_sheet {
            if sheet.size() != assets.button_sheet_size {
                warn!(
                    "Button sheet is {}x{}, expected {}x{}; frames may be misaligned",
                    sheet.width(),
                    sheet.height(),
                    assets.button_sheet_size.0,
                    assets.button_sheet_size.1
                );
            }
        }

        let font = match load_or_fallback(AssetClass::FontSheet, Some(&assets.font_sheet)) {
            Some(sheet) => BitmapFont::from_sheet(&sheet, &config.font),
            None => BitmapFont::empty(config.font.glyph_width, config.font.glyph_height),
        };

        MenuAssets {
            background,
            logo,
            button_sheet,
            font,
        }
    }

    /// Skin for the button labelled `label`
    pub fn button_skin(&self, label: &str, config: &MenuConfig) -> ButtonSkin {
        skin_from_sheet(self.button_sheet.as_ref(), config.button_sprite(label))
    }
}

/// Slices a button's three states from the sheet
///
/// Missing hover/pressed sprites reuse the previous state's sprite. Without a
/// sheet the art is empty but the scales are kept, so the button keeps the
/// clickable size it would have had.
pub fn skin_from_sheet(sheet: Option<&PixelBuffer>, sprite: Option<&ButtonSpriteConfig>) -> ButtonSkin {
    let Some(sprite) = sprite else {
        return ButtonSkin::blank(DEFAULT_FRAME_SIZE);
    };

    let normal = sprite.normal;
    let hover = sprite.hover.unwrap_or(normal);
    let pressed = sprite.pressed.or(sprite.hover).unwrap_or(normal);

    let art = |state: &str, s: StateSprite| {
        let image = sheet.map(|sheet| s.frame.slice(sheet, sprite.frame_size));
        if let Some(image) = &image {
            info!("{} {} frame: {}x{}", sprite.label, state, image.width(), image.height());
            if image.is_blank() {
                warn!("{} {} frame is fully transparent; check its position on the sheet", sprite.label, state);
            }
        }
        ButtonArt::new(image, s.scale)
    };

    ButtonSkin {
        frame_size: sprite.frame_size,
        normal: art("normal", normal),
        hover: art("hover", hover),
        pressed: art("pressed", pressed),
    }
}
