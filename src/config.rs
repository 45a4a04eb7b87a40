//! Menu configuration
//!
//! Everything tunable about the menu lives in `MenuConfig`. It is loaded from
//! JSON (every field optional, missing fields take the built-in defaults) and
//! falls back to the defaults entirely if no file is found or it fails to
//! parse.

use crate::error::ConfigError;
use crate::sprite::{FrameSize, SpriteFrame};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-relative default location, next to the other asset configs
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/menu.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub window: WindowConfig,
    pub colors: ColorConfig,
    pub layout: LayoutConfig,
    pub assets: AssetConfig,
    pub font: FontConfig,
    pub buttons: Vec<ButtonSpriteConfig>,
    pub background: BackgroundConfig,
    pub particles: ParticleConfig,
    pub transition: TransitionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub caption: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Gradient top and base colour of the transition fallback
    pub background: [u8; 3],
    /// Gradient bottom
    pub gradient_bottom: [u8; 3],
    /// Transition fallback target colour
    pub accent: [u8; 3],
    pub hint: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub button_width: u32,
    pub button_height: u32,
    pub button_padding: u32,
    /// Panel top to the first button centre
    pub button_block_top_offset: i32,
    /// Gap between consecutive button rectangles
    pub button_spacing: i32,
    /// Panel top to the title centre
    pub title_offset: i32,
    /// Panel bottom to the footer hint centre
    pub footer_offset: i32,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub background_image: Option<PathBuf>,
    pub logo_image: Option<PathBuf>,
    pub logo_size: (u32, u32),
    pub button_sheet: PathBuf,
    /// Expected sheet size; a mismatch is logged, not fatal
    pub button_sheet_size: (u32, u32),
    pub font_sheet: PathBuf,
}

/// Glyph grid geometry of the bitmap font sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub chars: String,
    pub glyph_width: u32,
    pub glyph_height: u32,
    pub cols: u32,
    pub rows: u32,
    pub margin_x: i32,
    pub margin_y: i32,
    pub spacing_x: i32,
    pub spacing_y: i32,
    pub alpha_threshold: u8,
    pub padding: i32,
    pub letter_spacing: u32,
}

/// One visual state of a button: where it is on the sheet and how big to draw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSprite {
    pub frame: SpriteFrame,
    pub scale: u32,
}

/// Sprite definition for the button whose label matches `label` (case-insensitive)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSpriteConfig {
    pub label: String,
    pub frame_size: FrameSize,
    pub normal: StateSprite,
    pub hover: Option<StateSprite>,
    pub pressed: Option<StateSprite>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Horizontal scroll speed in px/s
    pub scroll_speed: f32,
    pub sway_amplitude: f32,
    /// Sway cycles per second
    pub sway_frequency: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Distance past the screen edge before a particle wraps
    pub wrap_margin: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Seconds from trigger to hand-off
    pub duration: f32,
    /// Final rectangle size relative to the screen
    pub overscan: f32,
    /// Velocity multiplier applied to particles when the transition starts
    pub particle_boost: f32,
    /// Extra speed factor for particles while expanding
    pub particle_speedup: f32,
    /// Outward push in px/s at full progress
    pub push_strength: f32,
    /// Progress after which the white flash fades in
    pub flash_start: f32,
    pub flash_max_alpha: u8,
    pub shadow_offset: i32,
    pub shadow_alpha: u8,
    pub preview_alpha: u8,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            window: WindowConfig::default(),
            colors: ColorConfig::default(),
            layout: LayoutConfig::default(),
            assets: AssetConfig::default(),
            font: FontConfig::default(),
            buttons: default_buttons(),
            background: BackgroundConfig::default(),
            particles: ParticleConfig::default(),
            transition: TransitionConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1550,
            height: 900,
            fps: 60,
            caption: "Game Menu".to_string(),
            title: "CAPTURE THE FLAG".to_string(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            background: [18, 18, 30],
            gradient_bottom: [10, 20, 40],
            accent: [255, 200, 60],
            hint: [200, 200, 210],
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            button_width: 420,
            button_height: 72,
            button_padding: 56,
            button_block_top_offset: 220,
            button_spacing: 48,
            title_offset: 60,
            footer_offset: 28,
            hint: "Use arrow keys or mouse. Press Enter to select.".to_string(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            background_image: Some(PathBuf::from("assets/Background/jungle.png")),
            logo_image: None,
            logo_size: (300, 120),
            button_sheet: PathBuf::from("assets/Menu/Buttons/Green_Button.png"),
            button_sheet_size: (768, 416),
            font_sheet: PathBuf::from("assets/Menu/Text/Text_Font.png"),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        FontConfig {
            chars: "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,:?!()+-".to_string(),
            glyph_width: 6,
            glyph_height: 8,
            cols: 10,
            rows: 5,
            margin_x: 1,
            margin_y: 1,
            spacing_x: 2,
            spacing_y: 2,
            alpha_threshold: 128,
            padding: 0,
            letter_spacing: 3,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig {
            scroll_speed: 100.0,
            sway_amplitude: 0.0,
            sway_frequency: 0.0,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            count: 28,
            wrap_margin: 20.0,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        TransitionConfig {
            duration: 1.2,
            overscan: 1.02,
            particle_boost: 1.6,
            particle_speedup: 2.2,
            push_strength: 30.0,
            flash_start: 0.85,
            flash_max_alpha: 120,
            shadow_offset: 8,
            shadow_alpha: 120,
            preview_alpha: 128,
        }
    }
}

/// Sprite layout of the bundled Green_Button sheet
fn default_buttons() -> Vec<ButtonSpriteConfig> {
    vec![
        ButtonSpriteConfig {
            label: "play".to_string(),
            frame_size: FrameSize::new(64.5, 30.0),
            normal: StateSprite {
                frame: SpriteFrame::Grid { col: 0, row: 0 },
                scale: 3,
            },
            hover: Some(StateSprite {
                frame: SpriteFrame::Grid { col: 2, row: 0 },
                scale: 3,
            }),
            pressed: Some(StateSprite {
                frame: SpriteFrame::Grid { col: 0, row: 6 },
                scale: 0,
            }),
        },
        ButtonSpriteConfig {
            label: "exit".to_string(),
            frame_size: FrameSize::new(62.0, 30.0),
            normal: StateSprite {
                frame: SpriteFrame::Pixel { x: 1, y: 193 },
                scale: 3,
            },
            hover: Some(StateSprite {
                frame: SpriteFrame::Pixel { x: 129, y: 192 },
                scale: 3,
            }),
            pressed: Some(StateSprite {
                frame: SpriteFrame::Grid { col: 1, row: 6 },
                scale: 3,
            }),
        },
    ]
}

impl MenuConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Places a config file may live, in priority order
    pub fn candidate_paths(explicit: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(path) = explicit {
            paths.push(path);
        }
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("title_menu").join("menu.json"));
        }
        paths.push(PathBuf::from(DEFAULT_CONFIG_PATH));
        paths
    }

    /// Loads the first config that exists, or the defaults
    ///
    /// An explicit path that is missing or broken is reported but does not
    /// stop the menu from starting.
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit.as_ref().filter(|p| !p.exists()) {
            warn!("Config file {} not found", path.display());
        }

        let Some(path) = Self::candidate_paths(explicit)
            .into_iter()
            .find(|p| p.exists())
        else {
            info!("No menu config found, using defaults");
            return Self::default();
        };

        match Self::load_from_file(&path) {
            Ok(config) => {
                info!("Loaded menu config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Sprite definition for a button label, if any
    pub fn button_sprite(&self, label: &str) -> Option<&ButtonSpriteConfig> {
        let label = label.to_lowercase();
        self.buttons.iter().find(|b| b.label.to_lowercase() == label)
    }
}
