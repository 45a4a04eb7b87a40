//! Button Expansion Transition
//!
//! When a deferred button fires, its rectangle grows (eased) until it covers
//! the screen. Only once that has finished does the menu run the button's
//! action, so entering the game never cuts in abruptly.
//!
//! This type only tracks time and geometry; `render.rs` decides how to draw
//! each frame from the values exposed here.

use crate::config::TransitionConfig;
use crate::easing::{expand_ease, lerp2};
use sdl2::rect::{Point, Rect};

/// Divisor mapping the expanding rectangle's diagonal to a blur radius
const BLUR_DIAGONAL_STEP: f32 = 120.0;
const MIN_BLUR_RADIUS: u32 = 2;
const MAX_BLUR_RADIUS: u32 = 18;

/// Peak alpha of the fading border
const BORDER_ALPHA: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Expansion {
    button: usize,
    start: Rect,
    screen: (u32, u32),
    elapsed: f32,
    duration: f32,
    overscan: f32,
}

impl Expansion {
    /// Starts expanding button `button` from its collision rect `start`
    pub fn new(button: usize, start: Rect, screen: (u32, u32), config: &TransitionConfig) -> Self {
        Expansion {
            button,
            start,
            screen,
            elapsed: 0.0,
            duration: config.duration,
            overscan: config.overscan,
        }
    }

    /// Index of the button that triggered the transition
    pub fn button(&self) -> usize {
        self.button
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Linear progress `t` in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Eased progress `e` in [0, 1]
    pub fn eased(&self) -> f32 {
        expand_ease(self.progress())
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Centre of the expanding rectangle
    pub fn center(&self) -> (f32, f32) {
        self.center_at(self.eased())
    }

    pub fn rect(&self) -> Rect {
        self.rect_at(self.eased())
    }

    fn center_at(&self, e: f32) -> (f32, f32) {
        let start = self.start.center();
        lerp2(
            (start.x() as f32, start.y() as f32),
            (self.screen.0 as f32 / 2.0, self.screen.1 as f32 / 2.0),
            e,
        )
    }

    /// Rectangle at eased progress `e`
    ///
    /// Centre and size both interpolate from the button to the full screen
    /// (times the overscan factor, so no edge peeks through).
    pub fn rect_at(&self, e: f32) -> Rect {
        let (cx, cy) = self.center_at(e);
        let (w, h) = lerp2(
            (self.start.width() as f32, self.start.height() as f32),
            (
                self.screen.0 as f32 * self.overscan,
                self.screen.1 as f32 * self.overscan,
            ),
            e,
        );
        Rect::from_center(
            Point::new(cx as i32, cy as i32),
            (w.round() as u32).max(1),
            (h.round() as u32).max(1),
        )
    }

    /// Drop shadow alpha, growing with progress
    pub fn shadow_alpha(&self, max_alpha: u8) -> u8 {
        (max_alpha as f32 * self.eased()) as u8
    }

    /// Border alpha, fading out with progress
    pub fn border_alpha(&self) -> u8 {
        (BORDER_ALPHA * (1.0 - self.eased())) as u8
    }

    /// Corner radius of the plain-colour fallback rectangle
    pub fn corner_radius(&self) -> u32 {
        let e = self.eased();
        ((24.0 * (1.0 - (1.0 - e) * 0.8)) as u32).max(6)
    }

    /// Alpha of the additive white flash, once past `config.flash_start`
    pub fn flash_alpha(&self, config: &TransitionConfig) -> Option<u8> {
        let t = self.progress();
        if t <= config.flash_start {
            return None;
        }
        let ramp = (1.0 - config.flash_start).max(f32::EPSILON);
        let alpha = 255.0 * (t - config.flash_start) / ramp;
        Some(alpha.min(config.flash_max_alpha as f32) as u8)
    }
}

/// Blur strength for an area, growing with its diagonal
pub fn blur_radius(width: u32, height: u32) -> u32 {
    let diagonal = ((width as f32).powi(2) + (height as f32).powi(2)).sqrt();
    ((diagonal / BLUR_DIAGONAL_STEP) as u32).clamp(MIN_BLUR_RADIUS, MAX_BLUR_RADIUS)
}
