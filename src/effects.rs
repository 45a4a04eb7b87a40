//! Decorative background and particle effects
//!
//! Nothing here reacts to input. The menu advances these every frame and the
//! expansion transition speeds particles up and pushes them outward.

use crate::easing::lerp_rgb;
use crate::pixels::PixelBuffer;
use rand::Rng;
use sdl2::pixels::Color;
use std::f32::consts::PI;

/// A single floating dot
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: (f32, f32),
    pub vel: (f32, f32),
    /// Radius in pixels
    pub size: u32,
    pub alpha: u8,
}

impl Particle {
    /// Random particle somewhere on a `width` x `height` screen
    pub fn random(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Particle {
            pos: (rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
            vel: (rng.gen_range(-10.0..10.0), rng.gen_range(-6.0..6.0)),
            size: rng.gen_range(2..6),
            alpha: rng.gen_range(30..110),
        }
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: (f32, f32),
    margin: f32,
    boost: f32,
}

impl ParticleField {
    pub fn new(particles: Vec<Particle>, bounds: (f32, f32), margin: f32) -> Self {
        ParticleField {
            particles,
            bounds,
            margin,
            boost: 1.0,
        }
    }

    pub fn spawn(count: usize, bounds: (f32, f32), margin: f32, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(bounds.0.max(1.0), bounds.1.max(1.0), rng))
            .collect();
        ParticleField::new(particles, bounds, margin)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Multiplies every particle's velocity until `reset_boost`
    pub fn boost(&mut self, factor: f32) {
        self.boost *= factor;
    }

    pub fn reset_boost(&mut self) {
        self.boost = 1.0;
    }

    #[cfg(test)]
    pub fn current_boost(&self) -> f32 {
        self.boost
    }

    /// Moves every particle by its velocity, wrapping at the screen edges
    ///
    /// `speedup` scales this frame's movement on top of the boost.
    pub fn update(&mut self, dt: f32, speedup: f32) {
        let step = dt * speedup * self.boost;
        for p in &mut self.particles {
            p.pos.0 += p.vel.0 * step;
            p.pos.1 += p.vel.1 * step;
        }
        self.wrap();
    }

    /// Pushes particles radially away from `center` by `strength * dt` px
    ///
    /// A particle sitting exactly on the centre gets a random direction.
    pub fn push_from(&mut self, center: (f32, f32), strength: f32, dt: f32, rng: &mut impl Rng) {
        for p in &mut self.particles {
            let mut dir = (p.pos.0 - center.0, p.pos.1 - center.1);
            let mut len = (dir.0 * dir.0 + dir.1 * dir.1).sqrt();
            while len == 0.0 {
                dir = (rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5));
                len = (dir.0 * dir.0 + dir.1 * dir.1).sqrt();
            }
            p.pos.0 += dir.0 / len * strength * dt;
            p.pos.1 += dir.1 / len * strength * dt;
        }
    }

    fn wrap(&mut self) {
        let (w, h) = self.bounds;
        let m = self.margin;
        for p in &mut self.particles {
            if p.pos.0 < -m {
                p.pos.0 = w + m;
            } else if p.pos.0 > w + m {
                p.pos.0 = -m;
            }
            if p.pos.1 < -m {
                p.pos.1 = h + m;
            } else if p.pos.1 > h + m {
                p.pos.1 = -m;
            }
        }
    }
}

/// Horizontally looping background with an optional vertical sway
pub struct ScrollingBackground {
    width: f32,
    speed: f32,
    sway_amplitude: f32,
    sway_frequency: f32,
    scroll_x: f32,
    time: f32,
}

impl ScrollingBackground {
    pub fn new(width: f32, speed: f32, sway_amplitude: f32, sway_frequency: f32) -> Self {
        ScrollingBackground {
            width: width.max(1.0),
            speed,
            sway_amplitude,
            sway_frequency,
            scroll_x: 0.0,
            time: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.scroll_x = (self.scroll_x + self.speed * dt).rem_euclid(self.width);
        self.time += dt;
    }

    /// Horizontal scroll offset in [0, width)
    pub fn scroll_x(&self) -> i32 {
        self.scroll_x as i32
    }

    pub fn sway_y(&self) -> i32 {
        (self.sway_amplitude * (2.0 * PI * self.sway_frequency * self.time).sin()).round() as i32
    }

    /// X positions of the two copies that together cover the screen
    pub fn copy_positions(&self) -> [i32; 2] {
        let sx = self.scroll_x();
        [-sx, self.width as i32 - sx]
    }
}

/// A 1 px wide vertical gradient strip, stretched across the screen when drawn
pub fn gradient_strip(height: u32, top: [u8; 3], bottom: [u8; 3]) -> PixelBuffer {
    let mut strip = PixelBuffer::new(1, height.max(1));
    for y in 0..height {
        let [r, g, b] = lerp_rgb(top, bottom, y as f32 / height as f32);
        strip.set_pixel(0, y, Color::RGB(r, g, b));
    }
    strip
}
