//! Application context
//!
//! SDL, the window/canvas, the event pump and the frame clock are created once
//! at startup and handed to whoever needs them. Dropping the context tears
//! everything down.

use crate::config::WindowConfig;
use log::info;
use sdl2::image::{InitFlag, Sdl2ImageContext};
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed rate and reports the real frame time
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            frame: frame_budget(fps),
            last: Instant::now(),
        }
    }

    /// Sleeps out the rest of the frame budget; returns seconds since the last tick
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Forgets time spent outside the loop (e.g. inside the game)
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

/// Time per frame at `fps` frames per second (0 is treated as 1)
pub fn frame_budget(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}

pub struct AppContext {
    pub canvas: Canvas<Window>,
    pub event_pump: EventPump,
    pub clock: FrameClock,
    pub screen: (u32, u32),
    _image: Sdl2ImageContext,
    _sdl: sdl2::Sdl,
}

impl AppContext {
    /// Initialises SDL, opens a centred window and builds the canvas
    pub fn init(window: &WindowConfig) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let image_context = sdl2::image::init(InitFlag::PNG)?;

        // Pixel art: nearest-neighbour unless a texture asks otherwise
        sdl2::hint::set("SDL_RENDER_SCALE_QUALITY", "0");

        let sdl_window = video_subsystem
            .window(&window.caption, window.width, window.height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = sdl_window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        let event_pump = sdl_context.event_pump()?;

        info!("Window {}x{} @ {} fps", window.width, window.height, window.fps);

        Ok(AppContext {
            canvas,
            event_pump,
            clock: FrameClock::new(window.fps),
            screen: (window.width, window.height),
            _image: image_context,
            _sdl: sdl_context,
        })
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        info!("Shutting down");
    }
}
