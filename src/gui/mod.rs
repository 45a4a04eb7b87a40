//! Screen-Space GUI System
//!
//! The title menu's widgets and their state machines. Nothing in here talks
//! to SDL's renderer; `render.rs` reads the state and draws it.
//!
//! # Available Components
//!
//! - [`button::Button`] - three-state sprite button with a tagged action
//! - [`transition::Expansion`] - the button-fills-the-screen transition
//! - [`MenuScreen`] - selection, input and transition orchestration
//!
//! # Example Usage
//!
//! ```rust
//! use crate::gui::{ButtonAction, MenuItem, MenuLayout, MenuScreen};
//!
//! let items = vec![
//!     MenuItem::new("Play", ButtonAction::deferred(start_game), play_skin),
//!     MenuItem::new("Exit", ButtonAction::immediate(|_| Ok(ActionOutcome::Quit)), exit_skin),
//! ];
//! let layout = MenuLayout::new(screen, items.len(), &config.layout);
//! let menu = MenuScreen::new(layout.place_buttons(items), screen, particles, background, config.transition);
//! ```

pub mod button;
pub mod menu;
pub mod transition;

pub use button::{ActionOutcome, ButtonAction, ButtonArt, ButtonSkin, ButtonState};
pub use menu::{MenuFlow, MenuItem, MenuLayout, MenuScreen};
pub use transition::blur_radius;
