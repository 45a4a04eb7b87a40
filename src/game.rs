//! The screen the Play button hands off to
//!
//! Stands in for the real game: it owns the window until the player presses
//! Escape (back to the menu) or closes the window.

use crate::app::AppContext;
use crate::gui::ActionOutcome;
use crate::input_system::{InputContext, InputSystem, MenuAction};
use crate::pixels::PixelBuffer;
use crate::render::upload;
use log::info;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};

const CLEAR_COLOR: Color = Color::RGB(12, 28, 18);

/// What the game loop should do after one action
fn outcome_for(action: MenuAction) -> Option<ActionOutcome> {
    match action {
        MenuAction::Quit => Some(ActionOutcome::Quit),
        MenuAction::Back => Some(ActionOutcome::Continue),
        _ => None,
    }
}

/// Runs until Escape or window close
///
/// `banner` is drawn centred every frame.
pub fn run(ctx: &mut AppContext, banner: &PixelBuffer) -> Result<ActionOutcome, String> {
    info!("Entering game");

    let texture_creator = ctx.canvas.texture_creator();
    let banner_texture = upload(&texture_creator, banner)?;
    let (width, height) = ctx.screen;
    let banner_rect = Rect::from_center(
        Point::new(width as i32 / 2, height as i32 / 2),
        banner.width(),
        banner.height(),
    );

    let mut input = InputSystem::new();
    input.context = InputContext::Game;

    let outcome = 'running: loop {
        for action in input.poll_events(&mut ctx.event_pump) {
            if let Some(outcome) = outcome_for(action) {
                break 'running outcome;
            }
        }

        ctx.canvas.set_draw_color(CLEAR_COLOR);
        ctx.canvas.clear();
        ctx.canvas.copy(&banner_texture, None, banner_rect)?;
        ctx.canvas.present();

        ctx.clock.tick();
    };

    // Time spent here must not show up as one huge menu frame
    ctx.clock.reset();
    info!("Leaving game ({:?})", outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_returns_to_menu() {
        assert_eq!(outcome_for(MenuAction::Back), Some(ActionOutcome::Continue));
    }

    #[test]
    fn test_window_close_quits() {
        assert_eq!(outcome_for(MenuAction::Quit), Some(ActionOutcome::Quit));
    }

    #[test]
    fn test_other_actions_are_ignored() {
        assert_eq!(outcome_for(MenuAction::MouseMove(3, 4)), None);
        assert_eq!(outcome_for(MenuAction::Activate), None);
    }
}
