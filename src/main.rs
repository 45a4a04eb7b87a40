use log::{debug, info};
use std::path::PathBuf;

mod app;
mod assets;
mod config;
mod easing;
mod effects;
mod error;
mod game;
mod gui;
mod input_system;
mod pixels;
mod render;
mod sprite;
mod text;

use app::AppContext;
use assets::MenuAssets;
use config::MenuConfig;
use effects::{ParticleField, ScrollingBackground};
use gui::{ActionOutcome, ButtonAction, MenuFlow, MenuItem, MenuLayout, MenuScreen};
use input_system::InputSystem;
use render::MenuRenderer;

/// Builds the Play and Exit entries
fn menu_items(assets: &MenuAssets, config: &MenuConfig) -> Vec<MenuItem<AppContext>> {
    let banner = assets.font.render("Press Esc to return", 3.0, config.font.letter_spacing);

    let play = ButtonAction::deferred(move |ctx: &mut AppContext| game::run(ctx, &banner));
    let exit = ButtonAction::immediate(|_: &mut AppContext| {
        info!("Exit selected");
        Ok(ActionOutcome::Quit)
    });

    vec![
        MenuItem::new("Play", play, assets.button_skin("Play", config)),
        MenuItem::new("Exit", exit, assets.button_skin("Exit", config)),
    ]
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = MenuConfig::discover(std::env::args().nth(1).map(PathBuf::from));
    let mut ctx = AppContext::init(&config.window)?;
    let screen = ctx.screen;

    let assets = MenuAssets::load(&config);
    let items = menu_items(&assets, &config);

    let layout = MenuLayout::new(screen, items.len(), &config.layout);
    debug!("Menu panel {:?}", layout.panel());
    let buttons = layout.place_buttons(items);

    let mut rng = rand::thread_rng();
    let bounds = (screen.0 as f32, screen.1 as f32);
    let particles = ParticleField::spawn(config.particles.count, bounds, config.particles.wrap_margin, &mut rng);
    let background = ScrollingBackground::new(
        screen.0 as f32,
        config.background.scroll_speed,
        config.background.sway_amplitude,
        config.background.sway_frequency,
    );
    let mut menu = MenuScreen::new(buttons, screen, particles, background, config.transition.clone());

    let texture_creator = ctx.canvas.texture_creator();
    let mut renderer = MenuRenderer::new(&texture_creator, &assets, &menu, &layout, &config)?;
    let mut input = InputSystem::new();

    println!("Controls:");
    println!("Up/W, Down/S - Change selection");
    println!("Enter/Space - Activate selected button");
    println!("Mouse - Hover and click buttons");
    println!("ESC - Return to the menu from the game");

    // Loading and texture uploads must not count as the first frame
    ctx.clock.reset();
    'running: loop {
        input.update_context(menu.is_transitioning());
        for action in input.poll_events(&mut ctx.event_pump) {
            if menu.handle_action(action, &mut ctx)? == MenuFlow::Quit {
                break 'running;
            }
        }

        let dt = ctx.clock.tick();
        menu.update(dt, &mut rng);

        renderer.draw(&mut ctx.canvas, &menu)?;
        ctx.canvas.present();

        if menu.resolve_transition(&mut ctx)? == MenuFlow::Quit {
            break 'running;
        }
    }

    Ok(())
}
