//! Title Menu Screen
//!
//! Owns the buttons, the keyboard/mouse selection, the decorative effects
//! and the expansion transition. Input arrives as `MenuAction`s, time as
//! `update(dt)`, and drawing is left to `render.rs`, so the whole state
//! machine runs without a window.
//!
//! # Frame order
//!
//! ```rust
//! for action in input.poll_events(&mut event_pump) {
//!     if menu.handle_action(action, &mut ctx)? == MenuFlow::Quit { break; }
//! }
//! menu.update(dt, &mut rng);
//! renderer.draw(&mut canvas, &menu)?;
//! canvas.present();
//! if menu.resolve_transition(&mut ctx)? == MenuFlow::Quit { break; }
//! ```

use crate::config::{LayoutConfig, TransitionConfig};
use crate::effects::{ParticleField, ScrollingBackground};
use crate::gui::button::{ActionOutcome, Button, ButtonAction, ButtonSkin};
use crate::gui::transition::Expansion;
use crate::input_system::MenuAction;
use log::{debug, info};
use rand::Rng;
use sdl2::rect::{Point, Rect};

/// Whether the menu loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Quit,
}

impl From<ActionOutcome> for MenuFlow {
    fn from(outcome: ActionOutcome) -> Self {
        match outcome {
            ActionOutcome::Continue => MenuFlow::Continue,
            ActionOutcome::Quit => MenuFlow::Quit,
        }
    }
}

/// A labelled entry, before layout turns it into a `Button`
pub struct MenuItem<C> {
    pub label: String,
    pub action: Option<ButtonAction<C>>,
    pub skin: ButtonSkin,
}

impl<C> MenuItem<C> {
    pub fn new(label: impl Into<String>, action: ButtonAction<C>, skin: ButtonSkin) -> Self {
        MenuItem {
            label: label.into(),
            action: Some(action),
            skin,
        }
    }
}

/// Fixed screen positions of the title, buttons and footer
///
/// Everything is placed relative to a virtual panel centred on the screen
/// whose height grows with the number of items.
#[derive(Debug, Clone)]
pub struct MenuLayout {
    panel: Rect,
    title_offset: i32,
    button_top_offset: i32,
    button_spacing: i32,
    footer_offset: i32,
}

impl MenuLayout {
    pub fn new(screen: (u32, u32), item_count: usize, layout: &LayoutConfig) -> Self {
        let panel_w = layout.button_width + 120;
        let panel_h = (layout.button_height + layout.button_padding) * item_count as u32 + 220;
        let center = Point::new(screen.0 as i32 / 2, screen.1 as i32 / 2);
        MenuLayout {
            panel: Rect::from_center(center, panel_w, panel_h),
            title_offset: layout.title_offset,
            button_top_offset: layout.button_block_top_offset,
            button_spacing: layout.button_spacing,
            footer_offset: layout.footer_offset,
        }
    }

    pub fn panel(&self) -> Rect {
        self.panel
    }

    pub fn title_center(&self) -> Point {
        Point::new(self.panel.center().x(), self.panel.top() + self.title_offset)
    }

    pub fn footer_center(&self) -> Point {
        Point::new(self.panel.center().x(), self.panel.bottom() - self.footer_offset)
    }

    /// Turns items into buttons stacked down the panel
    ///
    /// Each button is spaced by its own collision height, so buttons with
    /// larger art push the following ones further down.
    pub fn place_buttons<C>(&self, items: Vec<MenuItem<C>>) -> Vec<Button<C>> {
        let x = self.panel.center().x();
        let top = self.panel.top() + self.button_top_offset;
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let (_, h) = item.skin.collision_size();
                let y = top + i as i32 * (h as i32 + self.button_spacing);
                Button::new(item.label, (x, y), item.skin, item.action)
            })
            .collect()
    }
}

pub struct MenuScreen<C> {
    buttons: Vec<Button<C>>,
    selected_index: usize,
    /// Last cursor position seen in a mouse event
    cursor: Option<(i32, i32)>,
    pending: Option<usize>,
    expansion: Option<Expansion>,
    particles: ParticleField,
    background: ScrollingBackground,
    screen: (u32, u32),
    transition: TransitionConfig,
}

impl<C> MenuScreen<C> {
    /// Creates the menu with the first button selected
    pub fn new(
        buttons: Vec<Button<C>>,
        screen: (u32, u32),
        particles: ParticleField,
        background: ScrollingBackground,
        transition: TransitionConfig,
    ) -> Self {
        let mut menu = MenuScreen {
            buttons,
            selected_index: 0,
            cursor: None,
            pending: None,
            expansion: None,
            particles,
            background,
            screen,
            transition,
        };
        menu.sync_hover();
        menu
    }

    pub fn buttons(&self) -> &[Button<C>] {
        &self.buttons
    }

    #[cfg(test)]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn expansion(&self) -> Option<&Expansion> {
        self.expansion.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.expansion.is_some()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn background(&self) -> &ScrollingBackground {
        &self.background
    }

    pub fn screen_size(&self) -> (u32, u32) {
        self.screen
    }

    pub fn transition_config(&self) -> &TransitionConfig {
        &self.transition
    }

    /// Move selection up (wraps to bottom)
    pub fn select_previous(&mut self) {
        if self.buttons.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.buttons.len() - 1;
        } else {
            self.selected_index -= 1;
        }
        self.sync_hover();
    }

    /// Move selection down (wraps to top)
    pub fn select_next(&mut self) {
        if self.buttons.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.buttons.len();
        self.sync_hover();
    }

    /// The selected button is the hovered one, whichever device selected it
    fn sync_hover(&mut self) {
        let selected = self.selected_index;
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.hovered = i == selected;
        }
    }

    fn track_mouse(&mut self, x: i32, y: i32) {
        self.cursor = Some((x, y));
        self.select_at(x, y);
    }

    /// A cursor resting on a button keeps (or takes back) the selection
    fn follow_cursor(&mut self) {
        if let Some((x, y)) = self.cursor {
            self.select_at(x, y);
        }
    }

    fn select_at(&mut self, x: i32, y: i32) {
        if let Some(i) = self.buttons.iter().position(|b| b.contains(x, y)) {
            if i != self.selected_index {
                debug!("Mouse selected '{}'", self.buttons[i].label());
            }
            self.selected_index = i;
            self.sync_hover();
        }
    }

    /// Applies one input action
    ///
    /// `Quit` always ends the menu. Everything else is ignored while the
    /// expansion transition is running.
    pub fn handle_action(&mut self, action: MenuAction, ctx: &mut C) -> Result<MenuFlow, String> {
        if action == MenuAction::Quit {
            return Ok(MenuFlow::Quit);
        }
        if self.is_transitioning() {
            return Ok(MenuFlow::Continue);
        }

        match action {
            MenuAction::SelectPrevious => self.select_previous(),
            MenuAction::SelectNext => self.select_next(),
            MenuAction::Activate => return self.activate(self.selected_index, ctx),
            MenuAction::MouseMove(x, y) => self.track_mouse(x, y),
            MenuAction::MouseDown(x, y) => {
                self.track_mouse(x, y);
                for button in &mut self.buttons {
                    button.mouse_down(x, y);
                }
            }
            MenuAction::MouseUp(x, y) => {
                self.track_mouse(x, y);
                let mut clicked = None;
                for (i, button) in self.buttons.iter_mut().enumerate() {
                    if button.mouse_up(x, y) {
                        clicked = Some(i);
                    }
                }
                if let Some(i) = clicked {
                    return self.activate(i, ctx);
                }
            }
            MenuAction::Back | MenuAction::Quit => {}
        }
        Ok(MenuFlow::Continue)
    }

    /// Runs an immediate action now, or queues a deferred one for the transition
    fn activate(&mut self, index: usize, ctx: &mut C) -> Result<MenuFlow, String> {
        let Some(button) = self.buttons.get_mut(index) else {
            return Ok(MenuFlow::Continue);
        };
        let label = button.label().to_string();
        match button.action_mut() {
            None => Ok(MenuFlow::Continue),
            Some(action) if action.is_deferred() => {
                if self.pending.is_none() {
                    debug!("'{}' queued for transition", label);
                    self.pending = Some(index);
                }
                Ok(MenuFlow::Continue)
            }
            Some(action) => {
                info!("'{}' activated", label);
                Ok(action.invoke(ctx)?.into())
            }
        }
    }

    /// Advances time: starts a queued transition, then moves everything
    ///
    /// While idle, the button under the cursor reclaims the selection.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.expansion.is_none() {
            match self.pending.take() {
                Some(index) => self.start_expansion(index),
                None => self.follow_cursor(),
            }
        }

        self.background.update(dt);

        let speedup = if self.expansion.is_some() {
            self.transition.particle_speedup
        } else {
            1.0
        };
        self.particles.update(dt, speedup);

        if let Some(expansion) = &mut self.expansion {
            expansion.advance(dt);
            let push = self.transition.push_strength * expansion.eased();
            self.particles.push_from(expansion.center(), push, dt, rng);
        }
    }

    fn start_expansion(&mut self, index: usize) {
        let Some(button) = self.buttons.get(index) else {
            return;
        };
        info!("Expanding '{}'", button.label());
        self.expansion = Some(Expansion::new(index, button.rect(), self.screen, &self.transition));
        self.particles.boost(self.transition.particle_boost);
    }

    /// Hands off to the deferred action once the transition has finished
    ///
    /// Call after the frame showing the completed transition has been
    /// presented. Returns to the idle menu unless the action asks to quit.
    pub fn resolve_transition(&mut self, ctx: &mut C) -> Result<MenuFlow, String> {
        let Some(expansion) = self.expansion.take_if(|e| e.is_complete()) else {
            return Ok(MenuFlow::Continue);
        };

        self.particles.reset_boost();
        for button in &mut self.buttons {
            button.reset();
        }

        let Some(button) = self.buttons.get_mut(expansion.button()) else {
            return Ok(MenuFlow::Continue);
        };
        info!("Transition finished, running '{}'", button.label());
        match button.action_mut() {
            Some(action) => Ok(action.invoke(ctx)?.into()),
            None => Ok(MenuFlow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::button::ButtonArt;
    use crate::pixels::PixelBuffer;
    use crate::sprite::FrameSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sdl2::pixels::Color;

    const SCREEN: (u32, u32) = (1550, 900);
    const DT: f32 = 1.0 / 60.0;

    /// Records what the actions did
    #[derive(Default)]
    struct Calls {
        played: u32,
        exited: u32,
    }

    fn skin() -> ButtonSkin {
        let art = |s| ButtonArt::new(Some(PixelBuffer::filled(62, 30, Color::RGB(0, 160, 0))), s);
        ButtonSkin {
            frame_size: FrameSize::new(62.0, 30.0),
            normal: art(3),
            hover: art(3),
            pressed: art(3),
        }
    }

    fn menu() -> MenuScreen<Calls> {
        let items = vec![
            MenuItem::new(
                "Play",
                ButtonAction::deferred(|calls: &mut Calls| {
                    calls.played += 1;
                    Ok(ActionOutcome::Continue)
                }),
                skin(),
            ),
            MenuItem::new(
                "Exit",
                ButtonAction::immediate(|calls: &mut Calls| {
                    calls.exited += 1;
                    Ok(ActionOutcome::Quit)
                }),
                skin(),
            ),
        ];
        let layout = MenuLayout::new(SCREEN, items.len(), &LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        MenuScreen::new(
            layout.place_buttons(items),
            SCREEN,
            ParticleField::spawn(28, (1550.0, 900.0), 20.0, &mut rng),
            ScrollingBackground::new(1550.0, 100.0, 0.0, 0.0),
            TransitionConfig::default(),
        )
    }

    fn center_of(menu: &MenuScreen<Calls>, index: usize) -> (i32, i32) {
        let c = menu.buttons()[index].rect().center();
        (c.x(), c.y())
    }

    fn hovered(menu: &MenuScreen<Calls>) -> Vec<usize> {
        menu.buttons()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.hovered)
            .map(|(i, _)| i)
            .collect()
    }

    fn click(menu: &mut MenuScreen<Calls>, calls: &mut Calls, at: (i32, i32)) -> MenuFlow {
        menu.handle_action(MenuAction::MouseMove(at.0, at.1), calls).unwrap();
        menu.handle_action(MenuAction::MouseDown(at.0, at.1), calls).unwrap();
        menu.handle_action(MenuAction::MouseUp(at.0, at.1), calls).unwrap()
    }

    #[test]
    fn test_layout_positions() {
        let layout = MenuLayout::new(SCREEN, 2, &LayoutConfig::default());
        // (72 + 56) * 2 + 220 = 476 tall, 540 wide
        assert_eq!(layout.panel().size(), (540, 476));
        assert_eq!(layout.panel().top(), 450 - 238);
        assert_eq!(layout.title_center(), Point::new(775, 212 + 60));
        assert_eq!(layout.footer_center(), Point::new(775, 212 + 476 - 28));
    }

    #[test]
    fn test_buttons_stack_by_own_height() {
        let menu = menu();
        let first = center_of(&menu, 0);
        let second = center_of(&menu, 1);
        assert_eq!(first, (775, 212 + 220));
        assert_eq!(second.1 - first.1, 90 + 48);
    }

    #[test]
    fn test_first_button_selected_initially() {
        let menu = menu();
        assert_eq!(menu.selected_index(), 0);
        assert_eq!(hovered(&menu), vec![0]);
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut menu = menu();
        let mut calls = Calls::default();

        menu.handle_action(MenuAction::SelectNext, &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 1);
        assert_eq!(hovered(&menu), vec![1]);

        menu.handle_action(MenuAction::SelectNext, &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 0);

        menu.handle_action(MenuAction::SelectPrevious, &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_mouse_over_button_takes_selection() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let exit = center_of(&menu, 1);

        menu.handle_action(MenuAction::MouseMove(exit.0, exit.1), &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 1);
        assert_eq!(hovered(&menu), vec![1]);

        // leaving the buttons keeps the last selection
        menu.handle_action(MenuAction::MouseMove(5, 5), &mut calls).unwrap();
        assert_eq!(hovered(&menu), vec![1]);

        // keyboard still works from there
        menu.handle_action(MenuAction::SelectNext, &mut calls).unwrap();
        assert_eq!(hovered(&menu), vec![0]);
    }

    #[test]
    fn test_resting_cursor_reclaims_selection() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(5);
        let exit = center_of(&menu, 1);

        menu.handle_action(MenuAction::MouseMove(exit.0, exit.1), &mut calls).unwrap();
        menu.handle_action(MenuAction::SelectPrevious, &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 0);

        menu.update(DT, &mut rng);
        assert_eq!(menu.selected_index(), 1);
        assert_eq!(hovered(&menu), vec![1]);

        let flow = menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        assert_eq!(flow, MenuFlow::Quit);
        assert_eq!(calls.exited, 1);
        assert_eq!(calls.played, 0);
    }

    #[test]
    fn test_cursor_off_buttons_leaves_keyboard_selection() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(5);

        menu.handle_action(MenuAction::MouseMove(5, 5), &mut calls).unwrap();
        menu.handle_action(MenuAction::SelectNext, &mut calls).unwrap();
        menu.update(DT, &mut rng);
        assert_eq!(menu.selected_index(), 1);
    }

    #[test]
    fn test_exit_click_quits_without_transition() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let exit = center_of(&menu, 1);

        let flow = click(&mut menu, &mut calls, exit);
        assert_eq!(flow, MenuFlow::Quit);
        assert_eq!(calls.exited, 1);
        assert!(!menu.is_transitioning());
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let exit = center_of(&menu, 1);

        menu.handle_action(MenuAction::MouseMove(exit.0, exit.1), &mut calls).unwrap();
        menu.handle_action(MenuAction::MouseDown(exit.0, exit.1), &mut calls).unwrap();
        let flow = menu.handle_action(MenuAction::MouseUp(5, 5), &mut calls).unwrap();
        assert_eq!(flow, MenuFlow::Continue);
        assert_eq!(calls.exited, 0);
    }

    #[test]
    fn test_play_runs_after_transition_exactly_once() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(9);
        let play = center_of(&menu, 0);

        assert_eq!(click(&mut menu, &mut calls, play), MenuFlow::Continue);
        assert_eq!(calls.played, 0);
        assert!(!menu.is_transitioning());

        // the trigger is picked up on the next frame
        menu.update(DT, &mut rng);
        assert!(menu.is_transitioning());
        assert_eq!(menu.particles().current_boost(), 1.6);

        let mut frames = 1;
        while menu.is_transitioning() {
            menu.update(DT, &mut rng);
            menu.resolve_transition(&mut calls).unwrap();
            frames += 1;
            assert!(frames < 200, "transition never finished");
        }

        assert_eq!(calls.played, 1);
        // 1.2 s at 60 fps
        assert!((71..=74).contains(&frames), "took {} frames", frames);
        assert_eq!(menu.particles().current_boost(), 1.0);

        for _ in 0..10 {
            menu.update(DT, &mut rng);
            menu.resolve_transition(&mut calls).unwrap();
        }
        assert_eq!(calls.played, 1);
    }

    #[test]
    fn test_enter_uses_same_deferred_path() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(9);

        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        assert_eq!(calls.played, 0);

        for _ in 0..120 {
            menu.update(DT, &mut rng);
            menu.resolve_transition(&mut calls).unwrap();
        }
        assert_eq!(calls.played, 1);
    }

    #[test]
    fn test_input_ignored_while_expanding() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(9);
        let exit = center_of(&menu, 1);

        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        menu.update(DT, &mut rng);
        assert!(menu.is_transitioning());

        menu.handle_action(MenuAction::SelectNext, &mut calls).unwrap();
        assert_eq!(menu.selected_index(), 0);

        let flow = click(&mut menu, &mut calls, exit);
        assert_eq!(flow, MenuFlow::Continue);
        assert_eq!(calls.exited, 0);
        assert_eq!(hovered(&menu), vec![0]);
    }

    #[test]
    fn test_quit_event_interrupts_transition() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(9);

        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        menu.update(DT, &mut rng);
        let flow = menu.handle_action(MenuAction::Quit, &mut calls).unwrap();
        assert_eq!(flow, MenuFlow::Quit);
        assert_eq!(calls.played, 0);
    }

    #[test]
    fn test_transition_starts_at_button_rect() {
        let mut menu = menu();
        let mut calls = Calls::default();
        let mut rng = StdRng::seed_from_u64(9);

        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        menu.update(0.0, &mut rng);
        let expansion = menu.expansion().unwrap();
        assert_eq!(expansion.button(), 0);
        assert_eq!(expansion.rect(), menu.buttons()[0].rect());
    }

    #[test]
    fn test_deferred_quit_ends_menu() {
        let items = vec![MenuItem::new(
            "Play",
            ButtonAction::deferred(|_: &mut Calls| Ok(ActionOutcome::Quit)),
            skin(),
        )];
        let layout = MenuLayout::new(SCREEN, 1, &LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuScreen::new(
            layout.place_buttons(items),
            SCREEN,
            ParticleField::spawn(4, (1550.0, 900.0), 20.0, &mut rng),
            ScrollingBackground::new(1550.0, 100.0, 0.0, 0.0),
            TransitionConfig::default(),
        );
        let mut calls = Calls::default();

        menu.handle_action(MenuAction::Activate, &mut calls).unwrap();
        let mut flow = MenuFlow::Continue;
        for _ in 0..100 {
            menu.update(DT, &mut rng);
            flow = menu.resolve_transition(&mut calls).unwrap();
            if flow == MenuFlow::Quit {
                break;
            }
        }
        assert_eq!(flow, MenuFlow::Quit);
    }

    #[test]
    fn test_action_error_propagates() {
        let items = vec![MenuItem::new(
            "Exit",
            ButtonAction::immediate(|_: &mut Calls| Err("boom".to_string())),
            skin(),
        )];
        let layout = MenuLayout::new(SCREEN, 1, &LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuScreen::new(
            layout.place_buttons(items),
            SCREEN,
            ParticleField::spawn(0, (1550.0, 900.0), 20.0, &mut rng),
            ScrollingBackground::new(1550.0, 100.0, 0.0, 0.0),
            TransitionConfig::default(),
        );
        let result = menu.handle_action(MenuAction::Activate, &mut Calls::default());
        assert_eq!(result, Err("boom".to_string()));
    }
}
