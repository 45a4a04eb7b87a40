use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// Actions the player can perform on the title screen
///
/// This enum decouples raw SDL2 input from the menu state machine, so the
/// menu can be driven (and tested) without an event pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    // === Navigation ===
    SelectPrevious,
    SelectNext,
    Activate,
    /// Leave the current screen (Escape)
    Back,

    // === Mouse ===
    MouseMove(i32, i32),
    MouseDown(i32, i32), // left button only
    MouseUp(i32, i32),

    // === System ===
    Quit,
}

/// Input context determines which actions are available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// Title menu is idle and accepting selection input
    Menu,
    /// Expansion transition is playing; only window close gets through
    Transition,
    /// The screen entered from the menu
    Game,
}

/// InputSystem processes SDL2 events and produces MenuActions
///
/// Input processing happens in phases:
/// 1. The caller sets the InputContext for this frame
/// 2. Poll SDL2 events
/// 3. Filter events based on context
/// 4. Translate events to MenuActions
pub struct InputSystem {
    /// Current input context
    pub context: InputContext,
}

impl InputSystem {
    /// Creates a new InputSystem starting in Menu context
    pub fn new() -> Self {
        InputSystem {
            context: InputContext::Menu,
        }
    }

    /// Switches context based on whether a transition is running
    pub fn update_context(&mut self, transitioning: bool) {
        if self.context == InputContext::Game {
            return;
        }
        self.context = if transitioning {
            InputContext::Transition
        } else {
            InputContext::Menu
        };
    }

    /// Process SDL2 events and return list of actions to handle
    pub fn poll_events(&self, event_pump: &mut EventPump) -> Vec<MenuAction> {
        event_pump
            .poll_iter()
            .filter_map(|event| self.translate(&event))
            .collect()
    }

    /// Translates one SDL2 event, or `None` if it is irrelevant here
    pub fn translate(&self, event: &Event) -> Option<MenuAction> {
        match *event {
            Event::Quit { .. } => Some(MenuAction::Quit),
            _ if self.context == InputContext::Transition => None,
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.handle_keydown(key),
            Event::MouseMotion { x, y, .. } => Some(MenuAction::MouseMove(x, y)),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => Self::handle_mouse_button(mouse_btn, x, y, true),
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => Self::handle_mouse_button(mouse_btn, x, y, false),
            _ => None,
        }
    }

    /// Handle keyboard key press events
    fn handle_keydown(&self, key: Keycode) -> Option<MenuAction> {
        match self.context {
            InputContext::Menu => Self::handle_menu_keys(key),
            InputContext::Game => Self::handle_game_keys(key),
            InputContext::Transition => None,
        }
    }

    /// Handle keys on the idle title menu
    fn handle_menu_keys(key: Keycode) -> Option<MenuAction> {
        match key {
            Keycode::Up | Keycode::W => Some(MenuAction::SelectPrevious),
            Keycode::Down | Keycode::S => Some(MenuAction::SelectNext),
            Keycode::Return | Keycode::KpEnter | Keycode::Space => Some(MenuAction::Activate),
            _ => None,
        }
    }

    /// Handle keys on the screen after the menu
    fn handle_game_keys(key: Keycode) -> Option<MenuAction> {
        match key {
            Keycode::Escape => Some(MenuAction::Back),
            _ => None,
        }
    }

    /// Handle left mouse button press/release; other buttons are ignored
    fn handle_mouse_button(button: MouseButton, x: i32, y: i32, down: bool) -> Option<MenuAction> {
        match (button, down) {
            (MouseButton::Left, true) => Some(MenuAction::MouseDown(x, y)),
            (MouseButton::Left, false) => Some(MenuAction::MouseUp(x, y)),
            _ => None,
        }
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}
