//! Sprite Button Component
//!
//! A button is a screen rectangle with three pieces of art (normal, hovered,
//! pressed) and an optional action. The menu decides which button is hovered;
//! the button only tracks its own press and reports when a click completes.

use crate::pixels::PixelBuffer;
use crate::sprite::FrameSize;
use sdl2::rect::{Point, Rect};

/// What the menu should do after an action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    Quit,
}

/// A callable bound to a button, run against the menu's context
pub type ActionFn<C> = Box<dyn FnMut(&mut C) -> Result<ActionOutcome, String>>;

/// How a button's action is dispatched
///
/// `Immediate` runs as soon as the button is activated. `Deferred` only
/// records the activation; the menu plays the expansion transition first and
/// runs the action once it has finished.
pub enum ButtonAction<C> {
    Immediate(ActionFn<C>),
    Deferred(ActionFn<C>),
}

impl<C> ButtonAction<C> {
    pub fn immediate(f: impl FnMut(&mut C) -> Result<ActionOutcome, String> + 'static) -> Self {
        ButtonAction::Immediate(Box::new(f))
    }

    pub fn deferred(f: impl FnMut(&mut C) -> Result<ActionOutcome, String> + 'static) -> Self {
        ButtonAction::Deferred(Box::new(f))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ButtonAction::Deferred(_))
    }

    /// Runs the wrapped callable regardless of its dispatch mode
    pub fn invoke(&mut self, ctx: &mut C) -> Result<ActionOutcome, String> {
        match self {
            ButtonAction::Immediate(f) | ButtonAction::Deferred(f) => f(ctx),
        }
    }
}

/// Visual state, in priority order pressed > hovered > normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Normal,
    Hovered,
    Pressed,
}

impl ButtonState {
    pub const ALL: [ButtonState; 3] = [ButtonState::Normal, ButtonState::Hovered, ButtonState::Pressed];

    pub fn index(self) -> usize {
        match self {
            ButtonState::Normal => 0,
            ButtonState::Hovered => 1,
            ButtonState::Pressed => 2,
        }
    }
}

/// Art for one state: an image drawn at an integer scale
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonArt {
    pub image: Option<PixelBuffer>,
    pub scale: u32,
}

impl ButtonArt {
    pub fn new(image: Option<PixelBuffer>, scale: u32) -> Self {
        ButtonArt {
            image,
            scale: scale.max(1),
        }
    }

    pub fn none() -> Self {
        ButtonArt::new(None, 1)
    }
}

/// The three states' art plus the sheet frame size they were cut from
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSkin {
    pub frame_size: FrameSize,
    pub normal: ButtonArt,
    pub hover: ButtonArt,
    pub pressed: ButtonArt,
}

impl ButtonSkin {
    /// A skin with no art; the button still has a clickable rectangle
    pub fn blank(frame_size: FrameSize) -> Self {
        ButtonSkin {
            frame_size,
            normal: ButtonArt::none(),
            hover: ButtonArt::none(),
            pressed: ButtonArt::none(),
        }
    }

    pub fn max_scale(&self) -> u32 {
        self.normal
            .scale
            .max(self.hover.scale)
            .max(self.pressed.scale)
            .max(1)
    }

    /// Clickable size: frame size at the largest state scale
    ///
    /// Sizing by the largest scale keeps every state's art inside the
    /// region that actually receives clicks.
    pub fn collision_size(&self) -> (u32, u32) {
        let scale = self.max_scale() as f32;
        (
            (self.frame_size.width * scale).max(1.0) as u32,
            (self.frame_size.height * scale).max(1.0) as u32,
        )
    }

    /// Fills missing hover art from normal, and missing pressed art from
    /// hover (then normal). Each state keeps its own scale.
    fn with_fallbacks(mut self) -> Self {
        if self.hover.image.is_none() {
            self.hover.image = self.normal.image.clone();
        }
        if self.pressed.image.is_none() {
            self.pressed.image = self.hover.image.clone();
        }
        self
    }
}

pub struct Button<C> {
    label: String,
    rect: Rect,
    skin: ButtonSkin,
    action: Option<ButtonAction<C>>,
    pub hovered: bool,
    pub pressed: bool,
}

impl<C> Button<C> {
    /// Creates a button whose collision rectangle is centred on `center`
    pub fn new(
        label: impl Into<String>,
        center: (i32, i32),
        skin: ButtonSkin,
        action: Option<ButtonAction<C>>,
    ) -> Self {
        let (w, h) = skin.collision_size();
        Button {
            label: label.into(),
            rect: Rect::from_center(Point::new(center.0, center.1), w, h),
            skin: skin.with_fallbacks(),
            action,
            hovered: false,
            pressed: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn action_mut(&mut self) -> Option<&mut ButtonAction<C>> {
        self.action.as_mut()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains_point(Point::new(x, y))
    }

    pub fn state(&self) -> ButtonState {
        if self.pressed && self.skin.pressed.image.is_some() {
            ButtonState::Pressed
        } else if self.hovered && self.skin.hover.image.is_some() {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        }
    }

    pub fn art(&self, state: ButtonState) -> &ButtonArt {
        match state {
            ButtonState::Normal => &self.skin.normal,
            ButtonState::Hovered => &self.skin.hover,
            ButtonState::Pressed => &self.skin.pressed,
        }
    }

    /// Art for the current state
    pub fn current_art(&self) -> &ButtonArt {
        self.art(self.state())
    }

    /// Where the current art lands on screen, centred on the collision rect
    pub fn art_rect(&self) -> Option<Rect> {
        let art = self.current_art();
        let image = art.image.as_ref()?;
        Some(Rect::from_center(
            self.rect.center(),
            image.width() * art.scale,
            image.height() * art.scale,
        ))
    }

    /// Left button went down at (x, y)
    pub fn mouse_down(&mut self, x: i32, y: i32) {
        if self.hovered && self.contains(x, y) {
            self.pressed = true;
        }
    }

    /// Left button came up at (x, y); returns true if this completes a click
    pub fn mouse_up(&mut self, x: i32, y: i32) -> bool {
        let clicked = self.pressed && self.hovered && self.contains(x, y);
        self.pressed = false;
        clicked
    }

    /// Clears transient input state
    pub fn reset(&mut self) {
        self.pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::pixels::Color;

    fn frame(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::filled(w, h, Color::RGBA(40, 200, 40, 255))
    }

    fn skin(scales: (u32, u32, u32)) -> ButtonSkin {
        ButtonSkin {
            frame_size: FrameSize::new(62.0, 30.0),
            normal: ButtonArt::new(Some(frame(62, 30)), scales.0),
            hover: ButtonArt::new(Some(frame(62, 30)), scales.1),
            pressed: ButtonArt::new(None, scales.2),
        }
    }

    #[test]
    fn test_collision_rect_uses_max_scale() {
        let button: Button<()> = Button::new("Exit", (400, 300), skin((2, 4, 3)), None);
        assert_eq!(button.rect().size(), (248, 120));
        assert_eq!(button.rect().center(), Point::new(400, 300));
    }

    #[test]
    fn test_zero_scale_is_clamped() {
        let skin = skin((3, 3, 0));
        assert_eq!(skin.pressed.scale, 1);
        assert_eq!(skin.max_scale(), 3);
    }

    #[test]
    fn test_fractional_frame_size_truncates() {
        let skin = ButtonSkin::blank(FrameSize::new(64.5, 30.0));
        let skin = ButtonSkin {
            normal: ButtonArt::new(None, 3),
            ..skin
        };
        assert_eq!(skin.collision_size(), (193, 90));
    }

    #[test]
    fn test_art_never_exceeds_collision_rect() {
        let mut button: Button<()> = Button::new("Exit", (400, 300), skin((2, 4, 3)), None);
        for (hovered, pressed) in [(false, false), (true, false), (true, true)] {
            button.hovered = hovered;
            button.pressed = pressed;
            let art = button.art_rect().unwrap();
            let rect = button.rect();
            assert!(
                art.left() >= rect.left()
                    && art.top() >= rect.top()
                    && art.right() <= rect.right()
                    && art.bottom() <= rect.bottom(),
                "state {:?}",
                button.state()
            );
        }
    }

    #[test]
    fn test_pressed_falls_back_to_hover_art() {
        let mut button: Button<()> = Button::new("Exit", (0, 0), skin((3, 3, 2)), None);
        button.hovered = true;
        button.pressed = true;
        assert_eq!(button.state(), ButtonState::Pressed);
        assert!(button.current_art().image.is_some());
        assert_eq!(button.current_art().scale, 2);
    }

    #[test]
    fn test_button_without_art_stays_normal() {
        let mut button: Button<()> =
            Button::new("Options", (0, 0), ButtonSkin::blank(FrameSize::new(64.5, 30.0)), None);
        button.hovered = true;
        assert_eq!(button.state(), ButtonState::Normal);
        assert!(button.art_rect().is_none());
    }

    #[test]
    fn test_click_requires_press_and_release_inside() {
        let mut button: Button<()> = Button::new("Exit", (100, 100), skin((1, 1, 1)), None);
        button.hovered = true;

        button.mouse_down(100, 100);
        assert!(button.pressed);
        assert!(button.mouse_up(101, 101));
        assert!(!button.pressed);

        button.mouse_down(100, 100);
        assert!(!button.mouse_up(500, 500));

        // release without a press
        assert!(!button.mouse_up(100, 100));
    }

    #[test]
    fn test_press_ignored_when_not_hovered() {
        let mut button: Button<()> = Button::new("Exit", (100, 100), skin((1, 1, 1)), None);
        button.mouse_down(100, 100);
        assert!(!button.pressed);
    }

    #[test]
    fn test_action_invoke() {
        let mut action = ButtonAction::deferred(|count: &mut u32| {
            *count += 1;
            Ok(ActionOutcome::Continue)
        });
        let mut count = 0;
        assert!(action.is_deferred());
        assert_eq!(action.invoke(&mut count), Ok(ActionOutcome::Continue));
        assert_eq!(count, 1);
    }
}
