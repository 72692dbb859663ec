//! Address text field
//!
//! `AddressField` wraps the platform's single-line text input behind the
//! [`TextInput`] trait and applies the URL-entry presentation once at
//! construction. It never navigates; it only mutates the control.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// One-third white, the platform's stock dark gray
    pub const DARK_GRAY: Color = Color::rgb(85, 85, 85);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Foreground of URL placeholders, darker than the stock placeholder gray
pub const PLACEHOLDER_COLOR: Color = Color::BLACK;

/// Tint of the cancel button label while editing
pub const CANCEL_TINT: Color = Color::DARK_GRAY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Placeholder {
    /// Attributed placeholder with an explicit foreground color
    Styled { text: String, color: Color },
    /// The field's static hint, in the platform's default style
    Hint { text: String },
}

impl Placeholder {
    pub fn text(&self) -> &str {
        match self {
            Placeholder::Styled { text, .. } | Placeholder::Hint { text } => text,
        }
    }

    pub fn is_hint(&self) -> bool {
        matches!(self, Placeholder::Hint { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyboardType {
    Default,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Autocapitalization {
    None,
    Sentences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldAppearance {
    Prominent,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnKey {
    Search,
    Go,
}

/// Presentation traits applied to the native control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTraits {
    /// Platform-managed cancel button; the address bar drives its own
    pub builtin_cancel_button: bool,
    pub keyboard: KeyboardType,
    pub autocapitalization: Autocapitalization,
    pub appearance: FieldAppearance,
    pub return_key: ReturnKey,
    /// Magnifier icon at the leading edge
    pub leading_icon: bool,
    /// Any other decoration in the left view slot
    pub left_view: bool,
}

impl InputTraits {
    pub fn url_entry() -> Self {
        Self {
            builtin_cancel_button: false,
            keyboard: KeyboardType::Url,
            autocapitalization: Autocapitalization::None,
            appearance: FieldAppearance::Minimal,
            return_key: ReturnKey::Go,
            leading_icon: false,
            left_view: false,
        }
    }
}

/// Handle to the native single-line text input
///
/// `resign_first_responder` may deliver the end-of-editing notification
/// synchronously, so callers must not hold their own locks across it.
pub trait TextInput: Send + Sync {
    fn text(&self) -> String;
    /// Replace the content; clears any selection
    fn set_text(&self, text: &str);
    fn placeholder(&self) -> Option<Placeholder>;
    fn set_placeholder(&self, placeholder: Placeholder);
    fn is_first_responder(&self) -> bool;
    fn resign_first_responder(&self);
    fn select_all(&self);
    fn apply_traits(&self, traits: &InputTraits);
    fn set_shows_cancel_button(&self, shows: bool, animated: bool);
    fn set_cancel_button_tint(&self, color: Color);
}

pub struct AddressField {
    input: Arc<dyn TextInput>,
    hint: String,
}

impl AddressField {
    /// Wrap a native input and configure it for URL entry
    pub fn new(input: Arc<dyn TextInput>, hint: impl Into<String>) -> Self {
        let mut field = Self {
            input,
            hint: hint.into(),
        };
        field.configure_for_url_entry();
        field
    }

    pub fn text(&self) -> String {
        self.input.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.input.set_text(text);
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.input.placeholder()
    }

    /// Install a styled placeholder, or fall back to the hint when `text`
    /// is `None` or empty
    pub fn set_placeholder(&mut self, text: Option<&str>) {
        let placeholder = match text {
            Some(text) if !text.is_empty() => Placeholder::Styled {
                text: text.to_string(),
                color: PLACEHOLDER_COLOR,
            },
            _ => Placeholder::Hint {
                text: self.hint.clone(),
            },
        };
        self.input.set_placeholder(placeholder);
    }

    pub fn configure_for_url_entry(&mut self) {
        self.input.apply_traits(&InputTraits::url_entry());
    }

    pub fn is_focused(&self) -> bool {
        self.input.is_first_responder()
    }

    /// The native control, for calls that must run without the field borrowed
    pub(crate) fn native(&self) -> Arc<dyn TextInput> {
        Arc::clone(&self.input)
    }

    pub fn select_all(&mut self) {
        self.input.select_all();
    }

    pub fn set_cancel_visible(&mut self, visible: bool, animated: bool) {
        self.input.set_shows_cancel_button(visible, animated);
    }

    pub fn tint_cancel(&mut self, color: Color) {
        self.input.set_cancel_button_tint(color);
    }
}

/// Observable state of a [`HeadlessInput`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub text: String,
    pub placeholder: Option<Placeholder>,
    pub focused: bool,
    /// Byte range of the current selection
    pub selection: Option<Range<usize>>,
    pub traits: Option<InputTraits>,
    pub cancel_visible: bool,
    pub cancel_tint: Option<Color>,
}

/// In-memory text input
///
/// Clones share state, so an embedder can keep a handle for driving focus
/// and keystrokes after handing a clone to [`AddressField`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessInput {
    state: Arc<Mutex<InputSnapshot>>,
}

impl HeadlessInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) {
        self.state.lock().focused = true;
    }

    pub fn blur(&self) {
        self.state.lock().focused = false;
    }

    /// Type text at the caret, replacing the selection if there is one
    pub fn type_text(&self, typed: &str) {
        let mut state = self.state.lock();
        match state.selection.take() {
            Some(range) => state.text.replace_range(range, typed),
            None => state.text.push_str(typed),
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        self.state.lock().clone()
    }
}

impl TextInput for HeadlessInput {
    fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state.lock();
        state.text = text.to_string();
        state.selection = None;
    }

    fn placeholder(&self) -> Option<Placeholder> {
        self.state.lock().placeholder.clone()
    }

    fn set_placeholder(&self, placeholder: Placeholder) {
        self.state.lock().placeholder = Some(placeholder);
    }

    fn is_first_responder(&self) -> bool {
        self.state.lock().focused
    }

    fn resign_first_responder(&self) {
        self.state.lock().focused = false;
    }

    fn select_all(&self) {
        let mut state = self.state.lock();
        state.selection = Some(0..state.text.len());
    }

    fn apply_traits(&self, traits: &InputTraits) {
        self.state.lock().traits = Some(traits.clone());
    }

    fn set_shows_cancel_button(&self, shows: bool, _animated: bool) {
        self.state.lock().cancel_visible = shows;
    }

    fn set_cancel_button_tint(&self, color: Color) {
        self.state.lock().cancel_tint = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> (HeadlessInput, AddressField) {
        let input = HeadlessInput::new();
        let field = AddressField::new(Arc::new(input.clone()), "Search or enter address");
        (input, field)
    }

    #[test]
    fn test_configured_for_url_entry() {
        let (input, _field) = field();
        let traits = input.snapshot().traits.unwrap();

        assert!(!traits.builtin_cancel_button);
        assert_eq!(traits.keyboard, KeyboardType::Url);
        assert_eq!(traits.autocapitalization, Autocapitalization::None);
        assert_eq!(traits.appearance, FieldAppearance::Minimal);
        assert!(!traits.leading_icon);
        assert!(!traits.left_view);
    }

    #[test]
    fn test_placeholder_falls_back_to_hint() {
        let (input, mut field) = field();

        field.set_placeholder(Some("http://a.com"));
        assert_eq!(
            input.snapshot().placeholder,
            Some(Placeholder::Styled {
                text: "http://a.com".to_string(),
                color: PLACEHOLDER_COLOR,
            })
        );

        field.set_placeholder(None);
        let placeholder = input.snapshot().placeholder.unwrap();
        assert!(placeholder.is_hint());
        assert_eq!(placeholder.text(), "Search or enter address");

        field.set_placeholder(Some(""));
        assert!(input.snapshot().placeholder.unwrap().is_hint());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let (input, mut field) = field();
        input.focus();

        field.set_text("http://a.com");
        field.select_all();
        input.type_text("b");
        input.type_text(".com");

        assert_eq!(field.text(), "b.com");
        assert!(input.snapshot().selection.is_none());
    }
}
