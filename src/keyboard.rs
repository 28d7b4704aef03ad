//! Keyboard routing.
//!
//! The open modal captures input first; only when no modal is open do arrow
//! keys reach the carousel that has focus. One key press never drives both.
//!
//! | modal | key | action | prevent default |
//! |---|---|---|---|
//! | open | `Escape` | close | no |
//! | open | `ArrowLeft` / `ArrowRight` | modal prev / next | yes |
//! | closed, focus in gallery | `ArrowLeft` / `ArrowRight` | carousel prev / next | yes |
//! | anything else | | ignored | no |

use crate::carousel::GalleryId;
use crate::viewer::{Action, ViewUpdate, Viewer};

/// Keys the router cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value. Only the standard names are
    /// recognised, matching the page script.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// A key press plus the gallery containing the focused element, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub focused_gallery: Option<GalleryId>,
}

impl KeyEvent {
    pub fn new(key: Key, focused_gallery: Option<GalleryId>) -> Self {
        Self {
            key,
            focused_gallery,
        }
    }
}

/// What routing decided for one key press.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The action routed to, if the key was handled.
    pub action: Option<Action>,
    /// Resulting view change; `None` when the action was a no-op.
    pub update: Option<ViewUpdate>,
    /// Whether the browser's default behaviour (scrolling) is suppressed.
    pub prevent_default: bool,
}

/// Pick the action for a key press given whether a modal is open.
pub fn route_action(event: &KeyEvent, modal_open: bool) -> Option<(Action, bool)> {
    if modal_open {
        return match event.key {
            Key::Escape => Some((Action::CloseModal, false)),
            Key::ArrowLeft => Some((Action::ModalPrev, true)),
            Key::ArrowRight => Some((Action::ModalNext, true)),
            Key::Other(_) => None,
        };
    }
    let id = event.focused_gallery.clone()?;
    match event.key {
        Key::ArrowLeft => Some((Action::Prev(id), true)),
        Key::ArrowRight => Some((Action::Next(id), true)),
        Key::Escape | Key::Other(_) => None,
    }
}

/// Route a key press and apply it to the viewer.
pub fn handle_key(viewer: &mut Viewer, event: &KeyEvent) -> KeyOutcome {
    match route_action(event, viewer.modal().is_open()) {
        Some((action, prevent_default)) => KeyOutcome {
            update: viewer.dispatch(action.clone()),
            action: Some(action),
            prevent_default,
        },
        None => KeyOutcome::default(),
    }
}
