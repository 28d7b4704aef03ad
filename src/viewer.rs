//! Page interaction state and action dispatch.
//!
//! The [`Viewer`] owns every piece of mutable interaction state on the page:
//! the carousel registry and the optional modal. Handlers receive it
//! explicitly instead of rediscovering state from the rendered tree.
//!
//! Markup declares behaviour with data attributes; [`Action::from_attributes`]
//! is the registration step that turns them into typed actions:
//!
//! | `data-action` | needs | action |
//! |---|---|---|
//! | `prev` / `next` | `data-carousel` | [`Action::Prev`] / [`Action::Next`] |
//! | `go-to` | `data-carousel`, `data-index` | [`Action::GoTo`] |
//! | `open-modal` | `data-carousel`, `data-index` | [`Action::OpenModal`] |
//! | `modal-prev` / `modal-next` | | [`Action::ModalPrev`] / [`Action::ModalNext`] |
//! | `close-modal` | | [`Action::CloseModal`] |

use crate::carousel::{CarouselRegistry, CarouselView, GalleryId, GalleryInstance};
use crate::modal::{ModalController, ModalView};

/// A user interaction with a gallery or the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Prev(GalleryId),
    Next(GalleryId),
    GoTo(GalleryId, usize),
    OpenModal(GalleryId, usize),
    ModalPrev,
    ModalNext,
    CloseModal,
}

impl Action {
    /// Build an action from an element's `data-action`, `data-carousel` and
    /// `data-index` attributes. Incomplete or unknown combinations yield `None`.
    pub fn from_attributes(
        action: &str,
        carousel: Option<&str>,
        index: Option<&str>,
    ) -> Option<Self> {
        let id = || carousel.map(GalleryId::new);
        let index = || index.and_then(|i| i.parse::<usize>().ok());
        match action {
            "prev" => Some(Action::Prev(id()?)),
            "next" => Some(Action::Next(id()?)),
            "go-to" => Some(Action::GoTo(id()?, index()?)),
            "open-modal" => Some(Action::OpenModal(id()?, index()?)),
            "modal-prev" => Some(Action::ModalPrev),
            "modal-next" => Some(Action::ModalNext),
            "close-modal" => Some(Action::CloseModal),
            _ => None,
        }
    }
}

/// The observable result of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Carousel { id: GalleryId, view: CarouselView },
    Modal(ModalView),
    ModalClosed,
}

/// Explicit owner of carousel and modal state.
#[derive(Debug, Default, Clone)]
pub struct Viewer {
    carousels: CarouselRegistry,
    modal: ModalController,
}

impl Viewer {
    pub fn new(galleries: impl IntoIterator<Item = GalleryInstance>) -> Self {
        Self {
            carousels: galleries.into_iter().collect(),
            modal: ModalController::new(),
        }
    }

    pub fn carousels(&self) -> &CarouselRegistry {
        &self.carousels
    }

    pub fn carousels_mut(&mut self) -> &mut CarouselRegistry {
        &mut self.carousels
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    /// Apply one action. `None` means nothing changed (stale id, no modal,
    /// out-of-range index).
    pub fn dispatch(&mut self, action: Action) -> Option<ViewUpdate> {
        match action {
            Action::Prev(id) => {
                let view = self.carousels.prev(&id)?;
                Some(ViewUpdate::Carousel { id, view })
            }
            Action::Next(id) => {
                let view = self.carousels.next(&id)?;
                Some(ViewUpdate::Carousel { id, view })
            }
            Action::GoTo(id, index) => {
                let view = self.carousels.go_to(&id, index)?;
                Some(ViewUpdate::Carousel { id, view })
            }
            Action::OpenModal(id, index) => self
                .modal
                .open(&self.carousels, &id, index)
                .map(ViewUpdate::Modal),
            Action::ModalPrev => self.modal.prev().map(ViewUpdate::Modal),
            Action::ModalNext => self.modal.next().map(ViewUpdate::Modal),
            Action::CloseModal => self.modal.close().then_some(ViewUpdate::ModalClosed),
        }
    }
}
