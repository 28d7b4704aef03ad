//! Full-screen image modal.
//!
//! At most one modal exists. Opening takes a *snapshot* of the originating
//! gallery's images; from then on the modal and the carousel are independent.
//! Navigating the modal never moves the carousel and vice versa.
//!
//! Opening while a modal is already open replaces it. Closing is idempotent.

use crate::carousel::{CarouselRegistry, GalleryId, wrap_next, wrap_prev};
use crate::gallery::{ImageDescriptor, ImageKind};
use maud::{Markup, html};

/// The open modal: its own copy of the images and a current index.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    images: Vec<ImageDescriptor>,
    current_index: usize,
}

impl ModalState {
    /// `None` when `images` is empty or `start` is out of range.
    pub fn new(images: Vec<ImageDescriptor>, start: usize) -> Option<Self> {
        if start >= images.len() {
            return None;
        }
        Some(Self {
            images,
            current_index: start,
        })
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> &ImageDescriptor {
        &self.images[self.current_index]
    }

    pub fn controls_disabled(&self) -> bool {
        self.images.len() == 1
    }

    pub fn view(&self) -> ModalView {
        let image = self.current();
        ModalView {
            src: image.src.clone(),
            alt: image.alt.clone(),
            kind: image.kind,
            counter_text: format!("{} / {}", self.current_index + 1, self.images.len()),
            controls_disabled: self.controls_disabled(),
        }
    }

    pub fn prev(&mut self) -> ModalView {
        self.current_index = wrap_prev(self.current_index, self.images.len());
        self.view()
    }

    pub fn next(&mut self) -> ModalView {
        self.current_index = wrap_next(self.current_index, self.images.len());
        self.view()
    }
}

/// What the modal shows: image, counter and type badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub src: String,
    pub alt: String,
    pub kind: ImageKind,
    /// `"k / n"`, 1-based.
    pub counter_text: String,
    pub controls_disabled: bool,
}

impl ModalView {
    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Owner of the single optional modal.
#[derive(Debug, Default, Clone)]
pub struct ModalController {
    state: Option<ModalState>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ModalState> {
        self.state.as_ref()
    }

    /// Open on a snapshot of gallery `id` at `start`, replacing any open modal.
    ///
    /// A stale id or out-of-range start leaves the controller as it was.
    pub fn open(
        &mut self,
        registry: &CarouselRegistry,
        id: &GalleryId,
        start: usize,
    ) -> Option<ModalView> {
        let gallery = registry.get(id)?;
        let state = ModalState::new(gallery.images().to_vec(), start)?;
        let view = state.view();
        self.state = Some(state);
        Some(view)
    }

    pub fn prev(&mut self) -> Option<ModalView> {
        self.state.as_mut().map(ModalState::prev)
    }

    pub fn next(&mut self) -> Option<ModalView> {
        self.state.as_mut().map(ModalState::next)
    }

    /// Close the modal. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.state.take().is_some()
    }
}

/// Overlay markup for an open modal.
pub fn render_modal(state: &ModalState) -> Markup {
    modal_markup(Some(&state.view()))
}

/// The empty overlay the page script clones and fills in on open.
pub fn render_modal_template() -> Markup {
    html! {
        template #image-modal-template {
            (modal_markup(None))
        }
    }
}

fn modal_markup(view: Option<&ModalView>) -> Markup {
    let counter = view.map(|v| v.counter_text.as_str()).unwrap_or_default();
    let src = view.map(|v| v.src.as_str());
    let alt = view.map(|v| v.alt.as_str()).unwrap_or_default();
    let kind = view.map(|v| v.kind.as_str());
    let label = view.map(ModalView::type_label).unwrap_or_default();
    let disabled = view.is_some_and(|v| v.controls_disabled);

    html! {
        div.image-modal role="dialog" aria-modal="true" {
            div.modal-content {
                div.modal-header {
                    span.modal-counter { (counter) }
                    span.modal-type-badge data-type=[kind] { (label) }
                    button.modal-close type="button" data-action="close-modal" aria-label="Close" {
                        "×"
                    }
                }
                div.modal-carousel {
                    button.modal-nav.prev type="button" data-action="modal-prev"
                        aria-label="Previous image" disabled[disabled] { "‹" }
                    div.modal-image-container {
                        img #modal-image src=[src] alt=(alt);
                    }
                    button.modal-nav.next type="button" data-action="modal-next"
                        aria-label="Next image" disabled[disabled] { "›" }
                }
            }
        }
    }
}
