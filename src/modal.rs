use serde::Serialize;

use crate::project::{modal_title, MediaKind, ProjectCardData, TagLabel};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalMedia {
    pub kind: MediaKind,
    pub src: String,
    pub alt: String,
}

/// What the overlay shows for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalContent {
    pub title_text: String,
    pub media: ModalMedia,
    pub description: String,
    pub tags: Vec<TagLabel>,
    pub details_href: String,
}

impl ModalContent {
    pub fn from_card(card: &ProjectCardData) -> Self {
        Self {
            title_text: modal_title(&card.title),
            media: ModalMedia {
                kind: card.media_kind(),
                src: card.media.clone(),
                alt: format!("{} media", card.title),
            },
            description: card.description.clone(),
            tags: card.tag_labels(),
            details_href: card.details_page.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseControl,
    /// A click that reached the overlay; only a click on the overlay itself,
    /// not on the inner panel, closes it.
    OverlayClick { target_is_overlay: bool },
}

impl CloseTrigger {
    pub fn closes(self) -> bool {
        match self {
            Self::CloseControl => true,
            Self::OverlayClick { target_is_overlay } => target_is_overlay,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModalState {
    shown: Option<ModalContent>,
}

impl ModalState {
    pub fn open(&mut self, card: &ProjectCardData) -> &ModalContent {
        self.shown.insert(ModalContent::from_card(card))
    }

    /// Hides the overlay if `trigger` calls for it. Returns whether it closed.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        if !trigger.closes() {
            return false;
        }
        self.shown.take().is_some()
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    #[cfg(test)]
    pub fn content(&self) -> Option<&ModalContent> {
        self.shown.as_ref()
    }
}
