use std::cell::RefCell;

use web_sys::{Element, HtmlAnchorElement, HtmlElement, HtmlVideoElement};
use yew::prelude::*;
use yew::AppHandle;

use super::dom;
use crate::error::EnhanceError;
use crate::modal::{ModalContent, ModalMedia};
use crate::project::{MediaKind, TagLabel};

#[derive(Properties, PartialEq)]
pub struct MediaViewProps {
    pub media: ModalMedia,
}

#[function_component(MediaView)]
pub fn media_view(props: &MediaViewProps) -> Html {
    let video_ref = use_node_ref();
    let src = AttrValue::from(props.media.src.clone());

    {
        let video_ref = video_ref.clone();
        // The muted attribute only seeds the muted state for parser-created
        // elements, so set the property before autoplay can start.
        use_effect_with(props.media.clone(), move |_| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_default_muted(true);
                video.set_muted(true);
            }
            || ()
        });
    }

    match props.media.kind {
        MediaKind::Video => html! {
            <video
                ref={video_ref}
                src={src}
                autoplay=true
                loop=true
                muted=true
                playsinline=true
                controls=true
            />
        },
        MediaKind::Image => html! {
            <img src={src} alt={props.media.alt.clone()} />
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct TagListProps {
    pub tags: Vec<TagLabel>,
}

#[function_component(TagList)]
pub fn tag_list(props: &TagListProps) -> Html {
    html! {
        <>
            { for props.tags.iter().map(|tag| html! {
                <span class={tag.class.css_class()}>{ tag.text.clone() }</span>
            }) }
        </>
    }
}

struct Mounted {
    media_slot: Element,
    tags_slot: Element,
    media: AppHandle<MediaView>,
    tags: AppHandle<TagList>,
}

/// The page's modal overlay and its content slots.
///
/// Each opening renders into fresh child slots of the media and tag hosts, so
/// closing can detach the old content at once while yew tears down its apps.
pub struct ModalView {
    overlay: HtmlElement,
    title: Element,
    media_host: Element,
    description: Element,
    tags_host: Element,
    details_link: HtmlAnchorElement,
    mounted: RefCell<Option<Mounted>>,
}

impl ModalView {
    pub fn new(
        overlay: HtmlElement,
        title: Element,
        media_host: Element,
        description: Element,
        tags_host: Element,
        details_link: HtmlAnchorElement,
    ) -> Self {
        Self {
            overlay,
            title,
            media_host,
            description,
            tags_host,
            details_link,
            mounted: RefCell::new(None),
        }
    }

    pub fn overlay(&self) -> &HtmlElement {
        &self.overlay
    }

    pub fn show(&self, content: &ModalContent) -> Result<(), EnhanceError> {
        self.unmount();

        self.title.set_text_content(Some(&content.title_text));
        self.description.set_text_content(Some(&content.description));
        self.details_link.set_href(&content.details_href);

        let media_slot = fresh_slot(&self.media_host)?;
        let tags_slot = fresh_slot(&self.tags_host)?;
        let media = yew::Renderer::<MediaView>::with_root_and_props(
            media_slot.clone(),
            MediaViewProps {
                media: content.media.clone(),
            },
        )
        .render();
        let tags = yew::Renderer::<TagList>::with_root_and_props(
            tags_slot.clone(),
            TagListProps {
                tags: content.tags.clone(),
            },
        )
        .render();
        *self.mounted.borrow_mut() = Some(Mounted {
            media_slot,
            tags_slot,
            media,
            tags,
        });

        dom::set_display(&self.overlay, "flex");
        Ok(())
    }

    /// Hides the overlay and detaches the media element, which stops playback.
    pub fn hide(&self) {
        dom::set_display(&self.overlay, "none");
        self.unmount();
    }

    fn unmount(&self) {
        if let Some(mounted) = self.mounted.borrow_mut().take() {
            mounted.media_slot.remove();
            mounted.tags_slot.remove();
            mounted.media.destroy();
            mounted.tags.destroy();
        }
    }
}

/// Empties `host` and appends a new `<div>` for one rendering.
fn fresh_slot(host: &Element) -> Result<Element, EnhanceError> {
    let document = host.owner_document().ok_or(EnhanceError::NoDocument)?;
    let slot = document.create_element("div")?;
    host.set_inner_html("");
    host.append_child(&slot)?;
    Ok(slot)
}
