use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, EventTarget, HtmlAnchorElement, HtmlElement, HtmlVideoElement, Window};

use super::dom;
use super::modal_view::ModalView;
use crate::carousel::CarouselState;
use crate::config::{
    EnhanceConfig, CAROUSEL_NEXT_ID, CAROUSEL_PREV_ID, CAROUSEL_TRACK_SELECTOR,
    FILTER_ACTIVE_CLASS, FILTER_BUTTON_SELECTOR, FILTER_CONTAINER_SELECTOR,
    FILTER_GRID_CARD_SELECTOR, LIGHT_MODE_CLASS, MODAL_CLOSE_ID, MODAL_DESCRIPTION_ID,
    MODAL_DETAILS_LINK_ID, MODAL_ID, MODAL_MEDIA_ID, MODAL_TAGS_ID, MODAL_TITLE_ID,
    PROJECT_CARD_SELECTOR, THEME_TOGGLE_ID,
};
use crate::error::EnhanceError;
use crate::filter::{active_markers, FilterState};
use crate::hover::{DelayScheduler, HoverPreview, Playback};
use crate::logging::{log_event, LogLevel};
use crate::modal::{CloseTrigger, ModalState};
use crate::project::{ProjectCardData, CATEGORY_ATTRIBUTE};
use crate::theme::Theme;

const FILTER_ATTRIBUTE: &str = "filter";

/// Handlers registered by one component. Dropping it removes the handlers and
/// runs the component's teardown.
pub struct Wiring {
    listeners: Vec<EventListener>,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Wiring {
    fn new(listeners: Vec<EventListener>) -> Self {
        Self {
            listeners,
            teardown: None,
        }
    }

    fn with_teardown(mut self, teardown: impl FnOnce() + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for Wiring {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

pub fn attach_theme(document: &Document, config: EnhanceConfig) -> Result<Wiring, EnhanceError> {
    let toggle: HtmlElement = dom::require(dom::by_id(document, THEME_TOGGLE_ID), "#theme-toggle")?;
    let body = dom::require(document.body(), "body")?;

    let target = toggle.clone();
    let listener = EventListener::new(&target, "click", move |_| {
        let next = Theme::from_light_flag(dom::has_class(&body, LIGHT_MODE_CLASS)).toggled();
        dom::set_class(&body, LIGHT_MODE_CLASS, next.is_light());
        toggle.set_text_content(Some(next.toggle_label()));
        log_event(&config, LogLevel::Debug, "theme.toggled", json!({ "theme": next }));
    });

    Ok(Wiring::new(vec![listener]))
}

pub fn attach_carousel(
    window: &Window,
    document: &Document,
    config: EnhanceConfig,
) -> Result<Wiring, EnhanceError> {
    let track = dom::require(dom::query(document, CAROUSEL_TRACK_SELECTOR), CAROUSEL_TRACK_SELECTOR)?;
    let prev: HtmlElement = dom::require(dom::by_id(document, CAROUSEL_PREV_ID), "#carousel-prev")?;
    let next: HtmlElement = dom::require(dom::by_id(document, CAROUSEL_NEXT_ID), "#carousel-next")?;
    let cards = dom::children(&track);

    let measure = {
        let track = track.clone();
        let first_card = cards.first().cloned();
        move || {
            let card_width = first_card
                .as_ref()
                .map(|card| card.get_bounding_client_rect().width())
                .unwrap_or(0.0);
            let container_width = track
                .parent_element()
                .map(|parent| f64::from(parent.client_width()))
                .unwrap_or(0.0);
            (card_width, container_width)
        }
    };

    let (card_width, container_width) = measure();
    let state = Rc::new(RefCell::new(CarouselState::new(
        cards.len(),
        card_width,
        container_width,
    )));

    let step = {
        let track = track.clone();
        let state = state.clone();
        move |advance: fn(&mut CarouselState) -> usize| {
            let mut state = state.borrow_mut();
            advance(&mut state);
            apply_carousel_transform(&track, &state);
            log_event(
                &config,
                LogLevel::Debug,
                "carousel.moved",
                json!({
                    "index": state.current_index(),
                    "maxIndex": state.max_index(),
                    "slidesVisible": state.slides_visible(),
                }),
            );
        }
    };

    let on_next = {
        let step = step.clone();
        EventListener::new(&next, "click", move |_| step(CarouselState::next))
    };
    let on_prev = {
        let step = step.clone();
        EventListener::new(&prev, "click", move |_| step(CarouselState::prev))
    };
    let on_resize = {
        let state = state.clone();
        EventListener::new(window, "resize", move |_| {
            let (card_width, container_width) = measure();
            let mut state = state.borrow_mut();
            state.resize(card_width, container_width);
            state.reclamp();
            apply_carousel_transform(&track, &state);
        })
    };

    Ok(Wiring::new(vec![on_next, on_prev, on_resize]))
}

fn apply_carousel_transform(track: &HtmlElement, state: &CarouselState) {
    let _ = track.style().set_property("transform", &state.transform());
}

pub struct TimeoutScheduler;

impl DelayScheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

pub struct VideoPlayback(HtmlVideoElement);

impl Playback for VideoPlayback {
    fn play(&self) {
        let Ok(promise) = self.0.play() else {
            return;
        };
        // Interrupted or blocked playback is not reported.
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }

    fn reset(&self) {
        let _ = self.0.pause();
        self.0.set_current_time(0.0);
    }
}

pub fn attach_hover(document: &Document, config: EnhanceConfig) -> Result<Wiring, EnhanceError> {
    let preview = Rc::new(RefCell::new(HoverPreview::new(
        TimeoutScheduler,
        config.hover_delay_ms,
    )));
    let mut listeners = Vec::new();

    for (index, card) in dom::query_all(document, PROJECT_CARD_SELECTOR)
        .into_iter()
        .enumerate()
    {
        let Some(video) = card
            .query_selector("video")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok())
        else {
            continue;
        };
        let playback = Rc::new(VideoPlayback(video));

        listeners.push({
            let preview = preview.clone();
            let playback = playback.clone();
            EventListener::new(&card, "mouseenter", move |_| {
                preview.borrow_mut().pointer_enter(index, playback.clone());
            })
        });
        listeners.push({
            let preview = preview.clone();
            EventListener::new(&card, "mouseleave", move |_| {
                preview.borrow_mut().pointer_leave(index, playback.as_ref());
            })
        });
    }

    if listeners.is_empty() {
        return Err(EnhanceError::MissingAnchor(".project-card video"));
    }

    Ok(Wiring::new(listeners).with_teardown(move || preview.borrow_mut().cancel_all()))
}

pub fn attach_modal(document: &Document, config: EnhanceConfig) -> Result<Wiring, EnhanceError> {
    let overlay: HtmlElement = dom::require(dom::by_id(document, MODAL_ID), "#project-modal")?;
    let close: HtmlElement = dom::require(dom::by_id(document, MODAL_CLOSE_ID), "#modal-close")?;
    let view = Rc::new(ModalView::new(
        overlay,
        dom::require(document.get_element_by_id(MODAL_TITLE_ID), "#modal-title")?,
        dom::require(document.get_element_by_id(MODAL_MEDIA_ID), "#modal-media")?,
        dom::require(
            document.get_element_by_id(MODAL_DESCRIPTION_ID),
            "#modal-description",
        )?,
        dom::require(document.get_element_by_id(MODAL_TAGS_ID), "#modal-tags")?,
        dom::require::<HtmlAnchorElement>(
            dom::by_id(document, MODAL_DETAILS_LINK_ID),
            "#modal-details-link",
        )?,
    ));
    let state = Rc::new(RefCell::new(ModalState::default()));
    let mut listeners = Vec::new();

    for card in dom::query_all(document, PROJECT_CARD_SELECTOR) {
        let view = view.clone();
        let state = state.clone();
        let target = card.clone();
        listeners.push(EventListener::new(&target, "click", move |_| {
            let data = ProjectCardData::from_dataset(|key| dom::dataset_value(&card, key));
            let content = state.borrow_mut().open(&data).clone();
            match view.show(&content) {
                Ok(()) => log_event(&config, LogLevel::Debug, "modal.opened", json!({ "card": data })),
                Err(error) => log_event(
                    &config,
                    LogLevel::Info,
                    "modal.render_failed",
                    json!({ "reason": error.to_string() }),
                ),
            }
        }));
    }

    let close_with = {
        let view = view.clone();
        let state = state.clone();
        move |trigger: CloseTrigger| {
            if !trigger.closes() {
                return;
            }
            state.borrow_mut().close(trigger);
            view.hide();
            log_event(&config, LogLevel::Debug, "modal.closed", json!({}));
        }
    };

    listeners.push({
        let close_with = close_with.clone();
        EventListener::new(&close, "click", move |_| close_with(CloseTrigger::CloseControl))
    });
    listeners.push({
        let overlay_target: EventTarget = view.overlay().clone().into();
        EventListener::new(&overlay_target.clone(), "click", move |event| {
            let target_is_overlay = event.target().as_ref() == Some(&overlay_target);
            close_with(CloseTrigger::OverlayClick { target_is_overlay });
        })
    });

    Ok(Wiring::new(listeners).with_teardown(move || {
        state.borrow_mut().close(CloseTrigger::CloseControl);
        view.hide();
    }))
}

pub fn attach_filter(document: &Document, config: EnhanceConfig) -> Result<Wiring, EnhanceError> {
    let container = dom::require(dom::query(document, FILTER_CONTAINER_SELECTOR), FILTER_CONTAINER_SELECTOR)?;
    let buttons = Rc::new(dom::query_all_within(&container, FILTER_BUTTON_SELECTOR));
    let grid_cards = Rc::new(dom::query_all(document, FILTER_GRID_CARD_SELECTOR));
    let state = Rc::new(RefCell::new(FilterState::default()));

    let listeners = buttons
        .iter()
        .enumerate()
        .map(|(clicked, button)| {
            let buttons = buttons.clone();
            let grid_cards = grid_cards.clone();
            let state = state.clone();
            let pressed = button.clone();
            EventListener::new(button, "click", move |_| {
                let filter_value = dom::dataset_value(&pressed, FILTER_ATTRIBUTE).unwrap_or_default();

                for (button, active) in buttons.iter().zip(active_markers(buttons.len(), clicked)) {
                    dom::set_class(button, FILTER_ACTIVE_CLASS, active);
                }

                let mut state = state.borrow_mut();
                state.select(&filter_value);
                let categories: Vec<Option<String>> = grid_cards
                    .iter()
                    .map(|card| dom::dataset_value(card, CATEGORY_ATTRIBUTE))
                    .collect();
                let visibility = state.visibility(categories.iter().map(Option::as_deref));
                for (card, shown) in grid_cards.iter().zip(&visibility) {
                    dom::set_display(card, if *shown { "block" } else { "none" });
                }

                log_event(
                    &config,
                    LogLevel::Debug,
                    "filter.applied",
                    json!({
                        "filter": state.active(),
                        "shown": visibility.iter().filter(|shown| **shown).count(),
                        "hidden": visibility.iter().filter(|shown| !**shown).count(),
                    }),
                );
            })
        })
        .collect::<Vec<_>>();

    if listeners.is_empty() {
        return Err(EnhanceError::MissingAnchor(FILTER_BUTTON_SELECTOR));
    }

    Ok(Wiring::new(listeners))
}
