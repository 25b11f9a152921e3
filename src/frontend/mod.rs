mod dom;
mod modal_view;
mod widgets;

use std::cell::RefCell;

use gloo_events::EventListener;
use serde_json::json;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{window, Document, Window};

use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::logging::{log_event, LogLevel};
use widgets::Wiring;

thread_local! {
    static ACTIVE: RefCell<Option<Enhancements>> = const { RefCell::new(None) };
}

/// Every component wired on the current page. Dropping it detaches them all.
pub struct Enhancements {
    config: EnhanceConfig,
    wired: Vec<(&'static str, Wiring)>,
}

impl Enhancements {
    pub fn attach(window: &Window, document: &Document, config: EnhanceConfig) -> Self {
        let attempts = [
            ("theme", widgets::attach_theme(document, config)),
            ("carousel", widgets::attach_carousel(window, document, config)),
            ("hover_preview", widgets::attach_hover(document, config)),
            ("modal", widgets::attach_modal(document, config)),
            ("filter", widgets::attach_filter(document, config)),
        ];

        let mut wired = Vec::new();
        for (component, attempt) in attempts {
            match attempt {
                Ok(wiring) => wired.push((component, wiring)),
                Err(error) => report_inactive(&config, component, &error),
            }
        }

        log_event(
            &config,
            LogLevel::Info,
            "enhance.attached",
            json!({
                "components": wired.iter().map(|(component, _)| *component).collect::<Vec<_>>(),
                "listeners": wired.iter().map(|(_, wiring)| wiring.listener_count()).sum::<usize>(),
                "hoverDelayMs": config.hover_delay_ms,
            }),
        );

        Self { config, wired }
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.wired.iter().map(|(component, _)| *component).collect()
    }

    pub fn detach(mut self) {
        let components = self.component_names();
        self.wired.clear();
        log_event(
            &self.config,
            LogLevel::Info,
            "enhance.detached",
            json!({ "components": components }),
        );
    }
}

fn report_inactive(config: &EnhanceConfig, component: &str, error: &EnhanceError) {
    let level = if error.is_missing_anchor() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log_event(
        config,
        level,
        "enhance.component_inactive",
        json!({ "component": component, "reason": error.to_string() }),
    );
}

fn start(config: EnhanceConfig) -> Result<(), EnhanceError> {
    let window = window().ok_or(EnhanceError::NoWindow)?;
    let document = window.document().ok_or(EnhanceError::NoDocument)?;
    let enhancements = Enhancements::attach(&window, &document, config);

    let previous = ACTIVE.with(|slot| slot.borrow_mut().replace(enhancements));
    if let Some(previous) = previous {
        previous.detach();
    }
    Ok(())
}

pub fn run() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let config = EnhanceConfig::from_root(|name| {
        document
            .document_element()
            .and_then(|root| root.get_attribute(name))
    });

    let launch = move || {
        if let Err(error) = start(config) {
            log_event(
                &config,
                LogLevel::Info,
                "enhance.failed",
                json!({ "reason": error.to_string() }),
            );
        }
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| launch()).forget();
    } else {
        launch();
    }
}

/// Removes every handler the enhancement layer registered on this page.
#[wasm_bindgen(js_name = detachEnhancements)]
pub fn detach() {
    let active = ACTIVE.with(|slot| slot.borrow_mut().take());
    if let Some(enhancements) = active {
        enhancements.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LIGHT_MODE_CLASS;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{Event, HtmlElement, HtmlVideoElement};

    wasm_bindgen_test_configure!(run_in_browser);

    const FIXTURE: &str = r#"
        <button id="theme-toggle">Light Mode</button>
        <div id="carousel-viewport" style="width: 100px; overflow: hidden">
            <div class="carousel-track" style="display: flex">
                <div style="width: 100px; flex: none">one</div>
                <div style="width: 100px; flex: none">two</div>
                <div style="width: 100px; flex: none">three</div>
            </div>
        </div>
        <button id="carousel-prev">&lt;</button>
        <button id="carousel-next">&gt;</button>
        <div id="project-modal" style="display: none">
            <div class="modal-panel">
                <button id="modal-close">x</button>
                <h2 id="modal-title"></h2>
                <div id="modal-media"></div>
                <p id="modal-description"></p>
                <div id="modal-tags"></div>
                <a id="modal-details-link" href="">Details</a>
            </div>
        </div>
        <div class="filter-buttons">
            <button class="filter-btn active" data-filter="all">All</button>
            <button class="filter-btn" data-filter="art">Art</button>
        </div>
        <div class="project-grid">
            <div class="project-card" id="card-art" data-title="Orbit" data-media="orbit.png"
                data-description="Space" data-tags="Artist,Java" data-details-page="orbit.html"
                data-category="art"></div>
            <div class="project-card" id="card-web" data-title="Shop" data-media="shop.png"
                data-description="Store" data-tags="Backend" data-details-page="shop.html"
                data-category="web"></div>
            <div class="project-card" id="card-video" data-title="Reel" data-media="reel.mp4"
                data-description="Showreel" data-tags="Lead Developer,Project Manager"
                data-details-page="reel.html" data-category="game">
                <video id="card-video-media"></video>
            </div>
        </div>
    "#;

    fn fixture() -> (Window, Document) {
        let window = window().expect("browser window");
        let document = window.document().expect("document");
        document.body().expect("body").set_inner_html(FIXTURE);
        (window, document)
    }

    fn element(document: &Document, id: &str) -> HtmlElement {
        document
            .get_element_by_id(id)
            .expect("fixture element")
            .dyn_into::<HtmlElement>()
            .expect("html element")
    }

    fn style_value(element: &HtmlElement, property: &str) -> String {
        element.style().get_property_value(property).expect("style read")
    }

    fn dispatch(target: &web_sys::EventTarget, event_type: &str) {
        let event = Event::new(event_type).expect("event");
        target.dispatch_event(&event).expect("dispatch");
    }

    fn tag_classes(document: &Document) -> Vec<String> {
        let spans = element(document, "modal-tags")
            .query_selector_all("span")
            .expect("tag query");
        (0..spans.length())
            .filter_map(|index| spans.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(|span| span.class_name())
            .collect()
    }

    #[wasm_bindgen_test]
    fn complete_page_wires_every_component() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());

        assert_eq!(
            enhancements.component_names(),
            ["theme", "carousel", "hover_preview", "modal", "filter"]
        );
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn missing_carousel_button_leaves_other_components_active() {
        let (window, document) = fixture();
        element(&document, "carousel-next").remove();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());

        let names = enhancements.component_names();
        assert!(names.contains(&"theme"));
        assert!(names.contains(&"modal"));
        assert!(names.contains(&"filter"));
        assert!(!names.contains(&"carousel"));
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn theme_click_toggles_body_class_and_label() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        let toggle = element(&document, "theme-toggle");
        let body = document.body().expect("body");

        toggle.click();
        assert!(body.class_list().contains(LIGHT_MODE_CLASS));
        assert_eq!(toggle.text_content().as_deref(), Some("Dark Mode"));

        toggle.click();
        assert!(!body.class_list().contains(LIGHT_MODE_CLASS));
        assert_eq!(toggle.text_content().as_deref(), Some("Light Mode"));
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn carousel_next_clamps_and_resize_reclamps_track_offset() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        let track = document
            .query_selector(".carousel-track")
            .expect("track query")
            .expect("track")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        let next = element(&document, "carousel-next");

        next.click();
        assert_eq!(style_value(&track, "transform"), "translateX(-100px)");

        // Three cards, one visible: the last start index is 2.
        next.click();
        next.click();
        assert_eq!(style_value(&track, "transform"), "translateX(-200px)");

        // Two visible now, so index 2 is pulled back to 1.
        element(&document, "carousel-viewport")
            .style()
            .set_property("width", "200px")
            .expect("resize viewport");
        dispatch(&window, "resize");
        assert_eq!(style_value(&track, "transform"), "translateX(-100px)");
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    async fn hover_leave_pauses_and_rewinds_card_video() {
        let (window, document) = fixture();
        let config = EnhanceConfig {
            hover_delay_ms: 100,
            ..EnhanceConfig::default()
        };
        let enhancements = Enhancements::attach(&window, &document, config);
        let card = element(&document, "card-video");
        let video = document
            .get_element_by_id("card-video-media")
            .expect("card video")
            .dyn_into::<HtmlVideoElement>()
            .expect("video element");

        dispatch(&card, "mouseenter");
        dispatch(&card, "mouseleave");
        TimeoutFuture::new(150).await;
        assert!(video.paused());

        dispatch(&card, "mouseenter");
        TimeoutFuture::new(150).await;
        dispatch(&card, "mouseleave");
        assert!(video.paused());
        assert_eq!(video.current_time(), 0.0);
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn filter_click_hides_other_categories_and_moves_active_marker() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        let buttons = document.query_selector_all(".filter-btn").expect("buttons");
        let art_button = buttons
            .item(1)
            .expect("art button")
            .dyn_into::<HtmlElement>()
            .expect("html element");

        art_button.click();

        assert_eq!(style_value(&element(&document, "card-art"), "display"), "block");
        assert_eq!(style_value(&element(&document, "card-web"), "display"), "none");
        assert_eq!(style_value(&element(&document, "card-video"), "display"), "none");
        assert_eq!(document.query_selector_all(".filter-btn.active").expect("query").length(), 1);
        assert!(art_button.class_list().contains("active"));
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn card_click_opens_modal_and_close_hides_it() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        let overlay = element(&document, "project-modal");

        element(&document, "card-art").click();
        assert_eq!(style_value(&overlay, "display"), "flex");
        assert_eq!(
            element(&document, "modal-title").text_content().as_deref(),
            Some("[ Orbit.exe ]")
        );

        element(&document, "modal-description").click();
        assert_eq!(style_value(&overlay, "display"), "flex");

        overlay.click();
        assert_eq!(style_value(&overlay, "display"), "none");
        assert_eq!(element(&document, "modal-media").inner_html(), "");
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    async fn modal_renders_media_by_extension_and_classified_tags() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        let media = element(&document, "modal-media");

        element(&document, "card-art").click();
        TimeoutFuture::new(20).await;
        assert!(media.query_selector("img").expect("img query").is_some());
        assert!(media.query_selector("video").expect("video query").is_none());
        assert_eq!(tag_classes(&document), ["tag-art", "tag-java"]);

        element(&document, "card-video").click();
        TimeoutFuture::new(20).await;
        assert!(media.query_selector("img").expect("img query").is_none());
        let video = media
            .query_selector("video")
            .expect("video query")
            .expect("modal video")
            .dyn_into::<HtmlVideoElement>()
            .expect("video element");
        assert!(video.muted());
        assert!(video.loop_());
        assert_eq!(tag_classes(&document), ["tag-prog", "tag-pm"]);
        enhancements.detach();
    }

    #[wasm_bindgen_test]
    fn detach_removes_handlers() {
        let (window, document) = fixture();
        let enhancements = Enhancements::attach(&window, &document, EnhanceConfig::default());
        enhancements.detach();

        element(&document, "theme-toggle").click();

        let body = document.body().expect("body");
        assert!(!body.class_list().contains(LIGHT_MODE_CLASS));
    }
}
