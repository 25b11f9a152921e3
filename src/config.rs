use crate::logging::LogLevel;

pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const LIGHT_MODE_CLASS: &str = "light-mode";

pub const CAROUSEL_TRACK_SELECTOR: &str = ".carousel-track";
pub const CAROUSEL_PREV_ID: &str = "carousel-prev";
pub const CAROUSEL_NEXT_ID: &str = "carousel-next";

pub const PROJECT_CARD_SELECTOR: &str = ".project-card";

pub const MODAL_ID: &str = "project-modal";
pub const MODAL_CLOSE_ID: &str = "modal-close";
pub const MODAL_TITLE_ID: &str = "modal-title";
pub const MODAL_MEDIA_ID: &str = "modal-media";
pub const MODAL_DESCRIPTION_ID: &str = "modal-description";
pub const MODAL_TAGS_ID: &str = "modal-tags";
pub const MODAL_DETAILS_LINK_ID: &str = "modal-details-link";

pub const FILTER_CONTAINER_SELECTOR: &str = ".filter-buttons";
pub const FILTER_BUTTON_SELECTOR: &str = ".filter-btn";
pub const FILTER_GRID_CARD_SELECTOR: &str = ".project-grid .project-card";
pub const FILTER_ACTIVE_CLASS: &str = "active";

pub const HOVER_DELAY_ATTRIBUTE: &str = "data-hover-delay-ms";
pub const LOG_LEVEL_ATTRIBUTE: &str = "data-log-level";

const DEFAULT_HOVER_DELAY_MS: u32 = 2_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Off;

const HOVER_DELAY_MS_BOUNDS: (u32, u32) = (100, 10_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnhanceConfig {
    pub hover_delay_ms: u32,
    pub log_level: LogLevel,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            hover_delay_ms: DEFAULT_HOVER_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EnhanceConfig {
    /// Builds the runtime config from attribute overrides on the document root.
    ///
    /// `attribute` returns the raw value of a root attribute, if present. Values
    /// that fail to parse or fall outside their bounds keep the default.
    pub fn from_root(attribute: impl Fn(&str) -> Option<String>) -> Self {
        let hover_delay_ms = parse_u32_with_bounds(
            attribute(HOVER_DELAY_ATTRIBUTE).as_deref(),
            DEFAULT_HOVER_DELAY_MS,
            HOVER_DELAY_MS_BOUNDS,
        );
        let log_level = attribute(LOG_LEVEL_ATTRIBUTE)
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            hover_delay_ms,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}
