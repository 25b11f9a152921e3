use serde::{Deserialize, Serialize};

pub const TITLE_ATTRIBUTE: &str = "title";
pub const MEDIA_ATTRIBUTE: &str = "media";
pub const DESCRIPTION_ATTRIBUTE: &str = "description";
pub const TAGS_ATTRIBUTE: &str = "tags";
pub const DETAILS_PAGE_ATTRIBUTE: &str = "detailsPage";
pub const CATEGORY_ATTRIBUTE: &str = "category";

const VIDEO_EXTENSIONS: [&str; 2] = [".mp4", ".webm"];

/// Static per-card metadata authored in markup (`data-*` attributes).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectCardData {
    pub title: String,
    pub media: String,
    pub description: String,
    pub tags: String,
    pub details_page: String,
    pub category: Option<String>,
}

impl ProjectCardData {
    /// Reads card fields through a dataset lookup keyed by camelCase name.
    /// Absent text fields become empty strings.
    pub fn from_dataset(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            title: get(TITLE_ATTRIBUTE).unwrap_or_default(),
            media: get(MEDIA_ATTRIBUTE).unwrap_or_default(),
            description: get(DESCRIPTION_ATTRIBUTE).unwrap_or_default(),
            tags: get(TAGS_ATTRIBUTE).unwrap_or_default(),
            details_page: get(DETAILS_PAGE_ATTRIBUTE).unwrap_or_default(),
            category: get(CATEGORY_ATTRIBUTE),
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_path(&self.media)
    }

    pub fn tag_labels(&self) -> Vec<TagLabel> {
        split_tags(&self.tags)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if VIDEO_EXTENSIONS.iter().any(|extension| path.ends_with(extension)) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// Visual class of a tag, picked by the first matching keyword rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TagClass {
    Prog,
    Pm,
    Art,
    Design,
    Java,
    Web,
    Default,
}

const TAG_RULES: [(&[&str], TagClass); 6] = [
    (&["programmer", "developer"], TagClass::Prog),
    (&["manager"], TagClass::Pm),
    (&["artist"], TagClass::Art),
    (&["design"], TagClass::Design),
    (&["java"], TagClass::Java),
    (&["backend"], TagClass::Web),
];

impl TagClass {
    pub fn classify(label: &str) -> Self {
        let lowered = label.to_lowercase();
        TAG_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map(|(_, class)| *class)
            .unwrap_or(Self::Default)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Prog => "tag-prog",
            Self::Pm => "tag-pm",
            Self::Art => "tag-art",
            Self::Design => "tag-design",
            Self::Java => "tag-java",
            Self::Web => "tag-web",
            Self::Default => "tag-default",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagLabel {
    pub text: String,
    pub class: TagClass,
}

/// Splits a comma-separated tag string, keeping order. Blank segments are dropped.
pub fn split_tags(raw: &str) -> Vec<TagLabel> {
    raw.split(',')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| TagLabel {
            text: text.to_string(),
            class: TagClass::classify(text),
        })
        .collect()
}

pub fn modal_title(title: &str) -> String {
    format!("[ {title}.exe ]")
}
