use serde::Serialize;

pub const SHOW_ALL: &str = "all";

/// Active category of the project grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterState {
    active: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active: SHOW_ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn select(&mut self, filter_value: &str) {
        self.active = filter_value.to_string();
    }

    pub fn shows(&self, category: Option<&str>) -> bool {
        self.active == SHOW_ALL || category == Some(self.active.as_str())
    }

    /// Visibility of each grid card, in order.
    pub fn visibility<'a>(&self, categories: impl IntoIterator<Item = Option<&'a str>>) -> Vec<bool> {
        categories.into_iter().map(|category| self.shows(category)).collect()
    }
}

/// Active marker for each filter button after `clicked` is pressed.
pub fn active_markers(button_count: usize, clicked: usize) -> Vec<bool> {
    (0..button_count).map(|index| index == clicked).collect()
}
