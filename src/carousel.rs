use serde::Serialize;

/// Sliding-window position over a fixed list of equally wide cards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselState {
    card_count: usize,
    card_width: f64,
    slides_visible: usize,
    current_index: usize,
}

impl CarouselState {
    pub fn new(card_count: usize, card_width: f64, container_width: f64) -> Self {
        let mut state = Self {
            card_count,
            card_width: 0.0,
            slides_visible: 1,
            current_index: 0,
        };
        state.resize(card_width, container_width);
        state
    }

    pub fn slides_visible(&self) -> usize {
        self.slides_visible
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Highest index the window may start at; zero when every card fits.
    pub fn max_index(&self) -> usize {
        self.card_count.saturating_sub(self.slides_visible)
    }

    /// Rereads layout measurements. The caller re-applies the position
    /// afterwards through [`CarouselState::move_to`].
    pub fn resize(&mut self, card_width: f64, container_width: f64) {
        if card_width.is_finite() && card_width > 0.0 {
            self.card_width = card_width;
            let fitting = if container_width.is_finite() && container_width > 0.0 {
                (container_width / card_width).floor() as usize
            } else {
                0
            };
            self.slides_visible = fitting.max(1);
        } else {
            // Nothing measurable to slide by.
            self.card_width = 0.0;
            self.slides_visible = self.card_count.max(1);
        }
    }

    pub fn move_to(&mut self, target_index: i64) -> usize {
        let max_index = i64::try_from(self.max_index()).unwrap_or(i64::MAX);
        self.current_index = target_index.clamp(0, max_index) as usize;
        self.current_index
    }

    pub fn next(&mut self) -> usize {
        self.move_to(self.signed_index() + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.move_to(self.signed_index() - 1)
    }

    /// Re-clamps the current position after a resize.
    pub fn reclamp(&mut self) -> usize {
        self.move_to(self.signed_index())
    }

    pub fn offset_px(&self) -> f64 {
        self.card_width * self.current_index as f64
    }

    pub fn transform(&self) -> String {
        format!("translateX(-{}px)", self.offset_px())
    }

    fn signed_index(&self) -> i64 {
        i64::try_from(self.current_index).unwrap_or(i64::MAX)
    }
}
