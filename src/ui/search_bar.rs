//! Single-line search input.

/// Text typed into the search box and whether it has keyboard focus
#[derive(Debug, Default)]
pub struct SearchBar {
    pub active: bool,
    text: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn focus(&mut self) {
        self.active = true;
    }

    /// Drop focus and forget the text
    pub fn clear(&mut self) {
        self.active = false;
        self.text.clear();
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.text.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }
}
