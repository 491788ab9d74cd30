/// Original and working copies of the user's text.
///
/// `original` only changes through [`TextState::set_original`]; whether the
/// working copy differs is always computed, never tracked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextState {
    original: String,
    current: String,
}

impl TextState {
    pub fn new(initial: impl Into<String>) -> Self {
        let original = initial.into();
        Self {
            current: original.clone(),
            original,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replace both buffers (fresh load or import).
    pub fn set_original(&mut self, text: impl Into<String>) {
        self.original = text.into();
        self.current.clone_from(&self.original);
    }

    /// Replace only the working copy (user edit or applied adjustment).
    pub fn set_current(&mut self, text: impl Into<String>) {
        self.current = text.into();
    }

    pub fn reset(&mut self) {
        self.current.clone_from(&self.original);
    }

    pub fn has_changes(&self) -> bool {
        self.original != self.current
    }
}
