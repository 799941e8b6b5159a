#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Visible,
}

/// URL 輸入對話框
#[derive(Debug, Clone, Default)]
pub struct ModalController {
    state: ModalState,
    url_input: String,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ModalState::Visible
    }

    pub fn open(&mut self) {
        self.state = ModalState::Visible;
    }

    /// Hides the dialog and discards whatever was typed into it.
    pub fn close(&mut self) {
        self.state = ModalState::Hidden;
        self.url_input.clear();
    }

    pub fn url(&self) -> &str {
        &self.url_input
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url_input = url.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let modal = ModalController::new();
        assert_eq!(modal.state(), ModalState::Hidden);
        assert_eq!(modal.url(), "");
    }

    #[test]
    fn test_open_keeps_input() {
        let mut modal = ModalController::new();
        modal.set_url("https://everytime.kr/@abc");
        modal.open();
        assert!(modal.is_visible());
        assert_eq!(modal.url(), "https://everytime.kr/@abc");
    }

    #[test]
    fn test_close_clears_input() {
        let mut modal = ModalController::new();
        modal.open();
        modal.set_url("https://everytime.kr/@abc");
        modal.close();
        assert!(!modal.is_visible());
        assert_eq!(modal.url(), "");
    }
}
