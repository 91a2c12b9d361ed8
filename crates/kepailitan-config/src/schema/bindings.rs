//! Element ids the search UI is wired to.

use serde::{Deserialize, Serialize};

/// Interactive elements bound to the search engine at initialization.
///
/// Every id in `inputs` drives the same engine; the desktop and mobile
/// inputs share one result area. `buttons[i]` submits `inputs[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsConfig {
    pub inputs: Vec<String>,
    pub buttons: Vec<String>,
    /// Element showing the status line.
    pub results: String,
    pub previous: String,
    pub next: String,
    pub position: String,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                "search-input-desktop".into(),
                "search-input-mobile".into(),
            ],
            buttons: vec![
                "search-button-desktop".into(),
                "search-button-mobile".into(),
            ],
            results: "search-results-container".into(),
            previous: "search-prev".into(),
            next: "search-next".into(),
            position: "search-position".into(),
        }
    }
}

impl BindingsConfig {
    /// Input submitted by the button with id `button`.
    pub fn input_for_button(&self, button: &str) -> Option<&str> {
        let idx = self.buttons.iter().position(|b| b == button)?;
        self.inputs.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_pair_with_inputs_by_position() {
        let bindings = BindingsConfig::default();
        assert_eq!(
            bindings.input_for_button("search-button-mobile"),
            Some("search-input-mobile")
        );
        assert_eq!(
            bindings.input_for_button("search-button-desktop"),
            Some("search-input-desktop")
        );
        assert_eq!(bindings.input_for_button("search-next"), None);
    }
}
