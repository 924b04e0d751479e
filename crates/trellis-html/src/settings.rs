//! Generation settings.

use serde::Deserialize;

/// Output dialect of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    /// Plain markup with inline styles plus a separate stylesheet.
    #[default]
    Html,
    /// JSX markup with inline `style={{...}}` objects.
    Jsx,
    /// React component source with CSS-in-JS style blocks.
    StyledComponents,
    /// Component markup with a trailing scoped `<style>` block.
    Svelte,
}

impl GenerationMode {
    /// Dialects that surface declarations as inline attributes.
    pub fn is_inline(&self) -> bool {
        matches!(self, GenerationMode::Html | GenerationMode::Jsx)
    }
}

/// Configuration for a generation run.
///
/// Deserialized from the host's settings object; unknown keys are
/// ignored since that object also carries UI-only options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub html_generation_mode: GenerationMode,
    /// Attempt to flatten vector-capable nodes into embedded assets.
    pub embed_vectors: bool,
    /// Base URL for custom font files when no embedded bytes exist.
    pub custom_font_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            html_generation_mode: GenerationMode::default(),
            embed_vectors: false,
            custom_font_base_url: "/fonts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.html_generation_mode, GenerationMode::Html);
        assert!(!settings.embed_vectors);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let settings: Settings = serde_json::from_str(
            r#"{"htmlGenerationMode": "styled-components", "uiTheme": "dark"}"#,
        )
        .unwrap();
        assert_eq!(
            settings.html_generation_mode,
            GenerationMode::StyledComponents
        );
    }

    #[test]
    fn test_mode_names() {
        let settings: Settings =
            serde_json::from_str(r#"{"htmlGenerationMode": "jsx"}"#).unwrap();
        assert_eq!(settings.html_generation_mode, GenerationMode::Jsx);
        assert!(settings.html_generation_mode.is_inline());
    }
}
