//! Font collection and import-directive generation.
//!
//! Builders record every (family, weight, style) they emit; at final
//! assembly the registry turns into import directives: one batched
//! remote stylesheet request for known web fonts, `@font-face` blocks
//! for custom fonts, nothing for system fonts.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::assets::FontProvider;

/// Families shipped with common platforms; no import needed.
const SYSTEM_FONTS: &[&str] = &[
    "Arial",
    "Helvetica",
    "Times New Roman",
    "Times",
    "Courier New",
    "Courier",
    "Verdana",
    "Georgia",
    "Palatino",
    "Garamond",
    "Bookman",
    "Comic Sans MS",
    "Trebuchet MS",
    "Impact",
    "Lucida Sans",
    "Tahoma",
    "Lucida Console",
    "Monaco",
    "Brush Script MT",
    "Luminari",
    "Geneva",
    "Optima",
    "Candara",
    "Calibri",
    "Cambria",
    "Consolas",
    "Segoe UI",
    "system-ui",
    "-apple-system",
    "BlinkMacSystemFont",
];

/// Families loadable from the public web-font service.
const WEB_FONTS: &[&str] = &[
    "Roboto",
    "Open Sans",
    "Lato",
    "Montserrat",
    "Oswald",
    "Source Sans Pro",
    "Raleway",
    "PT Sans",
    "Merriweather",
    "Nunito",
    "Playfair Display",
    "Poppins",
    "Inter",
    "Work Sans",
    "Noto Sans",
    "Rubik",
    "Mukta",
    "Ubuntu",
    "Libre Baskerville",
    "Karla",
];

/// Category of a font family, deciding which directive it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCategory {
    System,
    KnownWeb,
    Custom,
}

/// Weights and styles seen for one family.
#[derive(Debug, Clone, Default)]
pub struct FontInfo {
    pub weights: BTreeSet<u16>,
    pub styles: BTreeSet<String>,
}

/// Import directives for everything the run used.
#[derive(Debug, Clone, Default)]
pub struct FontManifest {
    /// Batched stylesheet URL covering all known web fonts.
    pub web_fonts_url: Option<String>,
    /// `@font-face` blocks for custom fonts.
    pub font_faces: Option<String>,
    /// Human-readable usage listing, for audit output.
    pub summary: Option<String>,
}

/// Registry of fonts used during one generation run.
#[derive(Debug, Default)]
pub struct FontCollector {
    fonts: IndexMap<String, FontInfo>,
}

/// Categorize a family by membership in the fixed name sets.
pub fn categorize(family: &str) -> FontCategory {
    if SYSTEM_FONTS.contains(&family) {
        FontCategory::System
    } else if WEB_FONTS.contains(&family) {
        FontCategory::KnownWeb
    } else {
        FontCategory::Custom
    }
}

/// Conventional file-name token for a weight.
fn weight_name(weight: u16) -> String {
    match weight {
        100 => "Thin".to_string(),
        200 => "ExtraLight".to_string(),
        300 => "Light".to_string(),
        400 => "Regular".to_string(),
        500 => "Medium".to_string(),
        600 => "SemiBold".to_string(),
        700 => "Bold".to_string(),
        800 => "ExtraBold".to_string(),
        900 => "Black".to_string(),
        other => other.to_string(),
    }
}

impl FontCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one usage. Empty family names are ignored; quotes are
    /// stripped and whitespace trimmed before merging.
    pub fn record(&mut self, family: &str, weight: u16, style: &str) {
        let normalized: String = family
            .chars()
            .filter(|ch| *ch != '\'' && *ch != '"')
            .collect::<String>()
            .trim()
            .to_string();
        if normalized.is_empty() {
            return;
        }

        let info = self.fonts.entry(normalized).or_default();
        info.weights.insert(weight);
        info.styles.insert(style.to_string());
    }

    pub fn has_fonts(&self) -> bool {
        !self.fonts.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &String> {
        self.fonts.keys()
    }

    /// Build the import directives for everything recorded so far.
    pub fn manifest(&self, provider: &dyn FontProvider, base_url: &str) -> FontManifest {
        if self.fonts.is_empty() {
            return FontManifest::default();
        }

        let mut web = Vec::new();
        let mut custom = Vec::new();
        let mut system = Vec::new();
        for (family, info) in &self.fonts {
            match categorize(family) {
                FontCategory::KnownWeb => web.push((family, info)),
                FontCategory::Custom => custom.push((family, info)),
                FontCategory::System => system.push(family),
            }
        }

        FontManifest {
            web_fonts_url: web_fonts_url(&web),
            font_faces: custom_font_faces(&custom, provider, base_url),
            summary: summary(&web, &custom, &system),
        }
    }
}

fn web_fonts_url(fonts: &[(&String, &FontInfo)]) -> Option<String> {
    if fonts.is_empty() {
        return None;
    }
    let params: Vec<String> = fonts
        .iter()
        .map(|(family, info)| {
            let weights: Vec<String> = info.weights.iter().map(u16::to_string).collect();
            format!(
                "family={}:wght@{}",
                family.replace(' ', "+"),
                weights.join(";")
            )
        })
        .collect();
    Some(format!(
        "https://fonts.googleapis.com/css2?{}&display=swap",
        params.join("&")
    ))
}

fn custom_font_faces(
    fonts: &[(&String, &FontInfo)],
    provider: &dyn FontProvider,
    base_url: &str,
) -> Option<String> {
    if fonts.is_empty() {
        return None;
    }

    let mut faces = Vec::new();
    for (family, info) in fonts {
        for &weight in &info.weights {
            // Embedded bytes keep the output self-contained; the URL
            // naming convention is the fallback.
            let source = match provider.font_bytes(family, weight) {
                Some(bytes) => format!("data:font/woff2;base64,{bytes}"),
                None => format!(
                    "{base_url}/{}-{}.woff2",
                    family.replace(' ', ""),
                    weight_name(weight)
                ),
            };
            faces.push(format!(
                "@font-face {{\n  font-family: '{family}';\n  src: url('{source}') format('woff2');\n  font-weight: {weight};\n  font-style: normal;\n  font-display: swap;\n}}"
            ));
        }
    }
    Some(faces.join("\n\n"))
}

fn summary(
    web: &[(&String, &FontInfo)],
    custom: &[(&String, &FontInfo)],
    system: &[&String],
) -> Option<String> {
    let mut lines = vec!["Fonts used in this design:".to_string()];

    if !web.is_empty() {
        lines.push("Web fonts (auto-loaded):".to_string());
        for (family, info) in web {
            lines.push(format!("  - {family} (weights: {})", weight_list(info)));
        }
    }
    if !custom.is_empty() {
        lines.push("Custom fonts (embedded or hosted):".to_string());
        for (family, info) in custom {
            lines.push(format!("  - {family} (weights: {})", weight_list(info)));
        }
    }
    if !system.is_empty() {
        lines.push("System fonts (no import needed):".to_string());
        for family in system {
            lines.push(format!("  - {family}"));
        }
    }

    Some(lines.join("\n"))
}

fn weight_list(info: &FontInfo) -> String {
    info.weights
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
