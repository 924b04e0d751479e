//! End-to-end generation tests across dialects.

use trellis_html::{
    AssetExporter, GenerationMode, HtmlGenerator, NoEmbeddedFonts, NullAssetExporter, Settings,
};
use trellis_scene::{parse_scene, Node};

struct FakeAssets;

impl AssetExporter for FakeAssets {
    fn export_image(&self, _node: &Node, _has_children: bool) -> Option<String> {
        Some("data:image/png;base64,NODE".to_string())
    }

    fn export_image_from_hash(&self, hash: &str) -> Option<String> {
        Some(format!("data:image/png;base64,{hash}"))
    }

    fn flatten_to_svg(&self, _node: &Node) -> Option<String> {
        Some("<svg viewBox=\"0 0 24 24\"><path d=\"M0 0h24v24H0z\" /></svg>".to_string())
    }
}

fn generate(json: &str, settings: &Settings) -> trellis_html::Output {
    let nodes = parse_scene(json).unwrap();
    HtmlGenerator::new(settings, &NullAssetExporter, &NoEmbeddedFonts).generate(&nodes)
}

fn settings_for(mode: GenerationMode) -> Settings {
    Settings {
        html_generation_mode: mode,
        ..Settings::default()
    }
}

/// The reference scenario: squircle rectangle with an inside-aligned
/// 1px gradient stroke and a background blur.
const SQUIRCLE_CARD: &str = r#"{
    "type": "RECTANGLE",
    "name": "Hero Card",
    "width": 90,
    "height": 108,
    "cornerRadius": 16,
    "cornerSmoothing": 1,
    "strokeWeight": 1,
    "strokeAlign": "INSIDE",
    "strokes": [{
        "type": "GRADIENT_LINEAR",
        "visible": true,
        "gradientHandlePositions": [
            {"x": 0.0389, "y": 0.0},
            {"x": 0.5, "y": 1.0},
            {"x": -0.4611, "y": 0.1601}
        ],
        "gradientStops": [
            {"color": {"r": 0.9255, "g": 0.9137, "b": 0.9725, "a": 0.2}, "position": 0},
            {"color": {"r": 0.9255, "g": 0.9137, "b": 0.9725, "a": 0}, "position": 0.6218}
        ]
    }],
    "effects": [{"type": "BACKGROUND_BLUR", "radius": 24}]
}"#;

#[test]
fn squircle_gradient_border_card() {
    let output = generate(SQUIRCLE_CARD, &Settings::default());

    assert!(output.markup.contains("position: relative"));
    assert!(output.markup.contains("clip-path: path('M "));
    // The plain radius stays as a compatibility fallback.
    assert!(output.markup.contains("border-radius: 16px"));
    assert!(output.markup.contains("linear-gradient("));
    assert!(output.markup.contains("mask-composite: exclude"));
    assert!(output.markup.contains("backdrop-filter: blur(24px)"));
    // The gradient ring fully replaces the plain border (the baseline
    // reset's `border: 0` is the only border shorthand anywhere).
    assert!(!output.markup.contains("border: 1px"));
    assert!(!output.markup.contains("solid"));
    let stylesheet = output.stylesheet.as_deref().unwrap_or("");
    assert!(!stylesheet.contains("border: "));
    assert!(output.warnings.is_empty());
}

#[test]
fn invisible_gradient_stroke_renders_no_ring() {
    let json = SQUIRCLE_CARD.replace("\"visible\": true", "\"visible\": false");
    let output = generate(&json, &Settings::default());
    assert!(!output.markup.contains("mask-composite"));
    assert!(!output.markup.contains("::before"));
}

#[test]
fn generation_is_idempotent() {
    let settings = Settings::default();
    let nodes = parse_scene(SQUIRCLE_CARD).unwrap();
    let generator = HtmlGenerator::new(&settings, &NullAssetExporter, &NoEmbeddedFonts);

    let first = generator.generate(&nodes);
    let second = generator.generate(&nodes);
    assert_eq!(first.markup, second.markup);
    assert_eq!(first.stylesheet, second.stylesheet);
}

#[test]
fn zero_width_node_renders_children_only() {
    let json = r#"{
        "type": "FRAME",
        "name": "Collapsed",
        "width": 0,
        "height": 100,
        "children": [{
            "type": "RECTANGLE",
            "name": "Inner",
            "x": 5,
            "y": 6,
            "width": 10,
            "height": 10
        }]
    }"#;
    let output = generate(json, &Settings::default());

    // One element: the child. The zero-width frame got no wrapper.
    assert_eq!(output.markup.matches("<div").count(), 1);
    assert!(output.markup.contains("left: 5px"));
    assert!(output.markup.contains("top: 6px"));
}

#[test]
fn ellipse_mask_clips_parent_and_disappears() {
    let json = r#"{
        "type": "FRAME",
        "name": "Masked",
        "width": 200,
        "height": 100,
        "children": [
            {"type": "ELLIPSE", "name": "Mask Shape", "isMask": true,
             "x": 50, "y": 25, "width": 100, "height": 50},
            {"type": "RECTANGLE", "name": "Content", "width": 200, "height": 100}
        ]
    }"#;
    let output = generate(json, &Settings::default());

    assert!(output
        .markup
        .contains("clip-path: ellipse(25.00% 25.00% at 50.00% 50.00%)"));
    assert!(output.markup.contains("overflow: hidden"));
    // Parent and content only; the mask itself never renders.
    assert_eq!(output.markup.matches("<div").count(), 2);
}

#[test]
fn auto_layout_frame_emits_flex() {
    let json = r#"{
        "type": "FRAME",
        "name": "Row",
        "width": 300,
        "height": 60,
        "layoutMode": "HORIZONTAL",
        "itemSpacing": 12,
        "paddingLeft": 8, "paddingRight": 8, "paddingTop": 8, "paddingBottom": 8,
        "primaryAxisAlignItems": "CENTER",
        "counterAxisAlignItems": "CENTER",
        "children": [
            {"type": "RECTANGLE", "name": "A", "width": 40, "height": 40},
            {"type": "RECTANGLE", "name": "B", "width": 40, "height": 40}
        ]
    }"#;
    let output = generate(json, &Settings::default());

    assert!(output.markup.contains("display: flex"));
    assert!(output.markup.contains("gap: 12px"));
    assert!(output.markup.contains("padding: 8px"));
    assert!(output.markup.contains("justify-content: center"));
    // Flex children carry no absolute offsets.
    assert!(!output.markup.contains("left: "));
}

#[test]
fn rotated_auto_layout_falls_back_to_absolute() {
    let json = r#"{
        "type": "FRAME",
        "name": "Tilted",
        "width": 300,
        "height": 60,
        "rotation": 45,
        "layoutMode": "HORIZONTAL",
        "itemSpacing": 12,
        "children": [
            {"type": "RECTANGLE", "name": "A", "x": 0, "y": 0, "width": 40, "height": 40}
        ]
    }"#;
    let output = generate(json, &Settings::default());

    // Flex layout is computed before CSS transforms; rotation forces
    // the absolute fallback.
    assert!(!output.markup.contains("display: flex"));
    assert!(output.markup.contains("transform: rotate(-45deg)"));
    assert!(output.markup.contains("position: absolute"));
}

#[test]
fn degenerate_group_splices_children() {
    let json = r#"{
        "type": "GROUP",
        "name": "Ghost",
        "width": 0,
        "height": 0,
        "children": [
            {"type": "RECTANGLE", "name": "Kept", "width": 10, "height": 10}
        ]
    }"#;
    let output = generate(json, &Settings::default());
    assert_eq!(output.markup.matches("<div").count(), 1);
    assert!(output.markup.contains("width: 10px"));
}

#[test]
fn unsupported_node_warns_and_renders_nothing() {
    let json = r#"[
        {"type": "STICKY", "name": "Note"},
        {"type": "RECTANGLE", "name": "Box", "width": 10, "height": 10}
    ]"#;
    let output = generate(json, &Settings::default());

    assert_eq!(output.markup.matches("<div").count(), 1);
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("Note"));
}

#[test]
fn vector_degrades_to_placeholder_with_warning() {
    let json = r#"{
        "type": "VECTOR",
        "name": "Logo",
        "width": 24,
        "height": 24,
        "canBeFlattened": true
    }"#;
    let output = generate(json, &Settings::default());

    assert!(output.markup.contains("width: 24px"));
    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("Logo"));
}

#[test]
fn vector_flattens_through_asset_exporter() {
    let settings = Settings {
        embed_vectors: true,
        ..Settings::default()
    };
    let nodes = parse_scene(
        r#"{"type": "VECTOR", "name": "Logo", "width": 24, "height": 24,
            "canBeFlattened": true}"#,
    )
    .unwrap();
    let output = HtmlGenerator::new(&settings, &FakeAssets, &NoEmbeddedFonts).generate(&nodes);

    assert!(output.markup.contains("<svg viewBox=\"0 0 24 24\">"));
    assert!(output.warnings.is_empty());
}

#[test]
fn leaf_image_fill_becomes_img_element() {
    let nodes = parse_scene(
        r#"{"type": "RECTANGLE", "name": "Photo", "width": 100, "height": 80,
            "fills": [{"type": "IMAGE", "imageHash": "abc123", "scaleMode": "FILL"}]}"#,
    )
    .unwrap();
    let settings = Settings::default();
    let output = HtmlGenerator::new(&settings, &FakeAssets, &NoEmbeddedFonts).generate(&nodes);

    // The raw fill bytes are preferred over a node export.
    assert!(output.markup.contains("<img"));
    assert!(output.markup.contains("src=\"data:image/png;base64,abc123\""));
    assert!(output.markup.contains("object-fit: cover"));
}

#[test]
fn container_image_fill_becomes_background_layer() {
    let nodes = parse_scene(
        r#"{"type": "FRAME", "name": "Card", "width": 100, "height": 80,
            "fills": [{"type": "IMAGE", "imageHash": "abc123", "scaleMode": "TILE",
                       "scalingFactor": 0.5}],
            "children": [{"type": "RECTANGLE", "name": "Chip", "width": 10, "height": 10}]}"#,
    )
    .unwrap();
    let settings = Settings::default();
    let output = HtmlGenerator::new(&settings, &FakeAssets, &NoEmbeddedFonts).generate(&nodes);

    assert!(output
        .markup
        .contains("background-image: url(data:image/png;base64,NODE)"));
    assert!(output.markup.contains("background-size: 50%"));
    assert!(output.markup.contains("background-repeat: repeat"));
    assert!(!output.markup.contains("<img"));
}

#[test]
fn text_node_collects_fonts_and_emits_import() {
    let json = r#"{
        "type": "TEXT",
        "name": "Title",
        "width": 200,
        "height": 24,
        "segments": [{
            "text": "Hello",
            "fontFamily": "Inter",
            "fontWeight": 700,
            "fontSize": 20,
            "lineHeight": {"unit": "PERCENT", "value": 150},
            "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]
        }]
    }"#;
    let output = generate(json, &Settings::default());

    assert!(output.markup.contains("Hello"));
    assert!(output.markup.contains("font-size: 20px"));
    assert!(output.markup.contains("line-height: 30px"));
    assert!(output.markup.contains("font-weight: 700"));
    assert!(output
        .markup
        .contains("https://fonts.googleapis.com/css2?family=Inter:wght@700"));
    assert!(output.markup.contains("Fonts used in this design"));
}

#[test]
fn multi_run_text_emits_one_tag_per_run() {
    let json = r#"{
        "type": "TEXT",
        "name": "Formula",
        "width": 200,
        "height": 24,
        "segments": [
            {"text": "E = mc", "fontFamily": "Inter", "fontSize": 16},
            {"text": "2", "fontFamily": "Inter", "fontSize": 10,
             "openTypeFeatures": {"SUPS": true}}
        ]
    }"#;
    let output = generate(json, &Settings::default());

    assert!(output.markup.contains("<span style="));
    assert!(output.markup.contains("<sup style="));
    assert!(output.markup.contains("E = mc"));
}

#[test]
fn jsx_dialect_uses_style_objects() {
    let output = generate(SQUIRCLE_CARD, &settings_for(GenerationMode::Jsx));

    assert!(output.markup.contains("style={{"));
    assert!(output.markup.contains("position: 'relative'"));
    // Properties are camelCased for the object syntax.
    assert!(output.markup.contains("borderRadius: '16px'"));
    assert!(output.stylesheet.is_none());
}

#[test]
fn styled_components_dialect_synthesizes_components() {
    let output = generate(SQUIRCLE_CARD, &settings_for(GenerationMode::StyledComponents));

    assert!(output.markup.contains("import styled from \"styled-components\";"));
    assert!(output.markup.contains("const StyledHeroCard = styled.div`"));
    assert!(output.markup.contains("&::before {"));
    assert!(output.markup.contains("export const HeroCard = () => {"));
    assert!(output.markup.contains("<StyledHeroCard />"));
    assert!(output.stylesheet.is_none());
}

#[test]
fn svelte_dialect_scopes_styles_and_picks_semantic_tags() {
    let json = r#"{
        "type": "FRAME",
        "name": "Login Button",
        "width": 120,
        "height": 40,
        "children": [{
            "type": "TEXT",
            "name": "Label",
            "width": 100,
            "height": 20,
            "segments": [{"text": "Sign in", "fontFamily": "Inter", "fontSize": 14}]
        }]
    }"#;
    let output = generate(json, &settings_for(GenerationMode::Svelte));

    assert!(output.markup.contains("<button class=\"LoginButton\">"));
    assert!(output.markup.contains("<p class=\"Label\">Sign in</p>"));
    assert!(output.markup.contains("<style>"));
    assert!(output.markup.contains(".LoginButton {"));
    assert!(output.stylesheet.is_none());
}

#[test]
fn plain_dialect_exposes_stylesheet() {
    let output = generate(SQUIRCLE_CARD, &Settings::default());
    let stylesheet = output.stylesheet.unwrap();
    assert!(stylesheet.contains(".HeroCard {"));
    assert!(stylesheet.contains(".HeroCard::before {"));
}

#[test]
fn preview_wraps_multi_node_selection_and_reports_size() {
    let json = r#"[
        {"type": "RECTANGLE", "name": "A", "width": 100, "height": 50},
        {"type": "RECTANGLE", "name": "B", "width": 80, "height": 30}
    ]"#;
    let nodes = parse_scene(json).unwrap();
    let settings = settings_for(GenerationMode::StyledComponents);
    let generator = HtmlGenerator::new(&settings, &NullAssetExporter, &NoEmbeddedFonts);
    let preview = generator.generate_preview(&nodes);

    // Preview always uses the plain dialect.
    assert!(!preview.content.contains("styled-components"));
    assert!(preview
        .content
        .starts_with("<div style=\"width: 100%; height: 100%\">"));
    assert_eq!(preview.width, 100.0);
    assert_eq!(preview.height, 80.0);
}

#[test]
fn class_names_stay_unique_across_duplicate_layer_names() {
    let json = r#"[
        {"type": "RECTANGLE", "name": "Card", "width": 10, "height": 10},
        {"type": "RECTANGLE", "name": "Card", "width": 10, "height": 10}
    ]"#;
    let output = generate(json, &Settings::default());
    let stylesheet = output.stylesheet.unwrap();
    assert!(stylesheet.contains(".Card {"));
    assert!(stylesheet.contains(".Card_01 {"));
}
