//! Text node lowering: styled runs, tags, alignment.

use trellis_scene::{
    Node, TextAlignHorizontal, TextAlignVertical, TextCase, TextDecoration, TextSegment,
};

use crate::context::GenerationContext;
use crate::geometry::{fixed, letter_spacing, line_height, LetterSpacingValue};
use crate::ir::TextRun;
use crate::paint::first_solid_color;
use crate::style_table::{decl, Declaration, StyleEntry};

/// Format an em value with up to three decimals.
fn fixed_em(value: f64) -> String {
    let text = format!("{value:.3}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Declarations for one styled run.
pub fn segment_styles(segment: &TextSegment, ctx: &mut GenerationContext<'_>) -> Vec<Declaration> {
    let mut styles = Vec::new();

    if let Some(color) = first_solid_color(&segment.fills) {
        styles.push(decl("color", color));
    }
    styles.push(decl("font-size", format!("{}px", fixed(segment.font_size))));
    if !segment.font_family.is_empty() {
        let family = if segment.font_family.contains(' ') {
            format!("'{}'", segment.font_family)
        } else {
            segment.font_family.clone()
        };
        styles.push(decl("font-family", family));
        ctx.fonts.record(
            &segment.font_family,
            segment.font_weight,
            if segment.italic { "italic" } else { "normal" },
        );
    }
    if segment.font_weight != 400 {
        styles.push(decl("font-weight", segment.font_weight.to_string()));
    }
    if segment.italic {
        styles.push(decl("font-style", "italic"));
    }

    styles.push(decl(
        "line-height",
        format!(
            "{}px",
            fixed(line_height(segment.line_height, segment.font_size))
        ),
    ));
    match letter_spacing(segment.letter_spacing, segment.font_size) {
        LetterSpacingValue::Pixels(px) if px != 0.0 => {
            styles.push(decl("letter-spacing", format!("{}px", fixed(px))));
        }
        LetterSpacingValue::Pixels(_) => {}
        LetterSpacingValue::Em(em) if em != 0.0 => {
            styles.push(decl("letter-spacing", format!("{}em", fixed_em(em))));
        }
        LetterSpacingValue::Em(_) => {}
    }

    match segment.text_decoration {
        TextDecoration::None => {}
        TextDecoration::Underline => styles.push(decl("text-decoration", "underline")),
        TextDecoration::Strikethrough => styles.push(decl("text-decoration", "line-through")),
    }
    match segment.text_case {
        TextCase::Original => {}
        TextCase::Upper => styles.push(decl("text-transform", "uppercase")),
        TextCase::Lower => styles.push(decl("text-transform", "lowercase")),
        TextCase::Title => styles.push(decl("text-transform", "capitalize")),
    }
    styles.push(decl("word-wrap", "break-word"));

    styles
}

/// Inline tag for a run: superscript/subscript win over the plain span.
pub fn segment_tag(segment: &TextSegment) -> Option<&'static str> {
    if segment.open_type_features.subs {
        Some("sub")
    } else if segment.open_type_features.sups {
        Some("sup")
    } else {
        None
    }
}

/// Alignment declarations for the block container of a text node.
pub fn alignment_styles(node: &Node) -> Vec<Declaration> {
    let mut styles = Vec::new();
    match node.text_align_horizontal {
        TextAlignHorizontal::Left => {}
        TextAlignHorizontal::Center => styles.push(decl("text-align", "center")),
        TextAlignHorizontal::Right => styles.push(decl("text-align", "right")),
        TextAlignHorizontal::Justified => styles.push(decl("text-align", "justify")),
    }
    match node.text_align_vertical {
        TextAlignVertical::Top => {}
        TextAlignVertical::Center => {
            styles.push(decl("display", "flex"));
            styles.push(decl("flex-direction", "column"));
            styles.push(decl("justify-content", "center"));
        }
        TextAlignVertical::Bottom => {
            styles.push(decl("display", "flex"));
            styles.push(decl("flex-direction", "column"));
            styles.push(decl("justify-content", "flex-end"));
        }
    }
    styles
}

/// Split a text node into runs.
///
/// Multi-run nodes allocate one class per run so the component
/// dialects can attach per-run styles; a single run collapses into the
/// container and keeps no styles of its own.
pub fn text_runs(node: &Node, ctx: &mut GenerationContext<'_>) -> (Vec<TextRun>, Vec<Declaration>) {
    if node.segments.len() == 1 {
        let segment = &node.segments[0];
        let merged = segment_styles(segment, ctx);
        let run = TextRun {
            tag: segment_tag(segment),
            text: escape_html(&segment.text),
            styles: Vec::new(),
            class_name: None,
        };
        return (vec![run], merged);
    }

    let runs = node
        .segments
        .iter()
        .map(|segment| {
            let styles = segment_styles(segment, ctx);
            let tag = segment_tag(segment);
            let class_name = ctx.styles.class_name(&format!("{}-run", node.name));
            ctx.styles.insert(
                class_name.clone(),
                StyleEntry {
                    styles: styles.clone(),
                    pseudo_styles: Vec::new(),
                    node_name: node.name.clone(),
                    node_kind: node.kind.name(),
                    element: tag.unwrap_or("span").to_string(),
                },
            );
            TextRun {
                tag,
                text: escape_html(&segment.text),
                styles,
                class_name: Some(class_name),
            }
        })
        .collect();

    (runs, Vec::new())
}

/// Escape text content for markup.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NoEmbeddedFonts, NullAssetExporter};
    use crate::settings::Settings;
    use trellis_scene::{Color, LetterSpacing, LineHeight, OpenTypeFeatures, Paint};

    fn ctx(settings: &Settings) -> GenerationContext<'_> {
        GenerationContext::new(settings, &NullAssetExporter, &NoEmbeddedFonts, false)
    }

    fn find<'a>(styles: &'a [Declaration], property: &str) -> Option<&'a str> {
        styles
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    fn segment(text: &str) -> TextSegment {
        TextSegment {
            text: text.to_string(),
            font_family: "Inter".to_string(),
            font_size: 20.0,
            line_height: LineHeight::Percent { value: 150.0 },
            letter_spacing: LetterSpacing::Pixels { value: 0.3 },
            fills: vec![Paint::Solid {
                color: Color::BLACK,
                opacity: None,
                visible: None,
            }],
            ..TextSegment::default()
        }
    }

    #[test]
    fn test_segment_styles_and_font_recording() {
        let settings = Settings::default();
        let mut ctx = ctx(&settings);
        let styles = segment_styles(&segment("hello"), &mut ctx);

        assert_eq!(find(&styles, "color"), Some("#000000"));
        assert_eq!(find(&styles, "font-size"), Some("20px"));
        assert_eq!(find(&styles, "font-family"), Some("Inter"));
        assert_eq!(find(&styles, "line-height"), Some("30px"));
        // 0.3px is under the cross-renderer threshold.
        assert_eq!(find(&styles, "letter-spacing"), None);
        // Default weight is not emitted.
        assert_eq!(find(&styles, "font-weight"), None);
        assert!(ctx.fonts.has_fonts());
    }

    #[test]
    fn test_percent_letter_spacing_uses_em() {
        let settings = Settings::default();
        let mut ctx = ctx(&settings);
        let mut seg = segment("x");
        seg.letter_spacing = LetterSpacing::Percent { value: -3.0 };
        let styles = segment_styles(&seg, &mut ctx);
        assert_eq!(find(&styles, "letter-spacing"), Some("-0.03em"));
    }

    #[test]
    fn test_sub_and_sup_tags() {
        let mut seg = segment("2");
        seg.open_type_features = OpenTypeFeatures {
            subs: true,
            sups: false,
        };
        assert_eq!(segment_tag(&seg), Some("sub"));

        seg.open_type_features = OpenTypeFeatures {
            subs: false,
            sups: true,
        };
        assert_eq!(segment_tag(&seg), Some("sup"));

        seg.open_type_features = OpenTypeFeatures::default();
        assert_eq!(segment_tag(&seg), None);
    }

    #[test]
    fn test_single_run_merges_into_container() {
        let settings = Settings::default();
        let mut ctx = ctx(&settings);
        let node = Node {
            name: "Label".to_string(),
            segments: vec![segment("hi")],
            ..Node::default()
        };
        let (runs, merged) = text_runs(&node, &mut ctx);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].styles.is_empty());
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_multi_run_allocates_classes() {
        let settings = Settings::default();
        let mut ctx = ctx(&settings);
        let node = Node {
            name: "Label".to_string(),
            segments: vec![segment("a"), segment("b")],
            ..Node::default()
        };
        let (runs, merged) = text_runs(&node, &mut ctx);
        assert_eq!(runs.len(), 2);
        assert!(merged.is_empty());
        assert_eq!(runs[0].class_name.as_deref(), Some("Label-run"));
        assert_eq!(runs[1].class_name.as_deref(), Some("Label-run_01"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c"), "a &lt; b &amp; c");
    }
}
