// Copyright 2026 the Calipers Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification-keyed attribute tables and their display formatting.
//!
//! Each [`NodeKind`] resolves once to a fixed table of
//! `{property, formatter}` pairs; there is no dynamic property-name
//! indexing. Text-bearing elements show typography, image-bearing elements
//! show decoration, and everything else shares the image set.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use calipers_document::{Document, NodeId, NodeKind};

use crate::convert::{parse_px, rgba_to_hex};
use crate::descriptor::Label;

/// How a property value is turned into display text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropertyFormat {
    /// Shown as-is (`font-family`).
    Plain,
    /// `rgb(a)` component text converted to `#rrggbb A%`.
    Color,
    /// Whitespace-separated tokens, each pixel-converted independently
    /// (`border-radius` corners, `font-size`).
    PixelList,
    /// Expanded from the `border-width`/`border-style`/`border-color`
    /// component properties, with width pixel-converted and color
    /// hex-converted.
    Border,
}

/// One row of an attribute table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PropertySpec {
    /// Computed-style property name.
    pub property: &'static str,
    /// Display formatting for the value.
    pub format: PropertyFormat,
}

const TEXT_PROPS: [PropertySpec; 3] = [
    PropertySpec {
        property: "font-family",
        format: PropertyFormat::Plain,
    },
    PropertySpec {
        property: "font-size",
        format: PropertyFormat::PixelList,
    },
    PropertySpec {
        property: "color",
        format: PropertyFormat::Color,
    },
];

const IMAGE_PROPS: [PropertySpec; 3] = [
    PropertySpec {
        property: "border-radius",
        format: PropertyFormat::PixelList,
    },
    PropertySpec {
        property: "border",
        format: PropertyFormat::Border,
    },
    PropertySpec {
        property: "background-color",
        format: PropertyFormat::Color,
    },
];

/// The attribute table for a classification.
pub fn specs_for(kind: NodeKind) -> &'static [PropertySpec] {
    match kind {
        NodeKind::Text => &TEXT_PROPS,
        // Generic blocks share the image-bearing set.
        NodeKind::Image | NodeKind::Generic => &IMAGE_PROPS,
    }
}

/// Formats the attribute labels for an element.
///
/// The box's width/height are always prepended regardless of
/// classification. Properties absent from the style snapshot are skipped;
/// values that fail conversion fall back to their raw text, so a degraded
/// style snapshot yields degraded labels rather than an error.
pub fn format_attributes(
    doc: &Document,
    id: NodeId,
    convert: &dyn Fn(f64) -> String,
) -> Vec<Label> {
    let mut labels = Vec::new();

    let Some(metrics) = doc.metrics(id) else {
        return labels;
    };
    labels.push(Label::new(
        "size",
        alloc::format!("{}/{}", convert(metrics.width()), convert(metrics.height())),
    ));

    let Some(kind) = doc.classify(id) else {
        return labels;
    };
    let Some(data) = doc.data(id) else {
        return labels;
    };

    for spec in specs_for(kind) {
        let value = match spec.format {
            PropertyFormat::Plain => data.style.get(spec.property).map(ToString::to_string),
            PropertyFormat::Color => data
                .style
                .get(spec.property)
                .map(|raw| rgba_to_hex(raw).unwrap_or_else(|| raw.to_string())),
            PropertyFormat::PixelList => data
                .style
                .get(spec.property)
                .map(|raw| format_pixel_list(raw, convert)),
            PropertyFormat::Border => format_border(data, convert),
        };
        if let Some(value) = value {
            labels.push(Label::new(spec.property, value));
        }
    }
    labels
}

/// Pixel-converts each whitespace-separated token independently, handling
/// per-corner radius values and the like.
fn format_pixel_list(raw: &str, convert: &dyn Fn(f64) -> String) -> String {
    let mut out = String::new();
    for (idx, token) in raw.split_whitespace().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        match parse_px(token) {
            Some(px) => out.push_str(&convert(px)),
            None => out.push_str(token),
        }
    }
    out
}

/// Expands the border shorthand from its component properties.
fn format_border(
    data: &calipers_document::ElementData,
    convert: &dyn Fn(f64) -> String,
) -> Option<String> {
    let width = data.style.get("border-width")?;
    let style = data.style.get("border-style")?;
    let color = data.style.get("border-color")?;

    let width = parse_px(width)
        .map(convert)
        .unwrap_or_else(|| width.to_string());
    let color = rgba_to_hex(color).unwrap_or_else(|| color.to_string());
    Some(alloc::format!("{width} {style} {color}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calipers_document::{ComputedStyle, ElementData};
    use kurbo::Rect;

    fn convert(px: f64) -> String {
        crate::convert::format_px(px, 375.0, 375.0)
    }

    fn label<'a>(labels: &'a [Label], text: &str) -> Option<&'a str> {
        labels
            .iter()
            .find(|l| l.text == text)
            .map(|l| l.value.as_str())
    }

    #[test]
    fn size_is_always_first() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                bounds: Rect::new(0.0, 0.0, 120.0, 40.0),
                ..ElementData::new("div")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(labels[0], Label::new("size", "120px/40px"));
    }

    #[test]
    fn text_elements_show_typography() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                text: String::from("hello"),
                style: ComputedStyle::new()
                    .with("font-family", "serif")
                    .with("font-size", "16px")
                    .with("color", "rgb(255, 0, 0)"),
                ..ElementData::new("span")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(label(&labels, "font-family"), Some("serif"));
        assert_eq!(label(&labels, "font-size"), Some("16px"));
        assert_eq!(label(&labels, "color"), Some("#ff0000 0%"));
        assert!(label(&labels, "border").is_none());
    }

    #[test]
    fn image_elements_show_decoration() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                style: ComputedStyle::new()
                    .with("border-radius", "4px 4px 0px 0px")
                    .with("border-width", "2px")
                    .with("border-style", "solid")
                    .with("border-color", "rgba(0, 0, 0, 0.5)")
                    .with("background-color", "rgb(16, 32, 48)"),
                ..ElementData::new("img")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(label(&labels, "border-radius"), Some("4px 4px 0px 0px"));
        assert_eq!(label(&labels, "border"), Some("2px solid #000000 50%"));
        assert_eq!(label(&labels, "background-color"), Some("#102030 0%"));
    }

    #[test]
    fn generic_elements_fall_back_to_the_image_set() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                style: ComputedStyle::new().with("background-color", "rgb(1, 2, 3)"),
                ..ElementData::new("div")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(label(&labels, "background-color"), Some("#010203 0%"));
        assert!(label(&labels, "font-family").is_none());
    }

    #[test]
    fn non_pixel_radius_tokens_pass_through() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                style: ComputedStyle::new().with("border-radius", "50% 8px"),
                ..ElementData::new("img")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(label(&labels, "border-radius"), Some("50% 8px"));
    }

    #[test]
    fn unparseable_color_falls_back_to_raw_text() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                style: ComputedStyle::new().with("background-color", "transparent"),
                ..ElementData::new("div")
            },
        );
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(label(&labels, "background-color"), Some("transparent"));
    }

    #[test]
    fn missing_properties_are_skipped() {
        let mut doc = Document::new();
        let id = doc.insert(None, ElementData::new("div"));
        let labels = format_attributes(&doc, id, &convert);
        assert_eq!(labels.len(), 1, "only the size label should be present");
    }

    #[test]
    fn conversion_function_is_applied_to_pixel_values() {
        let mut doc = Document::new();
        let id = doc.insert(
            None,
            ElementData {
                bounds: Rect::new(0.0, 0.0, 40.0, 40.0),
                style: ComputedStyle::new().with("border-radius", "8px"),
                ..ElementData::new("img")
            },
        );
        // A design-width conversion that doubles values.
        let doubled = |px: f64| crate::convert::format_px(px, 375.0, 750.0);
        let labels = format_attributes(&doc, id, &doubled);
        assert_eq!(label(&labels, "size"), Some("80px/80px"));
        assert_eq!(label(&labels, "border-radius"), Some("16px"));
    }
}
