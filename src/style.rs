//! Layered style resolution for the grid.
//!
//! Styles come from three sources: base layers for the `title`,
//! `header`, and `body` targets; per-column layers keyed by column name
//! or the wildcard `*`; and each column's own inline style block. For a
//! given cell the layers apply in a fixed order, last write per
//! property wins:
//!
//! 1. the base layer for the cell's role,
//! 2. the wildcard column layer, when its `applies` set covers the role
//!    (an unset `applies` covers header and body),
//! 3. the named-column layer with the inline block merged into it
//!    per-property (the inline block is the later write).
//!
//! `bold`/`italic` flags expand into `font-weight`/`font-style`
//! keywords before the rest of a layer's properties merge, so a later
//! layer can override them like any other property.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Column-layer key that applies to every column.
pub const WILDCARD_COLUMN: &str = "*";

/// Which part of the grid a cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// The grid title cell.
    Title,
    /// A header cell.
    Header,
    /// A body cell.
    Body,
}

/// Grid region a column style layer may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTarget {
    /// Header cells only.
    Header,
    /// Body cells only.
    Body,
}

/// A width or height value: bare numbers mean pixels, strings pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// Pixel count.
    Pixels(f64),
    /// Verbatim CSS-like value (`"50%"`, `"3em"`, ...).
    Raw(String),
}

impl Dimension {
    fn to_css(&self) -> String {
        match self {
            Self::Pixels(n) => format!("{n}px"),
            Self::Raw(s) => s.clone(),
        }
    }
}

/// One style layer: the visual properties a config block may set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleProps {
    /// Restricts a column layer to header and/or body cells. Unset
    /// means both.
    pub applies: Option<Vec<StyleTarget>>,
    /// Text color.
    pub text_color: Option<String>,
    /// Font size (any CSS-like value).
    pub font_size: Option<String>,
    /// Background color.
    pub background_color: Option<String>,
    /// Bold flag; expands to a `font-weight` keyword.
    pub bold: Option<bool>,
    /// Italic flag; expands to a `font-style` keyword.
    pub italic: Option<bool>,
    /// Cell width.
    pub width: Option<Dimension>,
    /// Cell height.
    pub height: Option<Dimension>,
    /// Extra class name attached to matching cells.
    pub css_class: Option<String>,
}

impl StyleProps {
    /// An empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text color.
    #[must_use]
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn font_size(mut self, size: impl Into<String>) -> Self {
        self.font_size = Some(size.into());
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Set the bold flag.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    /// Set the italic flag.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    /// Set the cell width in pixels.
    #[must_use]
    pub fn width_px(mut self, px: f64) -> Self {
        self.width = Some(Dimension::Pixels(px));
        self
    }

    /// Set the cell height in pixels.
    #[must_use]
    pub fn height_px(mut self, px: f64) -> Self {
        self.height = Some(Dimension::Pixels(px));
        self
    }

    /// Set the extra class name.
    #[must_use]
    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }

    /// Restrict the layer to the given targets.
    #[must_use]
    pub fn applies(mut self, targets: Vec<StyleTarget>) -> Self {
        self.applies = Some(targets);
        self
    }

    /// Overwrite every property that `other` sets.
    pub fn merge_from(&mut self, other: &StyleProps) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field.clone();
                }
            };
        }
        take!(applies);
        take!(text_color);
        take!(font_size);
        take!(background_color);
        take!(bold);
        take!(italic);
        take!(width);
        take!(height);
        take!(css_class);
    }

    /// Whether this column layer covers cells of the given role.
    #[must_use]
    pub fn applies_to(&self, role: CellRole) -> bool {
        let target = match role {
            CellRole::Title => return false,
            CellRole::Header => StyleTarget::Header,
            CellRole::Body => StyleTarget::Body,
        };
        match &self.applies {
            None => true,
            Some(targets) => targets.contains(&target),
        }
    }
}

/// The layered style configuration of a grid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSheet {
    /// Base layer for the title cell.
    pub title: Option<StyleProps>,
    /// Base layer for header cells.
    pub header: Option<StyleProps>,
    /// Base layer for body cells.
    pub body: Option<StyleProps>,
    /// Per-column layers, keyed by column name or [`WILDCARD_COLUMN`].
    pub columns: BTreeMap<String, StyleProps>,
}

impl StyleSheet {
    /// Resolve the effective style of one cell.
    ///
    /// `inline` is the column definition's own style block; it merges
    /// into the named-column layer before that layer applies.
    #[must_use]
    pub fn resolve(
        &self,
        role: CellRole,
        column: Option<&str>,
        inline: Option<&StyleProps>,
    ) -> ResolvedStyle {
        let mut resolved = ResolvedStyle::default();

        let base = match role {
            CellRole::Title => self.title.as_ref(),
            CellRole::Header => self.header.as_ref(),
            CellRole::Body => self.body.as_ref(),
        };
        if let Some(layer) = base {
            resolved.apply_layer(layer);
        }

        // Column layers never touch the title cell.
        let Some(name) = column else {
            return resolved;
        };
        if role == CellRole::Title {
            return resolved;
        }

        if let Some(wildcard) = self.columns.get(WILDCARD_COLUMN) {
            if wildcard.applies_to(role) {
                resolved.apply_layer(wildcard);
            }
        }

        let mut named = self.columns.get(name).cloned();
        if let Some(extra) = inline {
            match named.as_mut() {
                Some(layer) => layer.merge_from(extra),
                None => named = Some(extra.clone()),
            }
        }
        if let Some(layer) = named {
            if layer.applies_to(role) {
                resolved.apply_layer(&layer);
            }
        }

        resolved
    }
}

/// The final property mapping applied to one rendered cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedStyle {
    properties: BTreeMap<String, String>,
    classes: Vec<String>,
}

impl ResolvedStyle {
    /// Look up a resolved property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    /// All resolved properties, sorted by name.
    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Extra class names accumulated from the layers, in layer order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether no layer contributed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.classes.is_empty()
    }

    fn apply_layer(&mut self, layer: &StyleProps) {
        // Flag expansion happens before the plain properties so a layer
        // that sets both is internally consistent.
        if layer.bold.is_some() || layer.italic.is_some() {
            self.set(
                "font-weight",
                if layer.bold == Some(true) { "bold" } else { "normal" },
            );
            self.set(
                "font-style",
                if layer.italic == Some(true) { "italic" } else { "normal" },
            );
        }
        if let Some(color) = &layer.text_color {
            self.set("color", color);
        }
        if let Some(size) = &layer.font_size {
            self.set("font-size", size);
        }
        if let Some(color) = &layer.background_color {
            self.set("background-color", color);
        }
        if let Some(width) = &layer.width {
            self.set("width", &width.to_css());
        }
        if let Some(height) = &layer.height {
            self.set("height", &height.to_css());
        }
        if let Some(class) = &layer.css_class {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.clone());
            }
        }
    }

    fn set(&mut self, property: &str, value: &str) {
        self.properties
            .insert(property.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_columns(pairs: Vec<(&str, StyleProps)>) -> StyleSheet {
        StyleSheet {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            ..StyleSheet::default()
        }
    }

    #[test]
    fn test_named_column_beats_wildcard() {
        let sheet = sheet_with_columns(vec![
            ("*", StyleProps::new().background_color("blue")),
            ("Nome", StyleProps::new().background_color("white")),
        ]);

        let style = sheet.resolve(CellRole::Body, Some("Nome"), None);
        assert_eq!(style.get("background-color"), Some("white"));

        let other = sheet.resolve(CellRole::Body, Some("Idade"), None);
        assert_eq!(other.get("background-color"), Some("blue"));
    }

    #[test]
    fn test_base_layer_applies_per_role() {
        let sheet = StyleSheet {
            header: Some(StyleProps::new().background_color("#a2cf63").bold(true)),
            body: Some(StyleProps::new().background_color("#a0e342")),
            ..StyleSheet::default()
        };

        let header = sheet.resolve(CellRole::Header, Some("x"), None);
        assert_eq!(header.get("background-color"), Some("#a2cf63"));
        assert_eq!(header.get("font-weight"), Some("bold"));

        let body = sheet.resolve(CellRole::Body, Some("x"), None);
        assert_eq!(body.get("background-color"), Some("#a0e342"));
        assert_eq!(body.get("font-weight"), None);
    }

    #[test]
    fn test_applies_restricts_target() {
        let sheet = sheet_with_columns(vec![(
            "*",
            StyleProps::new()
                .applies(vec![StyleTarget::Header])
                .text_color("black"),
        )]);

        let header = sheet.resolve(CellRole::Header, Some("x"), None);
        assert_eq!(header.get("color"), Some("black"));

        let body = sheet.resolve(CellRole::Body, Some("x"), None);
        assert_eq!(body.get("color"), None);
    }

    #[test]
    fn test_unset_applies_covers_both() {
        let sheet = sheet_with_columns(vec![("x", StyleProps::new().text_color("red"))]);
        assert_eq!(
            sheet.resolve(CellRole::Header, Some("x"), None).get("color"),
            Some("red")
        );
        assert_eq!(
            sheet.resolve(CellRole::Body, Some("x"), None).get("color"),
            Some("red")
        );
    }

    #[test]
    fn test_inline_merges_into_named_layer() {
        let sheet = sheet_with_columns(vec![(
            "Nome",
            StyleProps::new().text_color("black").font_size("22px"),
        )]);
        let inline = StyleProps::new().text_color("green");

        let style = sheet.resolve(CellRole::Body, Some("Nome"), Some(&inline));
        // Inline is the later write for the shared property...
        assert_eq!(style.get("color"), Some("green"));
        // ...but the named layer's other properties survive.
        assert_eq!(style.get("font-size"), Some("22px"));
    }

    #[test]
    fn test_bold_italic_expand_to_keywords() {
        let sheet = StyleSheet {
            body: Some(StyleProps::new().bold(true)),
            ..StyleSheet::default()
        };
        let style = sheet.resolve(CellRole::Body, Some("x"), None);
        assert_eq!(style.get("font-weight"), Some("bold"));
        // Setting one flag pins the other to its normal keyword.
        assert_eq!(style.get("font-style"), Some("normal"));
    }

    #[test]
    fn test_title_ignores_column_layers() {
        let sheet = StyleSheet {
            title: Some(StyleProps::new().font_size("30px")),
            columns: [(
                WILDCARD_COLUMN.to_string(),
                StyleProps::new().background_color("blue"),
            )]
            .into(),
            ..StyleSheet::default()
        };

        let style = sheet.resolve(CellRole::Title, None, None);
        assert_eq!(style.get("font-size"), Some("30px"));
        assert_eq!(style.get("background-color"), None);
    }

    #[test]
    fn test_css_classes_accumulate_without_duplicates() {
        let sheet = sheet_with_columns(vec![
            ("*", StyleProps::new().css_class("wide")),
            ("x", StyleProps::new().css_class("wide")),
        ]);
        let style = sheet.resolve(CellRole::Body, Some("x"), None);
        assert_eq!(style.classes(), ["wide".to_string()]);
    }

    #[test]
    fn test_dimension_pixels() {
        let sheet = sheet_with_columns(vec![("x", StyleProps::new().width_px(50.0))]);
        let style = sheet.resolve(CellRole::Body, Some("x"), None);
        assert_eq!(style.get("width"), Some("50px"));
    }

    #[test]
    fn test_stylesheet_from_json() {
        let json = r#"{
            "header": { "textColor": "black", "fontSize": "22px", "bold": true },
            "columns": {
                "*": { "applies": ["header"], "backgroundColor": "blue" },
                "Nome": { "backgroundColor": "white", "width": 50, "cssClass": "custom" }
            }
        }"#;
        let sheet: StyleSheet = serde_json::from_str(json).unwrap();

        let header = sheet.resolve(CellRole::Header, Some("Nome"), None);
        assert_eq!(header.get("background-color"), Some("white"));
        assert_eq!(header.get("font-weight"), Some("bold"));
        assert_eq!(header.get("width"), Some("50px"));
        assert_eq!(header.classes(), ["custom".to_string()]);

        let body = sheet.resolve(CellRole::Body, Some("Outra"), None);
        // Wildcard is header-only in this sheet.
        assert_eq!(body.get("background-color"), None);
    }
}
