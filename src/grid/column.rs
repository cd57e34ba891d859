//! Column definitions.

use serde::Deserialize;

use crate::style::StyleProps;

/// One displayed column: name, optional alias, optional inline style.
///
/// In configuration a column may be given either as a bare string or as
/// a full definition:
///
/// ```json
/// ["Nome", { "name": "Idade", "alias": "age", "style": { "bold": true } }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "ColumnSpec")]
pub struct Column {
    /// Display name; must be non-empty and unique within a grid.
    pub name: String,
    /// Optional lookup alias.
    pub alias: Option<String>,
    /// Inline style block, merged into the column's style layer.
    pub style: Option<StyleProps>,
}

impl Column {
    /// Create a column with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            style: None,
        }
    }

    /// Attach a lookup alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Attach an inline style block.
    #[must_use]
    pub fn style(mut self, style: StyleProps) -> Self {
        self.style = Some(style);
        self
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Serde shape: bare string or full definition.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnSpec {
    Name(String),
    Full {
        #[serde(default)]
        name: String,
        #[serde(default)]
        alias: Option<String>,
        #[serde(default)]
        style: Option<StyleProps>,
    },
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        match spec {
            ColumnSpec::Name(name) => Column::new(name),
            ColumnSpec::Full { name, alias, style } => Column {
                name,
                alias,
                style,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let column = Column::new("Tipo").alias("tipo").style(StyleProps::new().bold(true));
        assert_eq!(column.name, "Tipo");
        assert_eq!(column.alias.as_deref(), Some("tipo"));
        assert!(column.style.is_some());
    }

    #[test]
    fn test_column_from_str() {
        let column: Column = "Nome".into();
        assert_eq!(column.name, "Nome");
        assert!(column.alias.is_none());
    }

    #[test]
    fn test_columns_from_mixed_json() {
        let columns: Vec<Column> = serde_json::from_str(
            r#"["Nome", { "name": "Idade", "alias": "age", "style": { "bold": true } }]"#,
        )
        .unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Nome");
        assert_eq!(columns[1].alias.as_deref(), Some("age"));
        assert_eq!(columns[1].style.as_ref().and_then(|s| s.bold), Some(true));
    }

    #[test]
    fn test_nameless_definition_parses_empty() {
        // The missing name is caught at grid construction, not here.
        let columns: Vec<Column> =
            serde_json::from_str(r#"[{ "style": { "bold": true } }]"#).unwrap();
        assert!(columns[0].name.is_empty());
    }
}
