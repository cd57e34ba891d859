//! The visual grid component.
//!
//! A grid is configured with columns, samples, and a layered style
//! sheet. Rendering builds a [`GridLayout`] — title cell, header cells,
//! body rows — in two passes: cell texts first, then resolved styles.
//! Only after styles are applied does the grid count as rendered, and
//! every redraw tears the layout down and rebuilds it from scratch, so
//! a partially styled layout is never observable.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::{Column, Sample, SampleCollection};
use crate::style::{CellRole, ResolvedStyle, StyleProps, StyleSheet};

/// Grid construction options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Identifier attached to the grid.
    pub id: Option<String>,
    /// Optional title rendered above the table.
    pub title: Option<String>,
    /// Displayed columns, in display order.
    pub columns: Vec<Column>,
    /// Initial row data.
    pub samples: SampleCollection,
    /// Layered style configuration.
    pub style: StyleSheet,
    /// Placeholder text for cells whose sample lacks the column.
    pub empty_value: String,
}

/// One rendered cell: text plus its resolved style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledCell {
    /// The cell text.
    pub text: String,
    /// The effective style after layer resolution.
    pub style: ResolvedStyle,
}

/// The rendered shape of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLayout {
    /// The title cell, when a title is configured.
    pub title: Option<StyledCell>,
    /// Header cells, one per column.
    pub header: Vec<StyledCell>,
    /// Body rows, one per sample, each with one cell per column.
    pub rows: Vec<Vec<StyledCell>>,
}

/// Optional lifecycle handlers, invoked synchronously at the named
/// points and skipped when absent.
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct GridHooks {
    /// Fired at the start of construction.
    pub on_init: Option<Box<dyn FnMut()>>,
    /// Fired once the grid has been built and rendered.
    pub on_create: Option<Box<dyn FnMut()>>,
    /// Fired before each layout rebuild.
    pub on_before_render: Option<Box<dyn FnMut()>>,
    /// Fired for every rendered body row.
    pub on_each_line: Option<Box<dyn FnMut(usize, &[StyledCell])>>,
    /// Fired when a row click is dispatched.
    pub on_line_click: Option<Box<dyn FnMut(usize, &[StyledCell])>>,
    /// Fired after each layout rebuild, with the fresh layout.
    pub on_after_render: Option<Box<dyn FnMut(&GridLayout)>>,
    /// Fired at the end of every redraw.
    pub on_redraw: Option<Box<dyn FnMut()>>,
    /// Fired when the grid becomes visible.
    pub on_show: Option<Box<dyn FnMut()>>,
    /// Fired when the grid is hidden.
    pub on_hide: Option<Box<dyn FnMut()>>,
    /// Fired when the grid is destroyed.
    pub on_destroy: Option<Box<dyn FnMut()>>,
}

/// A tabular grid with layered per-cell styling.
pub struct Grid {
    id: String,
    title: Option<String>,
    columns: Vec<Column>,
    samples: SampleCollection,
    sheet: StyleSheet,
    empty_value: String,
    hooks: GridHooks,
    layout: GridLayout,
    rendered: bool,
    visible: bool,
    destroyed: bool,
}

impl Grid {
    /// Build a grid from configuration.
    ///
    /// # Errors
    ///
    /// Fails when a column definition has an empty name
    /// ([`Error::MissingColumnName`]) or two columns share a name
    /// ([`Error::DuplicateColumn`]).
    pub fn new(config: GridConfig) -> Result<Self> {
        Self::with_hooks(config, GridHooks::default())
    }

    /// Build a grid with lifecycle hooks attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Grid::new`].
    pub fn with_hooks(config: GridConfig, mut hooks: GridHooks) -> Result<Self> {
        if let Some(f) = hooks.on_init.as_mut() {
            f();
        }

        validate_columns(&config.columns)?;

        let mut grid = Self {
            id: config.id.unwrap_or_else(|| "grid".to_string()),
            title: config.title,
            columns: config.columns,
            samples: config.samples,
            sheet: config.style,
            empty_value: config.empty_value,
            hooks,
            layout: GridLayout::default(),
            rendered: false,
            visible: true,
            destroyed: false,
        };
        grid.redraw();

        if let Some(f) = grid.hooks.on_create.as_mut() {
            f();
        }
        Ok(grid)
    }

    /// The grid identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rebuild the layout from the current samples, columns, and
    /// styles. A destroyed grid ignores redraw requests.
    pub fn redraw(&mut self) {
        if self.destroyed {
            return;
        }

        if let Some(f) = self.hooks.on_before_render.as_mut() {
            f();
        }

        tracing::debug!(
            rows = self.samples.len(),
            columns = self.columns.len(),
            "rebuilding grid layout"
        );

        // Full teardown, then texts, then styles. The rendered flag
        // only flips once styles are in place.
        self.rendered = false;
        self.layout = self.build_cells();
        self.apply_styles();
        self.rendered = true;

        if let Some(f) = self.hooks.on_each_line.as_mut() {
            for (i, row) in self.layout.rows.iter().enumerate() {
                f(i, row);
            }
        }
        if let Some(f) = self.hooks.on_after_render.as_mut() {
            f(&self.layout);
        }
        if let Some(f) = self.hooks.on_redraw.as_mut() {
            f();
        }
    }

    fn build_cells(&self) -> GridLayout {
        let title = self.title.as_ref().map(|text| StyledCell {
            text: text.clone(),
            style: ResolvedStyle::default(),
        });

        let header = self
            .columns
            .iter()
            .map(|column| StyledCell {
                text: column.name.clone(),
                style: ResolvedStyle::default(),
            })
            .collect();

        let rows = self
            .samples
            .iter()
            .map(|sample| {
                self.columns
                    .iter()
                    .map(|column| StyledCell {
                        text: sample
                            .get(&column.name)
                            .map_or_else(|| self.empty_value.clone(), ToString::to_string),
                        style: ResolvedStyle::default(),
                    })
                    .collect()
            })
            .collect();

        GridLayout {
            title,
            header,
            rows,
        }
    }

    fn apply_styles(&mut self) {
        if let Some(cell) = self.layout.title.as_mut() {
            cell.style = self.sheet.resolve(CellRole::Title, None, None);
        }

        for (column, cell) in self.columns.iter().zip(self.layout.header.iter_mut()) {
            cell.style =
                self.sheet
                    .resolve(CellRole::Header, Some(&column.name), column.style.as_ref());
        }

        for row in &mut self.layout.rows {
            for (column, cell) in self.columns.iter().zip(row.iter_mut()) {
                cell.style =
                    self.sheet
                        .resolve(CellRole::Body, Some(&column.name), column.style.as_ref());
            }
        }
    }

    /// Replace every sample and redraw.
    pub fn set_samples(&mut self, samples: SampleCollection) {
        self.samples = samples;
        self.redraw();
    }

    /// Append samples and redraw.
    pub fn add_samples(&mut self, samples: SampleCollection) {
        self.samples.add_samples(samples);
        self.redraw();
    }

    /// Append a single sample and redraw.
    pub fn add_sample(&mut self, sample: Sample) {
        self.samples.add_sample(sample);
        self.redraw();
    }

    /// The current samples.
    #[must_use]
    pub fn samples(&self) -> &SampleCollection {
        &self.samples
    }

    /// The current title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace the title, updating the rendered title cell in place.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        match self.layout.title.as_mut() {
            Some(cell) => cell.text.clone_from(&title),
            None => {
                self.layout.title = Some(StyledCell {
                    text: title.clone(),
                    style: self.sheet.resolve(CellRole::Title, None, None),
                });
            }
        }
        self.title = Some(title);
    }

    /// Make the grid visible.
    pub fn show(&mut self) {
        self.visible = true;
        if let Some(f) = self.hooks.on_show.as_mut() {
            f();
        }
    }

    /// Hide the grid.
    pub fn hide(&mut self) {
        self.visible = false;
        if let Some(f) = self.hooks.on_hide.as_mut() {
            f();
        }
    }

    /// Tear the grid down. Subsequent redraws are ignored.
    pub fn destroy(&mut self) {
        self.layout = GridLayout::default();
        self.rendered = false;
        self.visible = false;
        self.destroyed = true;
        if let Some(f) = self.hooks.on_destroy.as_mut() {
            f();
        }
    }

    /// Whether the grid is currently rendered.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Whether the grid is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the grid has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The rendered layout.
    #[must_use]
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Column definition by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column definition by alias.
    #[must_use]
    pub fn column_by_alias(&self, alias: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.alias.as_deref() == Some(alias))
    }

    /// Merge a style block into a column's inline style and redraw.
    pub fn set_column_style(&mut self, name: &str, style: &StyleProps) {
        let Some(column) = self.columns.iter_mut().find(|c| c.name == name) else {
            return;
        };
        match column.style.as_mut() {
            Some(existing) => existing.merge_from(style),
            None => column.style = Some(style.clone()),
        }
        self.redraw();
    }

    /// Replace a column's inline style outright and redraw.
    pub fn override_column_style(&mut self, name: &str, style: StyleProps) {
        let Some(column) = self.columns.iter_mut().find(|c| c.name == name) else {
            return;
        };
        column.style = Some(style);
        self.redraw();
    }

    /// Remove a column from the display (sample data is untouched) and
    /// redraw.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.retain(|c| c.name != name);
        self.redraw();
    }

    /// Rendered cell at (row, column), by index.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&StyledCell> {
        self.layout.rows.get(row)?.get(column)
    }

    /// Rendered body row by index.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[StyledCell]> {
        self.layout.rows.get(row).map(Vec::as_slice)
    }

    /// Dispatch a click on a body row to the `on_line_click` hook.
    pub fn fire_row_click(&mut self, row: usize) {
        if let (Some(f), Some(cells)) = (
            self.hooks.on_line_click.as_mut(),
            self.layout.rows.get(row),
        ) {
            f(row, cells);
        }
    }

    /// Render the grid as plain text, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        if let Some(title) = &self.layout.title {
            output.push_str(&title.text);
            output.push('\n');
        }

        output.push('|');
        for cell in &self.layout.header {
            output.push_str(&format!(" {} |", cell.text));
        }
        output.push('\n');

        output.push('|');
        for _ in &self.layout.header {
            output.push_str("---|");
        }
        output.push('\n');

        for row in &self.layout.rows {
            output.push('|');
            for cell in row {
                output.push_str(&format!(" {} |", cell.text));
            }
            output.push('\n');
        }

        output
    }
}

fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, column) in columns.iter().enumerate() {
        if column.name.is_empty() {
            return Err(Error::MissingColumnName { index });
        }
        if !seen.insert(column.name.as_str()) {
            return Err(Error::DuplicateColumn {
                name: column.name.clone(),
            });
        }
    }
    Ok(())
}
