//! Table output formatting for CLI commands
//!
//! Renders ranked tasks, suggestions, and dependency graphs using
//! comfy-table, with color-coded quadrants when the terminal allows it.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{Quadrant, ScoredTask, Suggestion};
use crate::services::GraphView;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Format a ranked task list as a table
    pub fn format_scored(&self, tasks: &[ScoredTask]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[
            "#", "ID", "Title", "Score", "Quadrant", "Due", "Hours", "Imp", "Reason",
        ]));

        for (rank, task) in tasks.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&task.id),
                Cell::new(truncate_text(&task.title, 32)),
                Cell::new(format!("{:.3}", task.score)),
                self.quadrant_cell(task.matrix),
                Cell::new(
                    task.due_date
                        .map_or_else(|| "-".to_string(), |d| d.to_string()),
                ),
                Cell::new(format!("{}", task.estimated_hours)),
                Cell::new(task.importance),
                Cell::new(truncate_text(&task.reason, 48)),
            ]);
        }

        table.to_string()
    }

    /// Format suggestions with their explanations
    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "ID", "Title", "Score", "Quadrant", "Why"]));

        for (rank, suggestion) in suggestions.iter().enumerate() {
            let task = &suggestion.task;
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&task.id),
                Cell::new(truncate_text(&task.title, 32)),
                Cell::new(format!("{:.3}", task.score)),
                self.quadrant_cell(task.matrix),
                Cell::new(&suggestion.explanation),
            ]);
        }

        table.to_string()
    }

    /// Format graph nodes, one row per task with its in-batch prerequisites
    pub fn format_graph(&self, view: &GraphView) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Title", "Depends on", "External", "State"]));

        for node in &view.nodes {
            let depends_on: Vec<&str> = view
                .edges
                .iter()
                .filter(|edge| edge.to == node.id)
                .map(|edge| edge.from.as_str())
                .collect();

            let (state, color) = if node.in_cycle {
                ("cycle", Color::Red)
            } else if node.ready {
                ("ready", Color::Green)
            } else {
                ("waiting", Color::Yellow)
            };
            let state_cell = if self.use_colors {
                Cell::new(state).fg(color)
            } else {
                Cell::new(state)
            };

            table.add_row(vec![
                Cell::new(&node.id),
                Cell::new(truncate_text(&node.label, 32)),
                Cell::new(join_or_dash(&depends_on)),
                Cell::new(join_or_dash(&node.external_dependencies)),
                state_cell,
            ]);
        }

        table.to_string()
    }

    fn quadrant_cell(&self, quadrant: Quadrant) -> Cell {
        if self.use_colors {
            Cell::new(quadrant.as_str()).fg(quadrant_color(quadrant))
        } else {
            Cell::new(quadrant.as_str())
        }
    }

    /// Create a base table with common settings
    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Honors NO_COLOR, CLICOLOR, and whether stdout is a terminal
    console::colors_enabled()
}

/// Map quadrant to color
const fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::UrgentImportant => Color::Red,
        Quadrant::UrgentNotImportant => Color::Yellow,
        Quadrant::NotUrgentImportant => Color::Cyan,
        Quadrant::NotUrgentNotImportant => Color::DarkGrey,
    }
}

fn join_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}

/// Truncate text to max length with ellipsis
fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
