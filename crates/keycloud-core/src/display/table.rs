use crate::core::entry::CredentialEntry;
use crate::utils::text::{mask_secret, truncate_text};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;

struct ColumnWidths {
    id: usize,
    username: usize,
    url: usize,
}

pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
    show_passwords: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
            show_passwords: false,
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => {
                let width = cols as usize;
                Some(width.clamp(40, 200))
            }
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_passwords(mut self, show_passwords: bool) -> Self {
        self.show_passwords = show_passwords;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn column_widths(&self) -> ColumnWidths {
        let total = self.max_width.unwrap_or(80);
        // borders and padding take roughly 16 columns
        let usable = total.saturating_sub(16).max(40);
        ColumnWidths {
            id: (usable / 6).max(6),
            username: (usable / 4).max(8),
            url: (usable * 2 / 5).max(12),
        }
    }

    /// Render entries as a table; passwords are masked unless enabled.
    pub fn render_entries(&self, entries: &[CredentialEntry]) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width as u16);
        }

        let headers = ["#", "ID", "Username", "Password", "URL"];
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(cells);

        let widths = self.column_widths();
        for (index, entry) in entries.iter().enumerate() {
            let id = entry.id().to_string();
            let id_cell = if entry.id().is_pending() {
                self.colored_cell(&truncate_text(&id, widths.id), Color::DarkGrey)
            } else {
                self.colored_cell(&truncate_text(&id, widths.id), Color::Cyan)
            };
            let password = if self.show_passwords {
                entry.password().expose().to_string()
            } else {
                mask_secret(entry.password().expose()).to_string()
            };

            table.add_row(vec![
                Cell::new(index + 1),
                id_cell,
                Cell::new(truncate_text(entry.username(), widths.username)),
                Cell::new(password),
                self.colored_cell(&truncate_text(entry.url(), widths.url), Color::Blue),
            ]);
        }

        let mut output = table.to_string();
        output.push_str(&format!("\nTotal entries: {}", entries.len()));
        output
    }
}
