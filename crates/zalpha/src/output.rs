use std::fmt::Display;
use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Ordered key/value result of one command, rendered per output format.
#[derive(Debug, Default)]
pub struct Report {
    rows: Vec<(String, String)>,
    json: Map<String, Value>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose text form is its `Display`.
    pub fn field<V: Serialize + Display>(self, key: &str, value: V) -> Self {
        let text = value.to_string();
        self.field_with(key, value, text)
    }

    /// Add a field with separate JSON and text renderings.
    pub fn field_with<V: Serialize>(mut self, key: &str, json: V, text: impl Into<String>) -> Self {
        let json = serde_json::to_value(json).unwrap_or(Value::Null);
        self.rows.push((key.to_string(), text.into()));
        self.json.insert(key.to_string(), json);
        self
    }

    pub fn print(&self, format: OutputFormat) {
        println!("{}", self.render(format));
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                serde_json::to_string(&self.json).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["FIELD", "VALUE"]);
                for (key, value) in &self.rows {
                    table.add_row(vec![key.as_str(), value.as_str()]);
                }
                table.to_string()
            }
            OutputFormat::Pretty => {
                let width = self.rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
                self.rows
                    .iter()
                    .map(|(key, value)| format!("{key:<width$}  {value}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    }
}

/// Render a 32-bit I/O word as four bytes, most significant first.
pub fn format_bits(bits: u32) -> String {
    let bytes = bits.to_be_bytes();
    format!(
        "(MSB) {:08b} {:08b} {:08b} {:08b} (LSB)",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}
