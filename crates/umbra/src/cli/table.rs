use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

pub struct Formatter;

#[derive(Debug, Clone, Default)]
pub struct FormatConfig {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl Formatter {
    pub fn render(data: impl IntoIterator<Item = impl Tabled>, config: FormatConfig) -> Table {
        let mut table = Table::new(data);
        if let Some(header) = config.header {
            table.with(Panel::header(header));
        }
        if let Some(footer) = config.footer {
            table.with(Panel::footer(footer));
        }
        table.with(Style::blank());
        table
    }
}
