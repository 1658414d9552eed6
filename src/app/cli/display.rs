//! CLI display utilities for formatting output

use crate::core::styles::StyleRole;
use crate::harness::registry::TestRegistry;
use prettytable::{format, Cell, Row, Table};
use std::io::Write;

/// One listed test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSummary {
    pub name: String,
    pub methods: Option<usize>,
    pub description: String,
}

/// Summarise registry entries in registry order.
///
/// Listing loads each case to count its methods; a case that fails to load is
/// still listed, with no method count.
pub fn summarize_cases(registry: &TestRegistry) -> Vec<CaseSummary> {
    registry
        .entries()
        .iter()
        .map(|entry| {
            let methods = match entry.load() {
                Ok(fragment) => Some(fragment.method_names().len()),
                Err(e) => {
                    log::warn!("Could not load '{}' for listing: {}", entry.name(), e);
                    None
                }
            };
            CaseSummary {
                name: entry.name().to_string(),
                methods,
                description: entry.description().to_string(),
            }
        })
        .collect()
}

fn styled_cell(text: &str, role: StyleRole, use_color: bool) -> Cell {
    let cell = Cell::new(text);
    match role.to_prettytable_spec() {
        Some(spec) if use_color => cell.style_spec(&spec),
        _ => cell,
    }
}

/// Build the case listing table
pub fn build_case_table(cases: &[CaseSummary], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        styled_cell("Case", StyleRole::Header, use_color),
        styled_cell("Tests", StyleRole::Header, use_color),
        styled_cell("Description", StyleRole::Header, use_color),
    ]));

    for case in cases {
        let count = case
            .methods
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        table.add_row(Row::new(vec![
            styled_cell(&case.name, StyleRole::Key, use_color),
            Cell::new(&count).style_spec("r"),
            styled_cell(&case.description, StyleRole::Dim, use_color),
        ]));
    }
    table
}

/// Write the case listing to `out`
pub fn display_case_table<W: Write>(
    out: &mut W,
    registry: &TestRegistry,
    use_color: bool,
) -> std::io::Result<()> {
    if registry.is_empty() {
        writeln!(out, "No test cases registered.")?;
        return Ok(());
    }
    let table = build_case_table(&summarize_cases(registry), use_color);
    table.print(out)?;
    Ok(())
}
