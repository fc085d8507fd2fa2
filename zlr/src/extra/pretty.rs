use std::collections::BTreeSet;

use prettytable::{cell, row, Table as Grid};

use zlr_core::Table;

/// Grid with one row per state and one column per terminal and non-terminal
///
/// Shift cells read `s<n>`, goto cells `<n>`. The last column holds the reduce rule and the
/// accept mark.
pub fn table_grid(table: &Table) -> Grid {
    let terminals: BTreeSet<&str> = table
        .rows()
        .iter()
        .flat_map(|row| row.shift.keys().map(String::as_str))
        .collect();
    let nonterminals: BTreeSet<&str> = table
        .rows()
        .iter()
        .flat_map(|row| row.goto.keys().map(String::as_str))
        .collect();

    let mut grid = Grid::new();
    let mut title = row!["#", "LR(0) items"];
    for name in terminals.iter().chain(nonterminals.iter()) {
        title.add_cell(cell!(name));
    }
    title.add_cell(cell!("Reduce"));
    grid.add_row(title);

    for (i, (row, state)) in table.rows().iter().zip(table.states()).enumerate() {
        let items = state.to_string();
        let mut line = row![i, items.trim_end()];
        for terminal in terminals.iter() {
            line.add_cell(cell!(row
                .shift
                .get(*terminal)
                .map_or(String::new(), |next| format!("s{}", next))));
        }
        for nonterminal in nonterminals.iter() {
            line.add_cell(cell!(row
                .goto
                .get(*nonterminal)
                .map_or(String::new(), |next| next.to_string())));
        }
        let mut reduce = row
            .reduce
            .as_ref()
            .map_or(String::new(), |rule| rule.to_string());
        if row.accept {
            reduce.push_str(" (accept)");
        }
        line.add_cell(cell!(reduce));
        grid.add_row(line);
    }

    grid
}
