use zlr_core::Table;

/// Render the LR(0) automaton as a GraphViz digraph
///
/// Every state becomes an HTML table of its items, completed items underlined. Edges carry the
/// symbol of the shift or goto.
pub fn render(table: &Table) -> String {
    let mut lines = Vec::new();
    lines.push("digraph lr0_states {".to_owned());
    for (state_idx, (row, state)) in table.rows().iter().zip(table.states()).enumerate() {
        let mut table_rows: Vec<String> = state
            .items()
            .iter()
            .map(|item| {
                let mut text = escape(&item.to_string());
                if item.is_finite() {
                    text = format!("<U>{}</U>", text);
                }
                format!("      <TR><TD ALIGN=\"LEFT\">{}</TD></TR>", text)
            })
            .collect();
        if row.accept {
            table_rows.push("      <TR><TD><I>accept</I></TD></TR>".to_owned());
        }
        let line = format!(
            r#"  State{} [shape=plain label=<
    <TABLE BORDER="0" CELLBORDER="1" CELLSPACING="0">
      <TR><TD><B>State #{}</B></TD></TR>
{}
    </TABLE>
  >];"#,
            state_idx,
            state_idx,
            table_rows.join("\n")
        );
        lines.push(line);
        for (symbol, next) in row.goto.iter().chain(row.shift.iter()) {
            lines.push(format!(
                r#"  State{} -> State{} [label="{}"];"#,
                state_idx,
                next,
                symbol.replace('\\', "\\\\").replace('"', "\\\"")
            ));
        }
    }
    lines.push("}".to_owned());
    lines.join("\n")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
