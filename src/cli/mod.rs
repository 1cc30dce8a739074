use serde_json::Value;

// Render a list of JSON objects as an ASCII table.
// Returns true if a table was printed, false if the shape was not tabular
// (callers fall back to raw JSON in that case).
pub fn print_list(items: &[Value]) -> bool {
    // Honor env override to force JSON output
    if std::env::var("CARELINK_OUTPUT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false) {
        return false;
    }
    if items.is_empty() {
        println!("(no rows)");
        return true;
    }
    let Some(cols) = collect_columns(items) else { return false };

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| cols.iter().map(|c| display_cell(item.get(c.as_str()))).collect())
        .collect();

    // Compute widths, capped to keep output readable
    let max_col_width: usize = 80;
    let mut widths: Vec<usize> = cols.iter().map(|s| s.len().min(max_col_width)).collect();
    for r in &rows {
        for (i, cell) in r.iter().enumerate() {
            let w = cell.chars().count();
            if w > widths[i] {
                widths[i] = w.min(max_col_width);
            }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", sep);
    println!("{}", build_row(&cols, &widths));
    println!("{}", sep);
    for r in &rows {
        println!("{}", build_row(r, &widths));
    }
    println!("{}", sep);
    println!("rows: {}, cols: {}", rows.len(), cols.len());
    true
}

// Union of keys across all items, first-seen order. None if items are not objects.
fn collect_columns(items: &[Value]) -> Option<Vec<String>> {
    let mut cols: Vec<String> = Vec::new();
    for item in items {
        let obj = item.as_object()?;
        for key in obj.keys() {
            if !cols.iter().any(|c| c == key) {
                cols.push(key.clone());
            }
        }
    }
    Some(cols)
}

fn display_cell(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let raw = cells.get(i).map(String::as_str).unwrap_or("");
        let cell: String = if raw.chars().count() > *w {
            let mut t: String = raw.chars().take(w.saturating_sub(1)).collect();
            t.push('…');
            t
        } else {
            raw.to_string()
        };
        s.push(' ');
        s.push_str(&cell);
        s.push_str(&" ".repeat(w.saturating_sub(cell.chars().count())));
        s.push_str(" |");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let items = vec![json!({"id": 1, "name": "A"}), json!({"id": 2, "status": "booked"})];
        assert_eq!(collect_columns(&items).unwrap(), vec!["id", "name", "status"]);
    }

    #[test]
    fn non_objects_are_not_tabular() {
        assert!(collect_columns(&[json!(1), json!(2)]).is_none());
    }

    #[test]
    fn cells_render_scalars_plainly() {
        assert_eq!(display_cell(Some(&json!("x"))), "x");
        assert_eq!(display_cell(Some(&json!(5))), "5");
        assert_eq!(display_cell(Some(&json!(null))), "");
        assert_eq!(display_cell(None), "");
    }
}
