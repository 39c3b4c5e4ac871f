/// Characters with meaning inside a quoted Solr term.
fn escape_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if ch == '"' || ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Builds `id:("a" OR "b" ...)` for a minimal-field lookup.
pub fn ids_query(ids: &[String]) -> String {
    let terms = ids
        .iter()
        .map(|id| format!("\"{}\"", escape_term(id)))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("id:({terms})")
}
