//! Naming conventions for derived foreign key columns

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Table names are plural (`users`), so reference columns singularize them (`user_id`).
    pub pluralize_table_names: bool,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            pluralize_table_names: true,
        }
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("data", "datum"),
];

/// Best-effort English singular of a table name.
pub fn singularize(word: &str) -> String {
    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return singular.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }

    for suffix in ["sses", "shes", "ches", "xes", "zes", "statuses", "aliases", "buses"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') && !word.ends_with("us") => {
            stem.to_string()
        }
        _ => word.to_string(),
    }
}

/// Conventional foreign key column for a referenced table, e.g. `users` -> `user_id`.
pub fn foreign_key_column(table: &str, conventions: &Conventions) -> String {
    let base = if conventions.pluralize_table_names {
        singularize(table)
    } else {
        table.to_string()
    };
    format!("{}_id", base)
}
