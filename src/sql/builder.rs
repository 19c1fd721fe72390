//! Builds the parameterized SELECT, INSERT, UPDATE, DELETE for the records table.

/// Quote identifier for PostgreSQL (safe: only from config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

/// Columns written by insert/update, in bind order.
pub const FIELD_COLUMNS: [&str; 5] = ["first", "last", "email", "phone", "location"];

/// SELECT list. `id` and `added` are cast so SERIAL/BIGSERIAL ids and TIMESTAMP/TIMESTAMPTZ
/// columns all decode into the same row type.
fn select_column_list() -> String {
    let mut cols = vec![format!("{}::int8 AS {}", quoted("id"), quoted("id"))];
    cols.extend(FIELD_COLUMNS.iter().map(|c| quoted(c)));
    cols.push(format!("{}::timestamptz AS {}", quoted("added"), quoted("added")));
    cols.join(", ")
}

/// The four statements the gateway runs, rendered once for a configured table.
#[derive(Clone, Debug)]
pub struct RecordQueries {
    pub select_all: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl RecordQueries {
    pub fn new(schema: &str, table: &str) -> Self {
        let table = qualified_table(schema, table);
        let cols = select_column_list();

        let insert_cols = FIELD_COLUMNS
            .iter()
            .chain(std::iter::once(&"added"))
            .map(|c| quoted(c))
            .collect::<Vec<_>>();
        let placeholders = (1..=insert_cols.len())
            .map(|n| format!("${}", n))
            .collect::<Vec<_>>();

        let assignments = FIELD_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", quoted(c), i + 1))
            .collect::<Vec<_>>();
        let id_param = FIELD_COLUMNS.len() + 1;

        RecordQueries {
            select_all: format!("SELECT {} FROM {}", cols, table),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                table,
                insert_cols.join(", "),
                placeholders.join(", "),
                cols
            ),
            update: format!(
                "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
                table,
                assignments.join(", "),
                quoted("id"),
                id_param,
                cols
            ),
            delete: format!("DELETE FROM {} WHERE {} = $1", table, quoted("id")),
        }
    }
}
