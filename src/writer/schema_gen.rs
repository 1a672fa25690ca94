use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let pk = if col.primary_key { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && !col.primary_key {
            " NOT NULL"
        } else {
            ""
        };
        let unique = if col.unique { " UNIQUE" } else { "" };

        columns.push(format!(
            "    {} {}{}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint,
            unique
        ));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

/// Generate a positional INSERT for every column except the row id
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.insert_columns();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{POKEMON, TEAMS, TYPE_MATCHUPS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&TEAMS);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS teams"));
        assert!(sql.contains("id INTEGER PRIMARY KEY"));
        assert!(sql.contains("team_id TEXT NOT NULL UNIQUE"));
        assert!(sql.contains("source TEXT,"));

        let sql = generate_create_table(&POKEMON);
        assert!(sql.contains("type1 TEXT NOT NULL"));
        assert!(sql.contains("hp REAL"));
        assert!(sql.contains("FOREIGN KEY (team_id) REFERENCES teams(team_id)"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&TYPE_MATCHUPS);
        assert_eq!(
            indexes,
            vec!["CREATE INDEX IF NOT EXISTS idx_type_matchups_pokemon_id ON type_matchups(pokemon_id)"]
        );
        assert!(generate_indexes(&TEAMS).is_empty());
    }

    #[test]
    fn test_generate_insert() {
        assert_eq!(
            generate_insert(&TEAMS),
            "INSERT INTO teams (team_id, source, created_at) VALUES (?, ?, ?)"
        );
    }
}
