//! Database schema types for askdb.
//!
//! Represents the structure of a database as tables and columns, and
//! renders it as the compact text block handed to the language model.

use serde::{Deserialize, Serialize};

/// Represents the complete schema of a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// All tables in the schema.
    pub tables: Vec<Table>,
}

impl Schema {
    /// Creates a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Formats the schema for inclusion in an LLM prompt.
    ///
    /// One line per table: `Table 'name': col1 (type1), col2 (type2), ...`.
    /// An empty schema formats as an empty string.
    pub fn format_for_llm(&self) -> String {
        self.tables
            .iter()
            .map(|table| {
                let columns = table
                    .columns
                    .iter()
                    .map(|col| format!("{} ({})", col.name, col.data_type))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Table '{}': {}\n", table.name, columns)
            })
            .collect()
    }

    /// Returns true if the schema has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Represents a database table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Columns in the table.
    pub columns: Vec<Column>,

    /// Column names that form the primary key.
    pub primary_key: Vec<String>,
}

impl Table {
    /// Creates a new table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Adds a column to the table.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }
}

/// Represents a column in a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Declared data type (e.g., "INTEGER", "TEXT").
    pub data_type: String,

    /// Whether the column allows NULL values.
    pub is_nullable: bool,
}

impl Column {
    /// Creates a new column with the given name and data type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_nullable: true,
        }
    }

    /// Sets whether the column is nullable.
    pub fn nullable(self, nullable: bool) -> Self {
        Self {
            is_nullable: nullable,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema {
            tables: vec![
                Table {
                    name: "departments".to_string(),
                    columns: vec![
                        Column::new("dept_id", "INTEGER").nullable(false),
                        Column::new("dept_name", "TEXT"),
                        Column::new("location", "TEXT"),
                    ],
                    primary_key: vec!["dept_id".to_string()],
                },
                Table {
                    name: "employees".to_string(),
                    columns: vec![
                        Column::new("emp_id", "INTEGER").nullable(false),
                        Column::new("name", "TEXT"),
                        Column::new("salary", "INTEGER"),
                        Column::new("dept_id", "INTEGER"),
                    ],
                    primary_key: vec!["emp_id".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_format_for_llm_one_line_per_table() {
        let formatted = sample_schema().format_for_llm();

        assert_eq!(
            formatted,
            "Table 'departments': dept_id (INTEGER), dept_name (TEXT), location (TEXT)\n\
             Table 'employees': emp_id (INTEGER), name (TEXT), salary (INTEGER), dept_id (INTEGER)\n"
        );
    }

    #[test]
    fn test_format_for_llm_empty_schema() {
        let schema = Schema::new();
        assert_eq!(schema.format_for_llm(), "");
        assert!(schema.is_empty());
    }

    #[test]
    fn test_table_builder() {
        let table = Table::new("users")
            .with_column(Column::new("id", "INTEGER").nullable(false))
            .with_column(Column::new("email", "TEXT"));

        assert_eq!(table.name, "users");
        assert_eq!(table.columns.len(), 2);
        assert!(!table.columns[0].is_nullable);
        assert!(table.columns[1].is_nullable);
    }

    #[test]
    fn test_column_builder() {
        let col = Column::new("salary", "INTEGER").nullable(false);
        assert_eq!(col.name, "salary");
        assert_eq!(col.data_type, "INTEGER");
        assert!(!col.is_nullable);
    }
}
