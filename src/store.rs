//! SQLite persistence for scraped recipes.

use log::info;
use rusqlite::{params, Connection};
use std::path::Path;

use crate::error::{CrawlError, Result};
use crate::model::Recipe;

/// Name of the record table, validated as a plain SQL identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(CrawlError::InvalidTableName(name));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn create_sql(&self) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (
                ID INTEGER PRIMARY KEY,
                Title TEXT,
                Author TEXT,
                Products TEXT,
                Description TEXT
            )"#,
            self.name
        )
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            name: crate::config::default_table(),
        }
    }
}

/// Recipe table in a local SQLite file
pub struct RecordStore {
    conn: Connection,
    schema: TableSchema,
}

impl RecordStore {
    /// Open the database and create the table if it does not exist
    pub fn open(path: &Path, schema: TableSchema) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?, schema)
    }

    /// Open the database without creating the table; a missing table is an error
    pub fn open_existing(path: &Path, schema: TableSchema) -> Result<Self> {
        let conn = Connection::open(path)?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![schema.name],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(CrawlError::TableNotFound(schema.name));
        }
        Ok(Self { conn, schema })
    }

    pub fn open_in_memory(schema: TableSchema) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, schema)
    }

    fn init(conn: Connection, schema: TableSchema) -> Result<Self> {
        conn.execute(&schema.create_sql(), [])?;
        Ok(Self { conn, schema })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Insert every recipe in one transaction.
    ///
    /// Nothing is kept if any insert fails: the transaction rolls back when dropped.
    pub fn write(&mut self, recipes: &[Recipe]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&format!(
                r#"INSERT INTO "{}" (Title, Author, Products, Description) VALUES (?1, ?2, ?3, ?4)"#,
                self.schema.name
            ))?;
            for recipe in recipes {
                stmt.execute(params![
                    recipe.title,
                    recipe.author,
                    recipe.ingredients,
                    recipe.description,
                ])?;
            }
        }
        tx.commit()?;

        info!("Wrote {} recipes to {}", recipes.len(), self.schema.name);
        Ok(recipes.len())
    }

    /// Delete every row, returning how many were removed
    pub fn clear(&mut self) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute(
            &format!(r#"DELETE FROM "{}" WHERE ID >= 1"#, self.schema.name),
            [],
        )?;
        tx.commit()?;

        info!("Cleared {} rows from {}", removed, self.schema.name);
        Ok(removed)
    }

    /// All stored recipes ordered by id
    pub fn load_all(&self) -> Result<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"SELECT ID, Title, Author, Products, Description FROM "{}" ORDER BY ID"#,
            self.schema.name
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(Recipe {
                id: Some(row.get(0)?),
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                author: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                ingredients: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!(r#"SELECT COUNT(*) FROM "{}""#, self.schema.name),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
