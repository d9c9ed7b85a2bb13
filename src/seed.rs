//! Bulk import of the three listing tables from CSV files.
//!
//! Files carry a header row and map 1:1 onto the column lists below. Rows are
//! streamed with `COPY ... FROM STDIN`, all tables in one transaction.

use std::path::{Path, PathBuf};

use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error while loading {table}: {source}")]
    Database {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct CsvTable {
    pub table: &'static str,
    pub file: &'static str,
    pub columns: &'static str,
    /// Whether the file supplies ids, leaving the id sequence behind.
    pub explicit_ids: bool,
}

/// Parents first so show rows always find their artist and venue.
pub static TABLES: [CsvTable; 3] = [
    CsvTable {
        table: "artists",
        file: "artists.csv",
        columns: "id, name, genres, city, state, phone, website, facebook_link, \
                  seeking_venue, seeking_description, image_link",
        explicit_ids: true,
    },
    CsvTable {
        table: "venues",
        file: "venues.csv",
        columns: "id, name, genres, address, city, state, phone, website, facebook_link, \
                  seeking_talent, seeking_description, image_link",
        explicit_ids: true,
    },
    CsvTable {
        table: "shows",
        file: "shows.csv",
        columns: "venue_id, artist_id, start_time",
        explicit_ids: false,
    },
];

impl CsvTable {
    pub fn copy_statement(&self) -> String {
        format!(
            "COPY {} ({}) FROM STDIN WITH (FORMAT csv, HEADER true, DELIMITER ',')",
            self.table, self.columns
        )
    }

    fn reset_sequence_statement(&self) -> String {
        format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)",
            table = self.table
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    pub rows: Vec<(&'static str, u64)>,
}

pub async fn read_table(dir: &Path, table: &CsvTable) -> Result<Vec<u8>, SeedError> {
    let path = dir.join(table.file);
    match tokio::fs::read(&path).await {
        Ok(contents) => Ok(contents),
        Err(source) => Err(SeedError::Io { path, source }),
    }
}

async fn copy_table(
    conn: &mut PgConnection,
    table: &CsvTable,
    contents: Vec<u8>,
) -> Result<u64, sqlx::Error> {
    let mut copy = conn.copy_in_raw(&table.copy_statement()).await?;
    copy.send(contents).await?;
    let rows = copy.finish().await?;

    if table.explicit_ids {
        sqlx::query(&table.reset_sequence_statement())
            .execute(&mut *conn)
            .await?;
    }
    Ok(rows)
}

/// Loads every table from `dir`. Nothing is committed unless all three load.
pub async fn load_directory(pool: &PgPool, dir: &Path) -> Result<SeedReport, SeedError> {
    let mut files = Vec::with_capacity(TABLES.len());
    for table in &TABLES {
        files.push((table, read_table(dir, table).await?));
    }

    let begin_err = |source: sqlx::Error| SeedError::Database {
        table: "transaction",
        source,
    };
    let mut tx = pool.begin().await.map_err(begin_err)?;

    let mut report = SeedReport::default();
    for (table, contents) in files {
        let rows = copy_table(&mut tx, table, contents)
            .await
            .map_err(|source| SeedError::Database {
                table: table.table,
                source,
            })?;
        info!(table = table.table, rows, "Table loaded");
        report.rows.push((table.table, rows));
    }

    tx.commit().await.map_err(begin_err)?;
    Ok(report)
}
