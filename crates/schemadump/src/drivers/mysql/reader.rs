//! MySQL/MariaDB metadata reader.
//!
//! Implements [`MetadataSource`] and [`SchemaLoader`] on top of a SQLx pool
//! holding a single connection.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Executor, Row};
use tracing::{debug, info};

use crate::config::SourceConfig;
use crate::core::identifier::quote_mysql;
use crate::core::traits::{ColumnRow, IndexRow, MetadataSource, SchemaLoader};
use crate::error::{DumpError, Result};

/// Connection pool timeout.
const POOL_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL/MariaDB metadata reader.
pub struct MysqlReader {
    pool: MySqlPool,
    database: String,
}

impl MysqlReader {
    /// Connect using the source configuration.
    ///
    /// The connection must select a default database; every metadata query
    /// is scoped to it.
    pub async fn connect(config: &SourceConfig) -> Result<Self> {
        let options = match &config.url {
            Some(url) => MySqlConnectOptions::from_str(url)
                .map_err(|e| DumpError::Config(format!("invalid source.url: {}", e)))?,
            None => MySqlConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .database(&config.database)
                .username(&config.user)
                .password(&config.password),
        };

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_CONNECTION_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DumpError::database(e, "creating MySQL pool"))?;

        let row: MySqlRow = sqlx::query("SELECT CAST(DATABASE() AS CHAR(255)) AS db")
            .fetch_one(&pool)
            .await
            .map_err(|e| DumpError::database(e, "reading current MySQL database"))?;
        let database = row
            .try_get::<Option<String>, _>("db")
            .map_err(|e| DumpError::database(e, "reading current MySQL database"))?
            .ok_or_else(|| {
                DumpError::Config("source connection does not select a database".into())
            })?;

        info!(
            "Connected to MySQL: {} (database '{}')",
            config.display_target(),
            database
        );

        Ok(Self { pool, database })
    }

    /// Name of the database being inspected.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Test the database connection.
    pub async fn test_connection(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DumpError::database(e, "testing MySQL connection"))?;
        Ok(())
    }

    /// Close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Read a text column that may arrive as a binary string.
///
/// `SHOW` statements report some columns with a binary collation depending
/// on server version, which SQLx refuses to decode as `String`.
fn get_text(row: &MySqlRow, column: &str) -> Option<String> {
    if let Ok(value) = row.try_get::<Option<String>, _>(column) {
        return value;
    }
    row.try_get::<Option<Vec<u8>>, _>(column)
        .ok()
        .flatten()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Read an integer column regardless of its declared width and signedness.
fn get_int(row: &MySqlRow, column: &str) -> Option<i64> {
    if let Ok(value) = row.try_get::<i64, _>(column) {
        return Some(value);
    }
    if let Ok(value) = row.try_get::<u64, _>(column) {
        return i64::try_from(value).ok();
    }
    if let Ok(value) = row.try_get::<i32, _>(column) {
        return Some(value as i64);
    }
    get_text(row, column).and_then(|s| s.trim().parse().ok())
}

fn required_text(row: &MySqlRow, column: &str, context: &str) -> Result<String> {
    get_text(row, column)
        .ok_or_else(|| DumpError::database(format!("missing value for {}", column), context))
}

fn required_int(row: &MySqlRow, column: &str, context: &str) -> Result<i64> {
    get_int(row, column)
        .ok_or_else(|| DumpError::database(format!("missing value for {}", column), context))
}

#[async_trait]
impl MetadataSource for MysqlReader {
    async fn list_tables(&self) -> Result<Vec<String>> {
        // CAST to CHAR to handle collation differences where information_schema
        // may return VARBINARY instead of VARCHAR
        let query = r#"
            SELECT CAST(TABLE_NAME AS CHAR(255)) AS TABLE_NAME
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
            ORDER BY TABLE_NAME
        "#;

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DumpError::database(e, "listing MySQL tables"))?;

        let tables = rows
            .iter()
            .map(|row| required_text(row, "TABLE_NAME", "listing MySQL tables"))
            .collect::<Result<Vec<_>>>()?;

        debug!("Listed {} tables in '{}'", tables.len(), self.database);
        Ok(tables)
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        let query = r#"
            SELECT COUNT(*) AS cnt
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
        "#;

        let row: MySqlRow = sqlx::query(query)
            .bind(table)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DumpError::database(e, "checking MySQL table presence"))?;

        Ok(required_int(&row, "cnt", "checking MySQL table presence")? > 0)
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnRow>> {
        let query = r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR(255)) AS COLUMN_NAME,
                CAST(COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
                IF(IS_NULLABLE = 'YES', 1, 0) AS is_nullable,
                CAST(COLUMN_DEFAULT AS CHAR) AS COLUMN_DEFAULT,
                CAST(EXTRA AS CHAR(255)) AS EXTRA
            FROM INFORMATION_SCHEMA.COLUMNS
            WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;
        let context = "describing MySQL columns";

        let rows: Vec<MySqlRow> = sqlx::query(query)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DumpError::database(e, context))?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(ColumnRow {
                name: required_text(row, "COLUMN_NAME", context)?,
                column_type: required_text(row, "COLUMN_TYPE", context)?,
                nullable: required_int(row, "is_nullable", context)? == 1,
                default: get_text(row, "COLUMN_DEFAULT"),
                extra: get_text(row, "EXTRA").unwrap_or_default(),
            });
        }

        debug!("Described {} columns for {}", columns.len(), table);
        Ok(columns)
    }

    async fn describe_indexes(&self, table: &str) -> Result<Vec<IndexRow>> {
        // SHOW INDEX is the only source that preserves key declaration order.
        // Table names cannot be bound, so the name is validated and quoted.
        let sql = format!("SHOW INDEX FROM {}", quote_mysql(table)?);
        let context = "describing MySQL indexes";

        let rows: Vec<MySqlRow> = self
            .pool
            .fetch_all(sql.as_str())
            .await
            .map_err(|e| DumpError::database(e, context))?;

        let mut indexes = Vec::with_capacity(rows.len());
        for row in &rows {
            let seq = required_int(row, "Seq_in_index", context)?;
            let seq_in_index = u32::try_from(seq).map_err(|_| {
                DumpError::database(format!("invalid Seq_in_index {}", seq), context)
            })?;

            // Functional key parts have no column name
            let column_name = get_text(row, "Column_name")
                .or_else(|| get_text(row, "Expression"))
                .unwrap_or_default();

            indexes.push(IndexRow {
                index_name: required_text(row, "Key_name", context)?,
                column_name,
                unique: required_int(row, "Non_unique", context)? == 0,
                seq_in_index,
            });
        }

        debug!("Described {} index rows for {}", indexes.len(), table);
        Ok(indexes)
    }

    fn db_type(&self) -> &str {
        "mysql"
    }
}

#[async_trait]
impl SchemaLoader for MysqlReader {
    async fn execute(&self, statement: &str) -> Result<()> {
        self.pool
            .execute(statement)
            .await
            .map_err(|e| DumpError::database(e, "executing schema statement"))?;
        Ok(())
    }
}
