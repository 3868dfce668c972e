//! Pending issue log backed by SQLite
//!
//! Calls block the serving loop for the duration of the query.

use super::{ToolDefinition, ToolProvider, ToolSignature};
use crate::types::Result;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS system_issue_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    remark TEXT,
    status INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Oldest issue still pending (status 1)
const OLDEST_PENDING: &str = "SELECT description, remark FROM system_issue_log \
                              WHERE status = 1 ORDER BY created_at ASC LIMIT 1";

pub struct SystemLogTools {
    conn: Arc<Mutex<Connection>>,
}

impl SystemLogTools {
    pub fn open(path: &Path) -> Result<Self> {
        info!("Opening issue log database: {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn oldest_pending(conn: &Mutex<Connection>) -> Result<Option<(String, Option<String>)>> {
    let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);

    let row = conn
        .query_row(OLDEST_PENDING, [], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()?;
    Ok(row)
}

impl ToolProvider for SystemLogTools {
    fn namespace(&self) -> &str {
        "SystemLog"
    }

    fn tools(&self) -> Vec<ToolDefinition> {
        let conn = Arc::clone(&self.conn);

        vec![ToolSignature::new("getSystemLog", "Fetch the oldest pending system issue log entry")
            .handler(move |_| {
                info!("getSystemLog");
                Ok(match oldest_pending(&conn) {
                    Ok(Some((description, remark))) => format!(
                        "Description: {}, remark: {}.",
                        description,
                        remark.as_deref().unwrap_or("none")
                    ),
                    Ok(None) => "No pending issue log found.".to_string(),
                    Err(e) => {
                        error!("Issue log query failed: {}", e);
                        format!("Query failed: {}", e)
                    }
                })
            })]
    }
}
