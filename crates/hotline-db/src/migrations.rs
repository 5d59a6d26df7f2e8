//! Relational layout of the data model, for when the store moves to a real
//! database. The running service does not open a database yet.

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        password    TEXT NOT NULL UNIQUE,
        is_admin    INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS messages (
        id           TEXT PRIMARY KEY,
        sender_id    TEXT NOT NULL REFERENCES users(id),
        receiver_id  TEXT NOT NULL REFERENCES users(id),
        content      TEXT NOT NULL,
        created_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX IF NOT EXISTS idx_messages_pair
        ON messages(sender_id, receiver_id, created_at);

    CREATE TABLE IF NOT EXISTS admin_status (
        id          TEXT PRIMARY KEY DEFAULT 'admin_status',
        status      TEXT NOT NULL DEFAULT 'available'
                        CHECK (status IN ('available', 'busy')),
        updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    INSERT OR IGNORE INTO admin_status (id) VALUES ('admin_status');
";

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    info!("Database migrations complete");
    Ok(())
}
