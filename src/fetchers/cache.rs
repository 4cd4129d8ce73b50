//! SQLite-backed store of fetched page bodies, keyed by URL.

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;

pub struct ResponseCache {
    conn: Connection,
    expire_after: Option<Duration>,
}

impl ResponseCache {
    /// Open (or create) the cache file
    pub fn open(path: &Path, expire_after: Option<Duration>) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?, expire_after)
    }

    pub fn in_memory(expire_after: Option<Duration>) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, expire_after)
    }

    fn init(conn: Connection, expire_after: Option<Duration>) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS responses (
                url TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn, expire_after })
    }

    /// Cached body for `url`, or `None` when absent or expired
    pub fn get(&self, url: &str) -> Result<Option<String>> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT body, fetched_at FROM responses WHERE url = ?1",
                params![url],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(match row {
            Some((body, fetched_at)) if !self.is_expired(fetched_at) => Some(body),
            Some(_) => {
                debug!("Cached response for {} expired", url);
                None
            }
            None => None,
        })
    }

    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (url, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![url, body, now_secs()],
        )?;
        Ok(())
    }

    /// Drop every cached response, returning how many were removed
    pub fn clear(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM responses", [])?)
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn is_expired(&self, fetched_at: i64) -> bool {
        match self.expire_after {
            Some(limit) => {
                let limit = i64::try_from(limit.as_secs()).unwrap_or(i64::MAX);
                now_secs().saturating_sub(fetched_at) >= limit
            }
            None => false,
        }
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let cache = ResponseCache::in_memory(None).unwrap();
        assert!(cache.get("https://example.com/a").unwrap().is_none());

        cache.put("https://example.com/a", "<html>a</html>").unwrap();
        assert_eq!(
            cache.get("https://example.com/a").unwrap().as_deref(),
            Some("<html>a</html>")
        );
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let cache = ResponseCache::in_memory(None).unwrap();
        cache.put("https://example.com/a", "old").unwrap();
        cache.put("https://example.com/a", "new").unwrap();
        assert_eq!(cache.get("https://example.com/a").unwrap().as_deref(), Some("new"));
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_zero_expiry_always_misses() {
        let cache = ResponseCache::in_memory(Some(Duration::ZERO)).unwrap();
        cache.put("https://example.com/a", "body").unwrap();
        assert!(cache.get("https://example.com/a").unwrap().is_none());
    }

    #[test]
    fn test_huge_expiry_keeps_entries() {
        let cache = ResponseCache::in_memory(Some(Duration::from_secs(u64::MAX))).unwrap();
        cache.put("https://example.com/a", "body").unwrap();
        assert_eq!(cache.get("https://example.com/a").unwrap().as_deref(), Some("body"));
    }

    #[test]
    fn test_clear() {
        let cache = ResponseCache::in_memory(None).unwrap();
        cache.put("https://example.com/a", "a").unwrap();
        cache.put("https://example.com/b", "b").unwrap();
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache/http_cache.sqlite");
        {
            let cache = ResponseCache::open(&path, None).unwrap();
            cache.put("https://example.com/a", "a").unwrap();
        }
        let reopened = ResponseCache::open(&path, None).unwrap();
        assert_eq!(reopened.get("https://example.com/a").unwrap().as_deref(), Some("a"));
    }
}
