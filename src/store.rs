//! The record store: a single SQLite table keyed by `slug`.
//!
//! Owns the schema and the uniqueness invariant. Writes go through
//! [`store_batch`], which wraps the whole batch in one transaction and
//! applies the insert-ignore-by-slug policy: a record whose slug already
//! exists is silently skipped, never merged or updated. Any other insert
//! failure rolls the entire batch back.

use sqlx::sqlite::SqliteConnection;
use sqlx::{Row, SqlitePool};

use crate::error::Error;
use crate::models::{join_tags, split_tags, OrgRecord, OrgSummary};

/// Net result of one [`store_batch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOutcome {
    pub inserted: u64,
    pub skipped: u64,
}

/// Idempotently ensure the schema exists. Safe to call on every process
/// start; never destroys existing data.
pub async fn initialize(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE CHECK (length(slug) > 0),
            description TEXT NOT NULL DEFAULT '',
            batch TEXT NOT NULL DEFAULT '',
            logo TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(Error::persistence("create table"))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_organizations_name ON organizations(name)")
        .execute(pool)
        .await
        .map_err(Error::persistence("create index"))?;

    Ok(())
}

/// Transactional bulk insert.
///
/// All rows go into a single transaction: a duplicate slug is skipped and
/// counted, while any other failure (I/O, constraint) aborts and rolls back
/// the whole batch. Returns only after the transaction commits.
pub async fn store_batch(pool: &SqlitePool, records: &[OrgRecord]) -> Result<StoreOutcome, Error> {
    let mut tx = pool
        .begin()
        .await
        .map_err(Error::persistence("begin transaction"))?;

    let mut outcome = StoreOutcome {
        inserted: 0,
        skipped: 0,
    };

    for record in records {
        if insert_ignore_by_slug(&mut tx, record).await? {
            outcome.inserted += 1;
        } else {
            outcome.skipped += 1;
        }
    }

    tx.commit()
        .await
        .map_err(Error::persistence("commit transaction"))?;

    Ok(outcome)
}

/// The named duplicate policy: `INSERT … ON CONFLICT(slug) DO NOTHING`.
///
/// Returns `true` when a row was written, `false` when an existing slug
/// caused the insert to be ignored.
async fn insert_ignore_by_slug(
    tx: &mut SqliteConnection,
    record: &OrgRecord,
) -> Result<bool, Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO organizations (name, slug, description, batch, logo, website, tags, location)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(slug) DO NOTHING
        "#,
    )
    .bind(&record.name)
    .bind(&record.slug)
    .bind(&record.description)
    .bind(&record.batch)
    .bind(&record.logo_url)
    .bind(&record.website_url)
    .bind(join_tags(&record.tags))
    .bind(&record.location)
    .execute(tx)
    .await
    .map_err(Error::persistence("insert record"))?;

    Ok(result.rows_affected() > 0)
}

/// Display-relevant fields of every stored record, ordered by `name`
/// ascending (byte order), ties broken by insertion order.
pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<OrgSummary>, Error> {
    let rows = sqlx::query(
        "SELECT name, website, location FROM organizations ORDER BY name ASC, id ASC",
    )
    .fetch_all(pool)
    .await
    .map_err(Error::persistence("list summaries"))?;

    Ok(rows
        .iter()
        .map(|row| OrgSummary {
            name: row.get("name"),
            website_url: row.get("website"),
            location: row.get("location"),
        })
        .collect())
}

/// Every field of every stored record, tags decoded, same order as
/// [`list_summaries`].
pub async fn list_records(pool: &SqlitePool) -> Result<Vec<OrgRecord>, Error> {
    let rows = sqlx::query(
        r#"
        SELECT name, slug, description, batch, logo, website, tags, location
        FROM organizations ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(Error::persistence("list records"))?;

    Ok(rows
        .iter()
        .map(|row| {
            let raw_tags: String = row.get("tags");
            OrgRecord {
                name: row.get("name"),
                slug: row.get("slug"),
                description: row.get("description"),
                batch: row.get("batch"),
                logo_url: row.get("logo"),
                website_url: row.get("website"),
                tags: split_tags(&raw_tags),
                location: row.get("location"),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn test_pool() -> (TempDir, SqlitePool) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.sqlite");
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        initialize(&pool).await.unwrap();
        (tmp, pool)
    }

    fn record(name: &str, slug: &str) -> OrgRecord {
        OrgRecord {
            name: name.to_string(),
            slug: slug.to_string(),
            description: format!("{} does things", name),
            batch: "Summer 2023".to_string(),
            logo_url: String::new(),
            website_url: format!("https://{}.example", slug),
            tags: vec!["b2b".to_string(), "devtools".to_string()],
            location: "Minneapolis, MN".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initialize_idempotent() {
        let (_tmp, pool) = test_pool().await;
        initialize(&pool).await.unwrap();
        initialize(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_initialize_preserves_data() {
        let (_tmp, pool) = test_pool().await;
        store_batch(&pool, &[record("Acme", "acme")]).await.unwrap();
        initialize(&pool).await.unwrap();
        assert_eq!(list_records(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_and_read_back() {
        let (_tmp, pool) = test_pool().await;
        let original = record("Acme", "acme");
        let outcome = store_batch(&pool, &[original.clone()]).await.unwrap();
        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.skipped, 0);

        let stored = list_records(&pool).await.unwrap();
        assert_eq!(stored, vec![original]);
    }

    #[tokio::test]
    async fn test_reingestion_is_idempotent() {
        let (_tmp, pool) = test_pool().await;
        let batch = vec![record("Acme", "acme"), record("Binder", "binder")];

        let first = store_batch(&pool, &batch).await.unwrap();
        assert_eq!(first.inserted, 2);

        let second = store_batch(&pool, &batch).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 2);

        let slugs: Vec<String> = list_records(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["acme".to_string(), "binder".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_slug_keeps_first_seen() {
        let (_tmp, pool) = test_pool().await;
        let first = record("Original Name", "acme");
        let mut conflicting = record("Different Name", "acme");
        conflicting.description = "entirely different".to_string();

        let outcome = store_batch(&pool, &[first.clone(), conflicting])
            .await
            .unwrap();
        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.skipped, 1);

        let stored = list_records(&pool).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Original Name");
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back_entirely() {
        let (_tmp, pool) = test_pool().await;
        // Empty slug violates the CHECK constraint partway through.
        let batch = vec![record("Acme", "acme"), record("Broken", "")];

        let err = store_batch(&pool, &batch).await.unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));

        // Not even the prefix before the failure was committed.
        assert!(list_records(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let (_tmp, pool) = test_pool().await;
        let outcome = store_batch(&pool, &[]).await.unwrap();
        assert_eq!(outcome.inserted, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(list_records(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_order_is_byte_order_by_name() {
        let (_tmp, pool) = test_pool().await;
        let batch = vec![
            record("Beta", "beta"),
            record("alpha", "alpha"),
            record("Gamma", "gamma"),
        ];
        store_batch(&pool, &batch).await.unwrap();

        // Uppercase sorts before lowercase in byte order.
        let expected = vec!["Beta", "Gamma", "alpha"];
        for _ in 0..3 {
            let names: Vec<String> = list_summaries(&pool)
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.name)
                .collect();
            assert_eq!(names, expected);
        }
    }

    #[tokio::test]
    async fn test_tags_survive_storage() {
        let (_tmp, pool) = test_pool().await;
        let mut original = record("Acme", "acme");
        original.tags = vec!["fintech".to_string(), "machine learning".to_string()];
        store_batch(&pool, &[original.clone()]).await.unwrap();

        let stored = list_records(&pool).await.unwrap();
        assert_eq!(stored[0].tags, original.tags);
    }

    #[tokio::test]
    async fn test_empty_tag_list_reads_back_empty() {
        let (_tmp, pool) = test_pool().await;
        let mut original = record("Acme", "acme");
        original.tags = Vec::new();
        store_batch(&pool, &[original]).await.unwrap();

        let stored = list_records(&pool).await.unwrap();
        assert!(stored[0].tags.is_empty());
    }
}
