//! SQLite-backed storage for catalog entries

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use super::{NewEntry, PortalEntry, Section};

/// Create the catalog table if it does not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS portal_entries (
            id TEXT PRIMARY KEY,
            section TEXT NOT NULL,
            title VARCHAR(180) NOT NULL,
            description TEXT NOT NULL,
            link TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to initialize catalog schema")?;

    Ok(())
}

/// Insert one entry inside the caller's transaction, returning the new id.
/// Visibility of the row is up to the caller's commit.
pub async fn insert_entry(tx: &mut Transaction<'_, Sqlite>, entry: &NewEntry) -> Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO portal_entries
            (id, section, title, description, link, sort_order, active, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(entry.section.code())
    .bind(&entry.title)
    .bind(&entry.description)
    .bind(&entry.link)
    .bind(entry.order)
    .bind(entry.active)
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await
    .context("Failed to insert catalog entry")?;

    Ok(id)
}

/// Check whether an entry with this section/title pair already exists.
/// The import pipeline never calls this itself; callers that want to enforce
/// de-duplication do it at this boundary.
pub async fn entry_exists(pool: &SqlitePool, section: Section, title: &str) -> Result<bool> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM portal_entries WHERE section = ? AND title = ?",
    )
    .bind(section.code())
    .bind(title)
    .fetch_one(pool)
    .await
    .context("Failed to check for existing catalog entry")?;

    Ok(count > 0)
}

/// Total number of catalog entries
pub async fn count_entries(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portal_entries")
        .fetch_one(pool)
        .await
        .context("Failed to count catalog entries")?;

    Ok(count)
}

type EntryRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    i64,
    bool,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// List catalog entries, optionally restricted to one section, in the
/// portal's display order (section, position, title)
pub async fn list_entries(pool: &SqlitePool, section: Option<Section>) -> Result<Vec<PortalEntry>> {
    let rows: Vec<EntryRow> = match section {
        Some(section) => {
            sqlx::query_as(
                "SELECT id, section, title, description, link, sort_order, active,
                        created_at, updated_at
                 FROM portal_entries
                 WHERE section = ?
                 ORDER BY section, sort_order, title",
            )
            .bind(section.code())
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT id, section, title, description, link, sort_order, active,
                        created_at, updated_at
                 FROM portal_entries
                 ORDER BY section, sort_order, title",
            )
            .fetch_all(pool)
            .await
        }
    }
    .context("Failed to list catalog entries")?;

    rows.into_iter()
        .map(|(id, code, title, description, link, order, active, created_at, updated_at)| {
            let section = Section::from_code(&code)
                .ok_or_else(|| anyhow!("Unknown section code in catalog: {}", code))?;
            Ok(PortalEntry {
                id,
                section,
                title,
                description,
                link,
                order,
                active,
                created_at,
                updated_at,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    fn entry(section: Section, title: &str, order: i64) -> NewEntry {
        NewEntry {
            section,
            title: title.to_string(),
            description: format!("{} description", title),
            link: None,
            order,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_and_exists() {
        let pool = memory_pool().await;

        let mut tx = pool.begin().await.unwrap();
        insert_entry(&mut tx, &entry(Section::Financeiros, "Relatorio 2025", 0))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert!(entry_exists(&pool, Section::Financeiros, "Relatorio 2025")
            .await
            .unwrap());
        assert!(!entry_exists(&pool, Section::Politicas, "Relatorio 2025")
            .await
            .unwrap());
        assert_eq!(count_entries(&pool).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_uncommitted_transaction_rolls_back() {
        let pool = memory_pool().await;

        let mut tx = pool.begin().await.unwrap();
        insert_entry(&mut tx, &entry(Section::Prestacao, "Contas 2024", 0))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(count_entries(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_orders_by_section_position_title() {
        let pool = memory_pool().await;

        let mut tx = pool.begin().await.unwrap();
        insert_entry(&mut tx, &entry(Section::Prestacao, "B", 1)).await.unwrap();
        insert_entry(&mut tx, &entry(Section::Contratacoes, "Edital", 5)).await.unwrap();
        insert_entry(&mut tx, &entry(Section::Prestacao, "A", 1)).await.unwrap();
        insert_entry(&mut tx, &entry(Section::Prestacao, "C", 0)).await.unwrap();
        tx.commit().await.unwrap();

        let all = list_entries(&pool, None).await.unwrap();
        let titles: Vec<&str> = all.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Edital", "C", "A", "B"]);

        let prestacao = list_entries(&pool, Some(Section::Prestacao)).await.unwrap();
        assert_eq!(prestacao.len(), 3);
        assert!(prestacao.iter().all(|e| e.section == Section::Prestacao));
    }
}
