//! Repositories for useful links and their tags.
//!
//! Tags are referenced by normalized name and created on first use.

use std::collections::HashMap;

use sqlx::{Sqlite, SqlitePool, Transaction};
use studio_core::types::DbId;

use crate::models::link::{
    CreateLink, LinkTagName, LinkWithTags, TagWithCount, UpdateLink, UsefulLink,
};
use crate::NOW;

const COLUMNS: &str = "l.id, l.title, l.url, l.description, l.is_active, l.created_by, \
                       l.created_at, l.updated_at";

/// Provides operations for useful links.
pub struct LinkRepo;

impl LinkRepo {
    /// Insert a link and attach `tags` (already normalized).
    pub async fn create(
        pool: &SqlitePool,
        created_by: DbId,
        input: &CreateLink,
        tags: &[String],
    ) -> Result<LinkWithTags, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO useful_links (title, url, description, created_by)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )
        .bind(input.title.trim())
        .bind(input.url.trim())
        .bind(&input.description)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        Self::set_tags(&mut tx, id, tags).await?;
        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<LinkWithTags>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM useful_links l WHERE l.id = ?1");
        let Some(link) = sqlx::query_as::<_, UsefulLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let mut tags = Self::tags_for_links(pool, &[id]).await?;
        Ok(Some(LinkWithTags {
            tags: tags.remove(&id).unwrap_or_default(),
            link,
        }))
    }

    /// List active links by title, optionally restricted to one tag.
    pub async fn list(
        pool: &SqlitePool,
        tag: Option<&str>,
    ) -> Result<Vec<LinkWithTags>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM useful_links l
             WHERE l.is_active = TRUE
               AND (?1 IS NULL OR EXISTS (
                    SELECT 1 FROM link_tags lt JOIN tags t ON t.id = lt.tag_id
                    WHERE lt.link_id = l.id AND t.name = ?1))
             ORDER BY l.title, l.id"
        );
        let links = sqlx::query_as::<_, UsefulLink>(&query)
            .bind(tag)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = links.iter().map(|l| l.id).collect();
        let mut tags = Self::tags_for_links(pool, &ids).await?;
        Ok(links
            .into_iter()
            .map(|link| LinkWithTags {
                tags: tags.remove(&link.id).unwrap_or_default(),
                link,
            })
            .collect())
    }

    /// Apply a partial update. When `tags` is `Some`, the tag set is replaced.
    ///
    /// Returns `None` if no link with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateLink,
        tags: Option<&[String]>,
    ) -> Result<Option<LinkWithTags>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE useful_links SET
                title = COALESCE(?2, title),
                url = COALESCE(?3, url),
                description = COALESCE(?4, description),
                is_active = COALESCE(?5, is_active),
                updated_at = {NOW}
             WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.url.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.is_active)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
        if let Some(tags) = tags {
            Self::set_tags(&mut tx, id, tags).await?;
        }
        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    pub async fn deactivate(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE useful_links SET is_active = FALSE, updated_at = {NOW}
             WHERE id = ?1 AND is_active = TRUE"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the link's tags with `names`, creating missing tags.
    async fn set_tags(
        tx: &mut Transaction<'_, Sqlite>,
        link_id: DbId,
        names: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM link_tags WHERE link_id = ?1")
            .bind(link_id)
            .execute(&mut **tx)
            .await?;

        for name in names {
            sqlx::query("INSERT INTO tags (name) VALUES (?1) ON CONFLICT (name) DO NOTHING")
                .bind(name)
                .execute(&mut **tx)
                .await?;
            sqlx::query(
                "INSERT INTO link_tags (link_id, tag_id)
                 SELECT ?1, id FROM tags WHERE name = ?2
                 ON CONFLICT DO NOTHING",
            )
            .bind(link_id)
            .bind(name)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Tag names for each of the given links, alphabetically.
    pub async fn tags_for_links(
        pool: &SqlitePool,
        link_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<String>>, sqlx::Error> {
        let mut grouped: HashMap<DbId, Vec<String>> = HashMap::new();
        if link_ids.is_empty() {
            return Ok(grouped);
        }
        let query = format!(
            "SELECT lt.link_id, t.name FROM link_tags lt JOIN tags t ON t.id = lt.tag_id
             WHERE lt.link_id IN ({})
             ORDER BY t.name",
            super::placeholders(1, link_ids.len())
        );
        let mut q = sqlx::query_as::<_, LinkTagName>(&query);
        for id in link_ids {
            q = q.bind(id);
        }
        for row in q.fetch_all(pool).await? {
            grouped.entry(row.link_id).or_default().push(row.name);
        }
        Ok(grouped)
    }
}

/// Read access to the tag vocabulary.
pub struct TagRepo;

impl TagRepo {
    /// All tags with the number of active links carrying them.
    pub async fn list_with_counts(pool: &SqlitePool) -> Result<Vec<TagWithCount>, sqlx::Error> {
        sqlx::query_as::<_, TagWithCount>(
            "SELECT t.id, t.name, COUNT(l.id) AS link_count
             FROM tags t
             LEFT JOIN link_tags lt ON lt.tag_id = t.id
             LEFT JOIN useful_links l ON l.id = lt.link_id AND l.is_active = TRUE
             GROUP BY t.id, t.name
             ORDER BY t.name",
        )
        .fetch_all(pool)
        .await
    }
}
