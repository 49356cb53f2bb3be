use std::sync::Arc;

use crate::cache::{self, CachePort};
use crate::db::database::QueryPort;
use crate::error::StoreError;
use crate::models::{StatusCount, User, UserPage};

const USER_BY_ID_TTL: u64 = 300;
const USERS_COUNT_TTL: u64 = 120;
const USERS_BY_STATUS_TTL: u64 = 120;

const USERS_COUNT_KEY: &str = "users_count";
const USERS_BY_STATUS_KEY: &str = "users_by_status";

fn user_key(id: &str) -> String {
    format!("user:{id}")
}

/// Read accessor for users.
pub struct UserReader {
    db: Arc<dyn QueryPort>,
    cache: Arc<dyn CachePort>,
}

impl UserReader {
    pub fn new(db: Arc<dyn QueryPort>, cache: Arc<dyn CachePort>) -> Self {
        Self { db, cache }
    }

    /// Point lookup by id, cache-aside at a 5 minute TTL. A zero-row result
    /// is returned but never cached, so a user created right after a miss is
    /// visible on the next read.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        let key = user_key(id);

        if let Some(user) = cache::read_json::<User>(self.cache.as_ref(), &key).await {
            return Ok(Some(user));
        }

        let user = self.db.user_by_id(id).await?;
        if let Some(user) = &user {
            cache::write_json(self.cache.as_ref(), &key, user, USER_BY_ID_TTL).await;
        }

        Ok(user)
    }

    /// Uncached: the email key space is unbounded.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.db.user_by_email(email).await
    }

    /// Uncached listing ordered by creation time, newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        self.db.users_page(limit, offset).await
    }

    /// Total user count, cached for 2 minutes. Zero is a valid count and is
    /// cached like any other.
    pub async fn count(&self) -> Result<i64, StoreError> {
        if let Some(count) = cache::read_json::<i64>(self.cache.as_ref(), USERS_COUNT_KEY).await {
            return Ok(count);
        }

        let count = self.db.users_count().await?;
        cache::write_json(self.cache.as_ref(), USERS_COUNT_KEY, &count, USERS_COUNT_TTL).await;

        Ok(count)
    }

    /// Per-status user counts, cached for 2 minutes.
    pub async fn count_by_status(&self) -> Result<Vec<StatusCount>, StoreError> {
        if let Some(counts) =
            cache::read_json::<Vec<StatusCount>>(self.cache.as_ref(), USERS_BY_STATUS_KEY).await
        {
            return Ok(counts);
        }

        let counts = self.db.users_count_by_status().await?;
        if !counts.is_empty() {
            cache::write_json(
                self.cache.as_ref(),
                USERS_BY_STATUS_KEY,
                &counts,
                USERS_BY_STATUS_TTL,
            )
            .await;
        }

        Ok(counts)
    }

    /// One page of the listing plus the pagination envelope. A page past the
    /// end yields a short or empty sequence; `pages` is always
    /// `ceil(total / limit)`.
    pub async fn page(&self, page: u32, limit: u32) -> Result<UserPage, StoreError> {
        let page = page.max(1);
        let limit = limit.max(1);
        let offset = i64::from(page - 1) * i64::from(limit);

        let users = self.list(i64::from(limit), offset).await?;
        let total = self.count().await?;
        let pages = (total + i64::from(limit) - 1) / i64::from(limit);

        Ok(UserPage {
            users,
            page,
            limit,
            total,
            pages,
        })
    }
}
