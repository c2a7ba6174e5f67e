#![allow(async_fn_in_trait)]

use atelier_domain::pagination::PageRequest;

use crate::domain::types::{NewPage, Page, PageChanges, PageSortBy};
use crate::error::PagesServiceError;

/// Repository for content pages.
pub trait PageRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, PagesServiceError>;

    /// Public lookup: published pages only.
    async fn find_published_by_slug(&self, slug: &str)
    -> Result<Option<Page>, PagesServiceError>;

    /// List pages. `published_only` toggles the public view.
    async fn list(
        &self,
        published_only: bool,
        sort_by: PageSortBy,
        page: PageRequest,
    ) -> Result<Vec<Page>, PagesServiceError>;

    /// Whether a slug is taken, optionally ignoring one page id (so a page
    /// can keep its own slug on update).
    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PagesServiceError>;

    /// Insert a page; returns the store-assigned id. A unique-index
    /// violation on slug maps to `DuplicateSlug`.
    async fn create(&self, page: &NewPage) -> Result<i64, PagesServiceError>;

    /// Apply a partial update. `updated_at` is bumped.
    async fn update(&self, id: i64, changes: &PageChanges) -> Result<(), PagesServiceError>;

    /// Delete a page. Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, PagesServiceError>;
}
