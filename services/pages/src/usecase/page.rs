use atelier_domain::pagination::PageRequest;

use crate::domain::repository::PageRepository;
use crate::domain::slug::{candidates, slugify};
use crate::domain::types::{NewPage, Page, PageChanges, PageSortBy};
use crate::error::PagesServiceError;

/// Find the first free slug for `title` by linear probing: `base`,
/// `base-1`, `base-2`, … — the legacy tie-break, kept for URL stability.
async fn unique_slug<R: PageRepository>(
    repo: &R,
    title: &str,
    exclude_id: Option<i64>,
) -> Result<String, PagesServiceError> {
    let base = slugify(title);
    if base.is_empty() {
        return Err(PagesServiceError::MissingData);
    }
    for candidate in candidates(&base) {
        if !repo.slug_exists(&candidate, exclude_id).await? {
            return Ok(candidate);
        }
    }
    unreachable!("slug probe is unbounded")
}

// ── CreatePage ───────────────────────────────────────────────────────────────

pub struct CreatePageInput {
    pub title: String,
    pub content: String,
    pub meta_description: String,
    pub is_published: bool,
    pub author_id: i64,
}

pub struct CreatePageUseCase<R: PageRepository> {
    pub repo: R,
}

impl<R: PageRepository> CreatePageUseCase<R> {
    pub async fn execute(&self, input: CreatePageInput) -> Result<i64, PagesServiceError> {
        let title = input.title.trim().to_owned();
        if title.is_empty() {
            return Err(PagesServiceError::MissingData);
        }
        let slug = unique_slug(&self.repo, &title, None).await?;
        self.repo
            .create(&NewPage {
                title,
                slug,
                content: input.content,
                meta_description: input.meta_description,
                is_published: input.is_published,
                author_id: input.author_id,
            })
            .await
    }
}

// ── GetPublishedPage ─────────────────────────────────────────────────────────

pub struct GetPublishedPageUseCase<R: PageRepository> {
    pub repo: R,
}

impl<R: PageRepository> GetPublishedPageUseCase<R> {
    pub async fn execute(&self, slug: &str) -> Result<Page, PagesServiceError> {
        self.repo
            .find_published_by_slug(slug)
            .await?
            .ok_or(PagesServiceError::PageNotFound)
    }
}

// ── ListPages ────────────────────────────────────────────────────────────────

pub struct ListPagesUseCase<R: PageRepository> {
    pub repo: R,
}

impl<R: PageRepository> ListPagesUseCase<R> {
    pub async fn execute(
        &self,
        published_only: bool,
        sort_by: PageSortBy,
        page: PageRequest,
    ) -> Result<Vec<Page>, PagesServiceError> {
        self.repo
            .list(published_only, sort_by, page.clamped())
            .await
    }
}

// ── UpdatePage ───────────────────────────────────────────────────────────────

pub struct UpdatePageUseCase<R: PageRepository> {
    pub repo: R,
}

impl<R: PageRepository> UpdatePageUseCase<R> {
    pub async fn execute(
        &self,
        page_id: i64,
        mut changes: PageChanges,
    ) -> Result<(), PagesServiceError> {
        if changes.is_empty() {
            return Err(PagesServiceError::MissingData);
        }
        if let Some(ref title) = changes.title {
            if title.trim().is_empty() {
                return Err(PagesServiceError::MissingData);
            }
        }
        if self.repo.find_by_id(page_id).await?.is_none() {
            return Err(PagesServiceError::PageNotFound);
        }
        if let Some(ref raw_slug) = changes.slug {
            let slug = slugify(raw_slug);
            if slug.is_empty() {
                return Err(PagesServiceError::MissingData);
            }
            if self.repo.slug_exists(&slug, Some(page_id)).await? {
                return Err(PagesServiceError::DuplicateSlug);
            }
            changes.slug = Some(slug);
        }
        self.repo.update(page_id, &changes).await
    }
}

// ── DeletePage ───────────────────────────────────────────────────────────────

pub struct DeletePageUseCase<R: PageRepository> {
    pub repo: R,
}

impl<R: PageRepository> DeletePageUseCase<R> {
    pub async fn execute(&self, page_id: i64) -> Result<(), PagesServiceError> {
        if self.repo.delete(page_id).await? {
            Ok(())
        } else {
            Err(PagesServiceError::PageNotFound)
        }
    }
}
