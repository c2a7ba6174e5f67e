use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use atelier_core::identity::IdentityHeaders;
use atelier_domain::pagination::PageRequest;

use crate::domain::types::{Page, PageChanges, PageSortBy};
use crate::error::PagesServiceError;
use crate::state::AppState;
use crate::usecase::page::{
    CreatePageInput, CreatePageUseCase, DeletePageUseCase, GetPublishedPageUseCase,
    ListPagesUseCase, UpdatePageUseCase,
};

#[derive(Serialize)]
pub struct PageResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_description: String,
    pub is_published: bool,
    pub author_id: i64,
    #[serde(serialize_with = "atelier_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "atelier_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            id: page.id,
            title: page.title,
            slug: page.slug,
            content: page.content,
            meta_description: page.meta_description,
            is_published: page.is_published,
            author_id: page.author_id,
            created_at: page.created_at,
            updated_at: page.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PageListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub sort_by: Option<String>,
}

impl PageListQuery {
    fn sort(&self) -> PageSortBy {
        self.sort_by
            .as_deref()
            .map(PageSortBy::from_kebab_case)
            .unwrap_or(Some(PageSortBy::default()))
            .unwrap_or_default()
    }

    fn page_request(&self) -> PageRequest {
        PageRequest {
            per_page: self.per_page.unwrap_or(25),
            page: self.page.unwrap_or(1),
        }
    }
}

// ── GET /pages ───────────────────────────────────────────────────────────────

pub async fn list_published_pages(
    State(state): State<AppState>,
    Query(query): Query<PageListQuery>,
) -> Result<Json<Vec<PageResponse>>, PagesServiceError> {
    let usecase = ListPagesUseCase {
        repo: state.page_repo(),
    };
    let pages = usecase
        .execute(true, query.sort(), query.page_request())
        .await?;
    Ok(Json(pages.into_iter().map(Into::into).collect()))
}

// ── GET /pages/all ───────────────────────────────────────────────────────────

pub async fn list_all_pages(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<PageListQuery>,
) -> Result<Json<Vec<PageResponse>>, PagesServiceError> {
    if !identity.is_admin() {
        return Err(PagesServiceError::Forbidden);
    }
    let usecase = ListPagesUseCase {
        repo: state.page_repo(),
    };
    let pages = usecase
        .execute(false, query.sort(), query.page_request())
        .await?;
    Ok(Json(pages.into_iter().map(Into::into).collect()))
}

// ── GET /pages/{slug} ────────────────────────────────────────────────────────

pub async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PageResponse>, PagesServiceError> {
    let usecase = GetPublishedPageUseCase {
        repo: state.page_repo(),
    };
    let page = usecase.execute(&slug).await?;
    Ok(Json(page.into()))
}

// ── POST /pages ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePageRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Serialize)]
pub struct CreatePageResponse {
    pub id: i64,
}

pub async fn create_page(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePageRequest>,
) -> Result<(StatusCode, Json<CreatePageResponse>), PagesServiceError> {
    if !identity.is_admin() {
        return Err(PagesServiceError::Forbidden);
    }
    let usecase = CreatePageUseCase {
        repo: state.page_repo(),
    };
    let id = usecase
        .execute(CreatePageInput {
            title: body.title,
            content: body.content,
            meta_description: body.meta_description,
            is_published: body.is_published,
            author_id: identity.account_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(CreatePageResponse { id })))
}

// ── PATCH /pages/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
}

pub async fn update_page(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdatePageRequest>,
) -> Result<StatusCode, PagesServiceError> {
    if !identity.is_admin() {
        return Err(PagesServiceError::Forbidden);
    }
    let usecase = UpdatePageUseCase {
        repo: state.page_repo(),
    };
    usecase
        .execute(
            id,
            PageChanges {
                title: body.title,
                slug: body.slug,
                content: body.content,
                meta_description: body.meta_description,
                is_published: body.is_published,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /pages/{id} ───────────────────────────────────────────────────────

pub async fn delete_page(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, PagesServiceError> {
    if !identity.is_admin() {
        return Err(PagesServiceError::Forbidden);
    }
    let usecase = DeletePageUseCase {
        repo: state.page_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
