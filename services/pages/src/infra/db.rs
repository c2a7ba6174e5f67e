use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use atelier_domain::pagination::{PageRequest, Sort};
use atelier_pages_schema::pages;

use crate::domain::repository::PageRepository;
use crate::domain::types::{NewPage, Page, PageChanges, PageSortBy};
use crate::error::PagesServiceError;

fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

#[derive(Clone)]
pub struct DbPageRepository {
    pub db: DatabaseConnection,
}

impl PageRepository for DbPageRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Page>, PagesServiceError> {
        let model = pages::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find page by id")?;
        Ok(model.map(page_from_model))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Page>, PagesServiceError> {
        let model = pages::Entity::find()
            .filter(pages::Column::Slug.eq(slug))
            .filter(pages::Column::IsPublished.eq(true))
            .one(&self.db)
            .await
            .context("find published page by slug")?;
        Ok(model.map(page_from_model))
    }

    async fn list(
        &self,
        published_only: bool,
        sort_by: PageSortBy,
        page: PageRequest,
    ) -> Result<Vec<Page>, PagesServiceError> {
        let mut query = pages::Entity::find();
        if published_only {
            query = query.filter(pages::Column::IsPublished.eq(true));
        }
        let (column, direction) = match sort_by {
            PageSortBy::CreatedAt(sort) => (pages::Column::CreatedAt, sort),
            PageSortBy::Title(sort) => (pages::Column::Title, sort),
        };
        let order = match direction {
            Sort::Desc => sea_orm::Order::Desc,
            Sort::Asc => sea_orm::Order::Asc,
        };
        let models = query
            .order_by(column, order)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list pages")?;
        Ok(models.into_iter().map(page_from_model).collect())
    }

    async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, PagesServiceError> {
        let mut query = pages::Entity::find().filter(pages::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(pages::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await.context("count pages by slug")?;
        Ok(count > 0)
    }

    async fn create(&self, page: &NewPage) -> Result<i64, PagesServiceError> {
        let now = Utc::now();
        let result = pages::ActiveModel {
            id: NotSet,
            title: Set(page.title.clone()),
            slug: Set(page.slug.clone()),
            content: Set(page.content.clone()),
            meta_description: Set(page.meta_description.clone()),
            is_published: Set(page.is_published),
            author_id: Set(page.author_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(model) => Ok(model.id),
            Err(ref e) if is_unique_violation(e) => Err(PagesServiceError::DuplicateSlug),
            Err(e) => Err(anyhow::Error::new(e).context("create page").into()),
        }
    }

    async fn update(&self, id: i64, changes: &PageChanges) -> Result<(), PagesServiceError> {
        let mut am = pages::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref title) = changes.title {
            am.title = Set(title.clone());
        }
        if let Some(ref slug) = changes.slug {
            am.slug = Set(slug.clone());
        }
        if let Some(ref content) = changes.content {
            am.content = Set(content.clone());
        }
        if let Some(ref meta_description) = changes.meta_description {
            am.meta_description = Set(meta_description.clone());
        }
        if let Some(is_published) = changes.is_published {
            am.is_published = Set(is_published);
        }
        am.updated_at = Set(Utc::now());
        match am.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(ref e) if is_unique_violation(e) => Err(PagesServiceError::DuplicateSlug),
            Err(e) => Err(anyhow::Error::new(e).context("update page").into()),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, PagesServiceError> {
        let result = pages::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete page")?;
        Ok(result.rows_affected > 0)
    }
}

fn page_from_model(model: pages::Model) -> Page {
    Page {
        id: model.id,
        title: model.title,
        slug: model.slug,
        content: model.content,
        meta_description: model.meta_description,
        is_published: model.is_published,
        author_id: model.author_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
