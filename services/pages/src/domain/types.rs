use chrono::{DateTime, Utc};

use atelier_domain::pagination::Sort;

/// Content page record as stored.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_description: String,
    pub is_published: bool,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a not-yet-persisted page. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub meta_description: String,
    pub is_published: bool,
    pub author_id: i64,
}

/// Partial update applied by the backoffice.
#[derive(Debug, Clone, Default)]
pub struct PageChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub meta_description: Option<String>,
    pub is_published: Option<bool>,
}

/// Sort options for page listings.
#[derive(Debug, Clone, Copy)]
pub enum PageSortBy {
    CreatedAt(Sort),
    Title(Sort),
}

impl Default for PageSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl PageSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "title-desc" => Some(Self::Title(Sort::Desc)),
            "title-asc" => Some(Self::Title(Sort::Asc)),
            _ => None,
        }
    }
}

impl PageChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.content.is_none()
            && self.meta_description.is_none()
            && self.is_published.is_none()
    }
}
