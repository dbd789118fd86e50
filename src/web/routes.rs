//! Request handlers.
//!
//! Every handler filters its own view of the shared [`Archive`]; nothing
//! here mutates it.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::WebError;
use crate::archive::Archive;
use crate::core::filter::PostFilter;
use crate::core::output::{DEFAULT_EXPORT_FILE, to_csv};
use crate::core::page::paginate;
use crate::post::Post;

/// Posts per page of `GET /posts`.
pub const POSTS_PER_PAGE: usize = 50;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Query parameters shared by `/posts` and `/export`.
///
/// Everything arrives as text so malformed values produce our own JSON
/// error instead of a query rejection. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub keyword: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
}

impl FilterQuery {
    fn to_filter(&self) -> Result<PostFilter, WebError> {
        let mut filter = PostFilter::new();
        if let Some(keyword) = non_empty(self.keyword.as_deref()) {
            filter = filter.with_keyword(keyword);
        }
        if let Some(date) = non_empty(self.start_date.as_deref()) {
            filter = filter.with_start_date(date)?;
        }
        if let Some(date) = non_empty(self.end_date.as_deref()) {
            filter = filter.with_end_date(date)?;
        }
        Ok(filter)
    }

    fn page(&self) -> Result<usize, WebError> {
        let Some(raw) = non_empty(self.page.as_deref()) else {
            return Ok(1);
        };
        match raw.trim().parse::<usize>() {
            Ok(page) if page >= 1 => Ok(page),
            _ => Err(WebError::BadRequest(format!(
                "Invalid page '{raw}'. Expected a positive integer"
            ))),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// One post in the `/posts` response.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub timestamp: String,
    pub content: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            timestamp: post.timestamp().to_iso_string(),
            content: post.content().to_string(),
        }
    }
}

/// `/posts` response body.
#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostView>,
    pub total: usize,
    pub page: usize,
}

/// `/health` response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub posts: usize,
    pub processed_files: usize,
    pub total_files: usize,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /posts
pub async fn posts(
    State(archive): State<Arc<Archive>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<PostsResponse>, WebError> {
    let filter = query.to_filter()?;
    let page = query.page()?;

    let matched = archive.filter(&filter);
    debug!(matched = matched.len(), page, "serving posts");

    let page = paginate(matched, page, POSTS_PER_PAGE).map(PostView::from);
    Ok(Json(PostsResponse {
        total: page.total,
        page: page.page,
        posts: page.items,
    }))
}

/// GET /export
pub async fn export(
    State(archive): State<Arc<Archive>>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, WebError> {
    let filter = query.to_filter()?;
    let matched = archive.filter(&filter);
    debug!(rows = matched.len(), "exporting CSV");

    let body = to_csv(matched)?;
    let disposition = format!("attachment; filename=\"{DEFAULT_EXPORT_FILE}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// GET /health
pub async fn health(State(archive): State<Arc<Archive>>) -> Json<HealthResponse> {
    let stats = archive.stats();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        posts: archive.len(),
        processed_files: stats.processed_files,
        total_files: stats.total_files,
    })
}
