// src/services/blog.rs

//! Blog service.
//!
//! Listings only ever show published posts (publish date not in the
//! future). A post fetched by slug is returned regardless of its date so
//! previews keep working.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::listing::{Page, PostFilters, PostQuery, compose_posts, sort_posts};
use crate::models::{BlogPost, Config};
use crate::services::{fetch_or_log, transform_items};
use crate::source::{ContentSource, EntryQuery, content_types};

/// Default number of related and featured posts.
pub const DEFAULT_POST_LIMIT: usize = 3;

/// Service for reading blog posts.
#[derive(Clone)]
pub struct BlogService {
    source: Arc<dyn ContentSource>,
    config: Arc<Config>,
}

impl BlogService {
    pub fn new(source: Arc<dyn ContentSource>, config: Arc<Config>) -> Self {
        Self { source, config }
    }

    async fn fetch(&self, query: EntryQuery) -> Vec<BlogPost> {
        let query = query.include(self.config.cms.include_depth);
        match fetch_or_log(self.source.as_ref(), &query).await {
            Some(collection) => transform_items(&collection, BlogPost::from_entry),
            None => Vec::new(),
        }
    }

    /// Every post, newest first, including unpublished ones.
    async fn all(&self) -> Vec<BlogPost> {
        let query = EntryQuery::new(content_types::BLOG_POST)
            .order("-fields.publishDate")
            .limit(self.config.cms.fetch_limit);
        let mut posts = self.fetch(query).await;
        sort_posts(&mut posts);
        posts
    }

    /// Published posts matching the query, newest first.
    pub async fn posts(&self, query: &PostQuery) -> Page<BlogPost> {
        self.posts_at(query, Utc::now()).await
    }

    /// [`Self::posts`] against an explicit clock.
    pub async fn posts_at(&self, query: &PostQuery, now: DateTime<Utc>) -> Page<BlogPost> {
        compose_posts(self.all().await, query, now)
    }

    pub async fn by_slug(&self, slug: &str) -> Option<BlogPost> {
        let query = EntryQuery::new(content_types::BLOG_POST)
            .field("slug", slug)
            .limit(1);
        self.fetch(query).await.into_iter().next()
    }

    /// The most recent published posts.
    pub async fn featured(&self, limit: Option<usize>) -> Vec<BlogPost> {
        self.featured_at(limit, Utc::now()).await
    }

    pub async fn featured_at(&self, limit: Option<usize>, now: DateTime<Utc>) -> Vec<BlogPost> {
        let limit = limit.unwrap_or(DEFAULT_POST_LIMIT);
        let mut posts = PostFilters::default().apply(self.all().await, now);
        posts.truncate(limit);
        posts
    }

    /// Published posts related to `post`.
    ///
    /// Posts sharing a category come first; if there are fewer than
    /// `limit`, posts sharing a tag fill the rest. Both groups are newest
    /// first and never include `post` itself.
    pub async fn related(&self, post: &BlogPost, limit: Option<usize>) -> Vec<BlogPost> {
        self.related_at(post, limit, Utc::now()).await
    }

    pub async fn related_at(
        &self,
        post: &BlogPost,
        limit: Option<usize>,
        now: DateTime<Utc>,
    ) -> Vec<BlogPost> {
        let limit = limit.unwrap_or(DEFAULT_POST_LIMIT);
        let candidates: Vec<BlogPost> = PostFilters::default()
            .apply(self.all().await, now)
            .into_iter()
            .filter(|p| p.id != post.id)
            .collect();

        let category_ids: HashSet<&str> = post.categories.iter().map(|c| c.id.as_str()).collect();
        let tag_ids: HashSet<&str> = post.tags.iter().map(|t| t.id.as_str()).collect();

        let (by_category, rest): (Vec<BlogPost>, Vec<BlogPost>) =
            candidates.into_iter().partition(|p| {
                // No categories on the post means any post qualifies.
                category_ids.is_empty()
                    || p.categories.iter().any(|c| category_ids.contains(c.id.as_str()))
            });

        let mut related = by_category;
        if related.len() < limit && !tag_ids.is_empty() {
            related.extend(
                rest.into_iter()
                    .filter(|p| p.tags.iter().any(|t| tag_ids.contains(t.id.as_str()))),
            );
        }
        related.truncate(limit);
        related
    }
}
