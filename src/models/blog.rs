//! Blog post data structure.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::models::{RichTextNode, Taxonomy};
use crate::source::{Entry, Link, Resolver};

/// A published article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,

    /// Rich-text body, kept as a tree
    pub content: RichTextNode,

    pub featured_image: String,
    pub categories: Vec<Taxonomy>,
    pub tags: Vec<Taxonomy>,

    /// Publish date as authored in the CMS
    pub publish_date: String,

    /// Estimated minutes to read, at least one
    pub reading_time: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seo_keywords: Vec<String>,

    /// Social preview image, falling back to the featured image
    pub og_image: String,
}

/// Fields of a `blogPost` entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogPostFields {
    title: String,
    slug: String,
    #[serde(default)]
    excerpt: String,
    content: Option<RichTextNode>,
    featured_image: Option<Link>,
    categories: Option<Vec<Link>>,
    tags: Option<Vec<Link>>,
    publish_date: Option<String>,
    seo_title: Option<String>,
    seo_description: Option<String>,
    seo_keywords: Option<Vec<String>>,
    og_image: Option<Link>,
}

impl BlogPost {
    /// Build a post from a `blogPost` entry, resolving taxonomy and asset links.
    pub fn from_entry(entry: &Entry, resolver: &Resolver<'_>) -> Result<Self> {
        let fields: BlogPostFields = entry.fields_as()?;

        let taxonomies = |links: &Option<Vec<Link>>| -> Vec<Taxonomy> {
            links
                .iter()
                .flatten()
                .filter_map(|link| resolver.entry(link))
                .filter_map(|linked| Taxonomy::from_entry(linked).ok())
                .collect()
        };

        let featured_image = fields
            .featured_image
            .as_ref()
            .and_then(|link| resolver.asset_url(link))
            .unwrap_or_default();
        let og_image = fields
            .og_image
            .as_ref()
            .and_then(|link| resolver.asset_url(link))
            .unwrap_or_else(|| featured_image.clone());

        let mut content = fields.content.unwrap_or_default();
        resolve_embedded_assets(&mut content, resolver);

        Ok(Self {
            id: entry.sys.id.clone(),
            reading_time: content.reading_time(),
            categories: taxonomies(&fields.categories),
            tags: taxonomies(&fields.tags),
            title: fields.title,
            slug: fields.slug,
            excerpt: fields.excerpt,
            content,
            featured_image,
            publish_date: fields.publish_date.unwrap_or_default(),
            seo_title: fields.seo_title,
            seo_description: fields.seo_description,
            seo_keywords: fields.seo_keywords.unwrap_or_default(),
            og_image,
        })
    }

    /// Parsed publish timestamp, if the stored date is understood.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_publish_date(&self.publish_date)
    }

    pub fn has_category(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| c.slug == slug)
    }

    pub fn has_tag(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t.slug == slug)
    }

    /// Rendered HTML body.
    pub fn html(&self) -> String {
        self.content.to_html()
    }
}

/// Replace embedded asset links in a body with their resolved URL and title.
fn resolve_embedded_assets(content: &mut RichTextNode, resolver: &Resolver<'_>) {
    content.walk_mut(&mut |node| {
        if node.node_type != "embedded-asset-block" {
            return;
        }
        let Some(target) = node.data.get("target") else {
            return;
        };
        let Ok(link) = Link::deserialize(target) else {
            return;
        };
        if let Some(url) = resolver.asset_url(&link) {
            node.data = json!({ "url": url, "title": resolver.asset_title(&link) });
        }
    });
}

/// Parse the date formats the CMS produces.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM±HH:MM`, `YYYY-MM-DDTHH:MM` and
/// plain `YYYY-MM-DD` (midnight UTC).
pub fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::source::EntryCollection;

    fn collection() -> EntryCollection {
        serde_json::from_value(json!({
            "items": [{
                "sys": { "id": "p1" },
                "fields": {
                    "title": "Driving in Dubai",
                    "slug": "driving-in-dubai",
                    "excerpt": "Tips.",
                    "publishDate": "2024-03-10T09:00+04:00",
                    "featuredImage": { "sys": { "type": "Link", "linkType": "Asset", "id": "hero" } },
                    "categories": [{ "sys": { "type": "Link", "linkType": "Entry", "id": "cat-guides" } }],
                    "tags": [
                        { "sys": { "type": "Link", "linkType": "Entry", "id": "tag-dubai" } },
                        { "sys": { "type": "Link", "linkType": "Entry", "id": "tag-missing" } }
                    ],
                    "content": {
                        "nodeType": "document",
                        "content": [
                            { "nodeType": "paragraph", "content": [{ "nodeType": "text", "value": "Keep right." }] },
                            { "nodeType": "embedded-asset-block", "data": {
                                "target": { "sys": { "type": "Link", "linkType": "Asset", "id": "road" } }
                            }}
                        ]
                    }
                }
            }],
            "includes": {
                "Entry": [
                    { "sys": { "id": "cat-guides" }, "fields": { "name": "Guides", "slug": "guides" } },
                    { "sys": { "id": "tag-dubai" }, "fields": { "name": "Dubai", "slug": "dubai" } }
                ],
                "Asset": [
                    { "sys": { "id": "hero" }, "fields": { "file": { "url": "//img.example/hero.jpg" } } },
                    { "sys": { "id": "road" }, "fields": { "title": "Sheikh Zayed Road", "file": { "url": "//img.example/road.jpg" } } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_transform_resolves_links() {
        let collection = collection();
        let post = BlogPost::from_entry(&collection.items[0], &collection.resolver()).unwrap();

        assert_eq!(post.id, "p1");
        assert_eq!(post.featured_image, "https://img.example/hero.jpg");
        assert_eq!(post.og_image, post.featured_image);
        assert!(post.has_category("guides"));
        assert!(post.has_tag("dubai"));
        assert_eq!(post.tags.len(), 1);
        assert_eq!(post.reading_time, 1);
    }

    #[test]
    fn test_embedded_asset_rendered() {
        let collection = collection();
        let post = BlogPost::from_entry(&collection.items[0], &collection.resolver()).unwrap();

        assert_eq!(
            post.html(),
            "<p>Keep right.</p><figure><img src=\"https://img.example/road.jpg\" alt=\"Sheikh Zayed Road\"/></figure>"
        );
    }

    #[test]
    fn test_parse_publish_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap();
        assert_eq!(parse_publish_date("2024-03-10T09:00+04:00"), Some(expected));
        assert_eq!(parse_publish_date("2024-03-10T05:00:00Z"), Some(expected));
        assert_eq!(
            parse_publish_date("2024-03-10"),
            Some(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_publish_date("next tuesday"), None);
        assert_eq!(parse_publish_date(""), None);
    }
}
