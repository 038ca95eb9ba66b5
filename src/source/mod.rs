//! Content source abstractions.
//!
//! Every entity the site shows lives in a hosted CMS. Entries are fetched by
//! content type, optionally narrowed by field equality, and come back with
//! their linked entries and assets in an `includes` block:
//!
//! ```text
//! {
//!   "total": 2,
//!   "items":    [ { "sys": {..}, "fields": { "brand": { "sys": { "type": "Link", "id": "b1" } } } } ],
//!   "includes": { "Entry": [ { "sys": { "id": "b1" }, .. } ], "Asset": [ .. ] }
//! }
//! ```
//!
//! Two backends implement [`ContentSource`]: the delivery API client and a
//! directory of documents in the same shape.

pub mod delivery;
pub mod local;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

pub use delivery::DeliveryClient;
pub use local::LocalContent;

/// Content type identifiers used by the site.
pub mod content_types {
    pub const VEHICLE: &str = "rentalVehicle";
    pub const BRAND: &str = "carRentalBrand";
    pub const VEHICLE_CATEGORY: &str = "vehicleCategory";
    pub const BLOG_POST: &str = "blogPost";
    pub const BLOG_CATEGORY: &str = "blogCategory";
    pub const BLOG_TAG: &str = "blogTag";
}

/// Trait for content backends.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Fetch the entries matching a query.
    async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection>;
}

/// A fetch-by-type request, optionally narrowed by field equality.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryQuery {
    pub content_type: String,
    /// `(field name, value)` pairs, compared against `fields.<name>`
    pub field_equals: Vec<(String, String)>,
    pub order: Option<String>,
    pub limit: Option<usize>,
    pub include: u8,
}

impl EntryQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            field_equals: Vec::new(),
            order: None,
            limit: None,
            include: 2,
        }
    }

    /// Require `fields.<name>` to equal `value`.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_equals.push((name.into(), value.into()));
        self
    }

    /// Order by a path such as `-sys.createdAt` or `fields.name`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include(mut self, depth: u8) -> Self {
        self.include = depth;
        self
    }
}

/// System metadata of an entry, asset or link.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reference to another entry or asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
    pub sys: Sys,
}

impl Link {
    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// A content entry with untyped fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub sys: Sys,

    #[serde(default)]
    pub fields: Value,
}

impl Entry {
    /// Deserialize the fields into a typed structure.
    pub fn fields_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.fields)?)
    }
}

/// A media asset.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub sys: Sys,

    #[serde(default)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetFields {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub content_type: Option<String>,
}

/// Linked entries and assets returned alongside `items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Entry")]
    pub entries: Vec<Entry>,

    #[serde(default, rename = "Asset")]
    pub assets: Vec<Asset>,
}

/// One page of entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub total: usize,

    #[serde(default)]
    pub items: Vec<Entry>,

    #[serde(default)]
    pub includes: Includes,
}

impl EntryCollection {
    /// Index items and includes for link resolution.
    pub fn resolver(&self) -> Resolver<'_> {
        let entries = self
            .items
            .iter()
            .chain(&self.includes.entries)
            .map(|entry| (entry.sys.id.as_str(), entry))
            .collect();
        let assets = self
            .includes
            .assets
            .iter()
            .map(|asset| (asset.sys.id.as_str(), asset))
            .collect();

        Resolver { entries, assets }
    }
}

/// Resolves links against one collection.
#[derive(Debug)]
pub struct Resolver<'a> {
    entries: HashMap<&'a str, &'a Entry>,
    assets: HashMap<&'a str, &'a Asset>,
}

impl<'a> Resolver<'a> {
    pub fn entry(&self, link: &Link) -> Option<&'a Entry> {
        self.entries.get(link.id()).copied()
    }

    /// Resolve and deserialize a linked entry's fields.
    ///
    /// Unresolvable links and malformed fields both yield `None`.
    pub fn entry_fields<T: DeserializeOwned>(&self, link: &Link) -> Option<(&'a Entry, T)> {
        let entry = self.entry(link)?;
        match entry.fields_as::<T>() {
            Ok(fields) => Some((entry, fields)),
            Err(e) => {
                log::debug!("Skipping linked entry {}: {}", link.id(), e);
                None
            }
        }
    }

    /// Absolute URL of a linked asset's file.
    pub fn asset_url(&self, link: &Link) -> Option<String> {
        let asset = self.assets.get(link.id())?;
        let file = asset.fields.file.as_ref()?;
        crate::utils::absolute_asset_url(&file.url)
    }

    pub fn asset_title(&self, link: &Link) -> Option<String> {
        self.assets.get(link.id())?.fields.title.clone()
    }
}
