//! Local filesystem content source.
//!
//! Serves CMS-shaped documents from a directory, one file per content type.
//! Used for development and tests; production deployments use
//! [`DeliveryClient`](crate::source::DeliveryClient).
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── rentalVehicle.json     # { "items": [..], "includes": { "Entry": [..], "Asset": [..] } }
//! ├── carRentalBrand.json
//! ├── vehicleCategory.json
//! ├── blogPost.json
//! ├── blogCategory.json
//! └── blogTag.json
//! ```

use std::cmp::Ordering;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::source::{ContentSource, Entry, EntryCollection, EntryQuery};

/// Directory-backed content source.
#[derive(Debug, Clone)]
pub struct LocalContent {
    root_dir: PathBuf,
}

impl LocalContent {
    /// Create a source rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn path(&self, content_type: &str) -> PathBuf {
        self.root_dir.join(format!("{content_type}.json"))
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, content_type: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(content_type)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn matches(entry: &Entry, field_equals: &[(String, String)]) -> bool {
        field_equals.iter().all(|(field, expected)| {
            match entry.fields.get(field) {
                Some(Value::String(s)) => s == expected,
                Some(Value::Bool(b)) => b.to_string() == *expected,
                Some(Value::Number(n)) => n.to_string() == *expected,
                _ => false,
            }
        })
    }

    /// Look up a `fields.<name>` order path.
    fn field_value<'a>(entry: &'a Entry, path: &str) -> Option<&'a Value> {
        path.strip_prefix("fields.")
            .and_then(|key| entry.fields.get(key))
    }

    fn compare(a: &Entry, b: &Entry, path: &str) -> Ordering {
        match path {
            "sys.createdAt" => return a.sys.created_at.cmp(&b.sys.created_at),
            "sys.id" => return a.sys.id.cmp(&b.sys.id),
            _ => {}
        }

        match (Self::field_value(a, path), Self::field_value(b, path)) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    fn sort(items: &mut [Entry], order: &str) {
        let (descending, path) = match order.strip_prefix('-') {
            Some(path) => (true, path),
            None => (false, order),
        };

        items.sort_by(|a, b| {
            let ord = Self::compare(a, b, path);
            if descending { ord.reverse() } else { ord }
        });
    }
}

#[async_trait]
impl ContentSource for LocalContent {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn entries(&self, query: &EntryQuery) -> Result<EntryCollection> {
        let bytes = self
            .read_bytes(&query.content_type)
            .await?
            .ok_or_else(|| AppError::content(&query.content_type, "unknownContentType"))?;

        let mut collection: EntryCollection = serde_json::from_slice(&bytes)?;
        collection
            .items
            .retain(|entry| Self::matches(entry, &query.field_equals));

        if let Some(order) = &query.order {
            Self::sort(&mut collection.items, order);
        }

        collection.total = collection.items.len();
        if let Some(limit) = query.limit {
            collection.items.truncate(limit);
        }

        Ok(collection)
    }
}
