//! Brand, category and tag records.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::Entry;

/// A simple `(id, name, slug)` label used as a filter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub id: String,
    pub name: String,
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Field names differ per content type; all map onto the same shape.
#[derive(Debug, Deserialize)]
struct TaxonomyFields {
    #[serde(alias = "brandName", alias = "categoryName")]
    name: String,

    #[serde(alias = "urlSlug")]
    slug: String,

    #[serde(default)]
    description: Option<String>,
}

impl Taxonomy {
    /// Build from a brand, vehicle category, blog category or blog tag entry.
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        let fields: TaxonomyFields = entry.fields_as()?;
        Ok(Self {
            id: entry.sys.id.clone(),
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
        })
    }
}

/// Brand entry for the brand picker: `{ id: slug, label: name }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandOption {
    pub id: String,
    pub label: String,
}

impl BrandOption {
    /// The leading "match everything" option.
    pub fn all() -> Self {
        Self {
            id: "all".to_string(),
            label: "All Brands".to_string(),
        }
    }
}

impl From<&Taxonomy> for BrandOption {
    fn from(brand: &Taxonomy) -> Self {
        Self {
            id: brand.slug.clone(),
            label: brand.name.clone(),
        }
    }
}

/// Build the brand picker list: "All Brands" first, then by label.
pub fn brand_options(brands: &[Taxonomy]) -> Vec<BrandOption> {
    let mut options: Vec<BrandOption> = brands.iter().map(BrandOption::from).collect();
    options.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    options.insert(0, BrandOption::all());
    options
}
