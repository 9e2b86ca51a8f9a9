//! Film records as reported by providers and after consolidation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when rendering the distributor list of a consolidated film.
pub const DISTRIBUTOR_SEPARATOR: &str = ", ";

/// One inventory record as reported by a single catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Film title
    pub title: String,

    /// Year of release
    pub release_year: i32,

    /// Copies this provider currently has in stock
    #[serde(rename = "numberOfCopiesAvailable", alias = "copiesAvailable")]
    pub copies_available: u32,

    /// Director as reported by the provider
    #[serde(default)]
    pub director: String,

    /// Distributor label reported by the provider
    #[serde(default)]
    pub distributor: String,
}

impl CatalogItem {
    /// Create a new catalog item
    pub fn new(
        title: impl Into<String>,
        release_year: i32,
        copies_available: u32,
        director: impl Into<String>,
        distributor: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            release_year,
            copies_available,
            director: director.into(),
            distributor: distributor.into(),
        }
    }
}

/// One logical film after merging the records of every provider that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedItem {
    /// Film title
    pub title: String,

    /// Year of release
    pub release_year: i32,

    /// Sum of the copies reported by every contributing provider
    pub total_copies_available: u64,

    /// Director of the first record seen for this film
    pub director: String,

    /// Distinct distributor labels in first-seen order
    ///
    /// Serialized as one `", "`-joined string. A label that itself contains
    /// `", "` cannot be told apart when that string is read back; readers that
    /// need exact labels should send a JSON array, which is also accepted.
    #[serde(
        serialize_with = "serialize_distributors",
        deserialize_with = "deserialize_distributors"
    )]
    pub distributors: Vec<String>,
}

impl ConsolidatedItem {
    /// Start a consolidated film from its first contributing record
    pub fn from_item(item: CatalogItem) -> Self {
        Self {
            title: item.title,
            release_year: item.release_year,
            total_copies_available: u64::from(item.copies_available),
            director: item.director,
            distributors: vec![item.distributor],
        }
    }

    /// Distributors rendered as a single comma separated string
    pub fn distributor_list(&self) -> String {
        self.distributors.join(DISTRIBUTOR_SEPARATOR)
    }
}

fn serialize_distributors<S>(distributors: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&distributors.join(DISTRIBUTOR_SEPARATOR))
}

fn deserialize_distributors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Distributors {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Distributors::deserialize(deserializer)? {
        Distributors::Joined(joined) if joined.is_empty() => Vec::new(),
        Distributors::Joined(joined) => joined
            .split(DISTRIBUTOR_SEPARATOR)
            .map(str::to_string)
            .collect(),
        Distributors::List(list) => list,
    })
}
