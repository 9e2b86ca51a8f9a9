//! Consolidation of catalog records reported by several providers.

use std::collections::HashMap;

use crate::models::{CatalogItem, ConsolidatedItem};

/// Identity of a film across providers.
///
/// Two records describe the same film when both title and release year match
/// exactly. Kept as a struct rather than a joined string so titles containing
/// separator characters cannot collide with other titles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub title: String,
    pub release_year: i32,
}

impl IdentityKey {
    /// Identity of a single catalog record
    pub fn of(item: &CatalogItem) -> Self {
        Self {
            title: item.title.clone(),
            release_year: item.release_year,
        }
    }
}

/// Merge catalog records sharing an [`IdentityKey`] into consolidated films.
///
/// Groups are emitted in the order their first record was seen. Within a group
/// the copies are summed, distinct distributors are kept in first-seen order and
/// the director of the first record wins. Directors of later records are not
/// compared against it.
///
/// ```
/// use lantern_search::models::CatalogItem;
/// use lantern_search::utils::deduplicate;
///
/// let merged = deduplicate(vec![
///     CatalogItem::new("Matrix", 1999, 3, "Wachowskis", "WarnerBros"),
///     CatalogItem::new("Matrix", 1999, 2, "Wachowskis", "Sony"),
/// ]);
///
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].total_copies_available, 5);
/// assert_eq!(merged[0].distributor_list(), "WarnerBros, Sony");
/// ```
pub fn deduplicate(items: Vec<CatalogItem>) -> Vec<ConsolidatedItem> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::with_capacity(items.len());
    let mut merged: Vec<ConsolidatedItem> = Vec::new();

    for item in items {
        let key = IdentityKey::of(&item);

        match index.get(&key) {
            Some(&slot) => {
                let existing = &mut merged[slot];
                existing.total_copies_available += u64::from(item.copies_available);
                if !existing.distributors.contains(&item.distributor) {
                    existing.distributors.push(item.distributor);
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(ConsolidatedItem::from_item(item));
            }
        }
    }

    merged
}
