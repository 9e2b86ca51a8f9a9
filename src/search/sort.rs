//! Ordering of consolidated results.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use std::cmp::Ordering;
use tracing::warn;

use crate::models::{ConsolidatedItem, SortDirection, SortField};

/// Title comparator using the CLDR root collation.
///
/// Accents are secondary differences ("Éclair" sorts with "Eclair", before
/// "Edge") and case is tertiary, lowercase first. Titles the collation
/// considers equal fall back to code point order so the comparison is total.
pub struct TitleCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl TitleCollator {
    pub fn new() -> Self {
        let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                warn!(error = %e, "collation data unavailable, sorting titles case-insensitively");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ordering = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => fold_case_compare(a, b),
        };
        ordering.then_with(|| a.cmp(b))
    }
}

impl Default for TitleCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive comparison, lowercase first on ties.
fn fold_case_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Compare two titles the way a reader expects a catalog to be ordered.
pub fn collate(a: &str, b: &str) -> Ordering {
    TitleCollator::new().compare(a, b)
}

/// Compare two films on the given field and direction.
pub fn compare(
    collator: &TitleCollator,
    a: &ConsolidatedItem,
    b: &ConsolidatedItem,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = match field {
        SortField::Title => collator.compare(&a.title, &b.title),
        SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Sort films in place. Films with equal keys keep their relative order.
pub fn sort(items: &mut [ConsolidatedItem], field: SortField, direction: SortDirection) {
    let collator = TitleCollator::new();
    items.sort_by(|a, b| compare(&collator, a, b, field, direction));
}
