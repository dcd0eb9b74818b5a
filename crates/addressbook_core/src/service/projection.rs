//! Filter and sort stages of the contact projection.
//!
//! # Responsibility
//! - Define the filter predicate and the enumerated sort comparators.
//! - Derive a read-only, filtered-then-sorted view over the record store.
//!
//! # Invariants
//! - A projection is derived from the store at read time and borrows it, so
//!   it cannot outlive or go stale against the next mutation.
//! - Sorting is stable: comparator ties keep store order.

use crate::model::contact::Contact;
use crate::model::tag::Tag;
use crate::store::address_book::AddressBook;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// Selectable comparator for the projection sort stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Case-insensitive name, ascending.
    #[default]
    ByName,
    /// Smallest tag ascending; untagged contacts last.
    ByEarliestTag,
}

impl SortMode {
    /// Stable string id used by config and CLI input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByName => "name",
            Self::ByEarliestTag => "tag",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::ByName),
            "tag" | "tags" => Some(Self::ByEarliestTag),
            _ => None,
        }
    }

    pub fn compare(self, left: &Contact, right: &Contact) -> Ordering {
        match self {
            Self::ByName => left.name.cmp_ignore_case(&right.name),
            Self::ByEarliestTag => match (left.earliest_tag(), right.earliest_tag()) {
                (Some(left_tag), Some(right_tag)) => left_tag.cmp(right_tag),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

type Predicate = Box<dyn Fn(&Contact) -> bool>;

/// Predicate stage of the projection.
pub struct ContactFilter {
    description: String,
    predicate: Option<Predicate>,
}

impl ContactFilter {
    /// The default filter: every contact is visible.
    pub fn show_all() -> Self {
        Self {
            description: "all".to_string(),
            predicate: None,
        }
    }

    /// Wraps an arbitrary predicate.
    pub fn new(description: impl Into<String>, predicate: impl Fn(&Contact) -> bool + 'static) -> Self {
        Self {
            description: description.into(),
            predicate: Some(Box::new(predicate)),
        }
    }

    /// Matches contacts having any name word equal to any keyword, ignoring
    /// case.
    pub fn name_contains_any<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_ascii_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        let description = format!("name_keywords={}", keywords.len());
        Self::new(description, move |contact: &Contact| {
            contact
                .name
                .words()
                .any(|word| keywords.iter().any(|keyword| word.eq_ignore_ascii_case(keyword)))
        })
    }

    /// Matches contacts carrying `tag`.
    pub fn has_tag(tag: Tag) -> Self {
        Self::new("tag", move |contact: &Contact| contact.has_tag(&tag))
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.predicate
            .as_ref()
            .map_or(true, |predicate| predicate(contact))
    }

    pub fn is_show_all(&self) -> bool {
        self.predicate.is_none()
    }

    /// Short metadata label, safe to log.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self::show_all()
    }
}

impl Debug for ContactFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactFilter")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Read-only filtered-then-sorted view over the store.
#[derive(Debug, Clone)]
pub struct Projection<'book> {
    items: Vec<&'book Contact>,
}

impl<'book> Projection<'book> {
    /// Runs the filter stage, then a stable sort with `sort`.
    pub fn derive(book: &'book AddressBook, filter: &ContactFilter, sort: SortMode) -> Self {
        let mut items: Vec<&Contact> = book
            .contacts()
            .iter()
            .filter(|contact| filter.matches(contact))
            .collect();
        items.sort_by(|left, right| sort.compare(left, right));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Contact at a zero-based visible index.
    pub fn get(&self, index: usize) -> Option<&'book Contact> {
        self.items.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'book Contact> + '_ {
        self.items.iter().copied()
    }

    /// Visible names in projection order.
    pub fn names(&self) -> Vec<&'book str> {
        self.items.iter().map(|contact| contact.name.as_str()).collect()
    }
}
