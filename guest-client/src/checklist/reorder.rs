//! # Reordering
//!
//! Sections and items are displayed by `sort_order`. Every edit works on the
//! list in display order and then [`renumber`]s it, so the stored orders are
//! always `1..=len` with no gaps or duplicates.

use shared::{ChecklistItem, ChecklistSection, SchemaItem, SchemaSection};

/// Anything with a stable key and a position.
pub trait Ordered {
    fn key(&self) -> i64;
    fn sort_order(&self) -> i64;
    fn set_sort_order(&mut self, sort_order: i64);
}

macro_rules! impl_ordered {
    ($($ty:ty),*) => {
        $(impl Ordered for $ty {
            fn key(&self) -> i64 {
                self.id
            }

            fn sort_order(&self) -> i64 {
                self.sort_order
            }

            fn set_sort_order(&mut self, sort_order: i64) {
                self.sort_order = sort_order;
            }
        })*
    };
}

impl_ordered!(ChecklistSection, ChecklistItem, SchemaSection, SchemaItem);

/// Sort by `sort_order`, ties broken by key.
pub fn sort<T: Ordered>(list: &mut [T]) {
    list.sort_by_key(|entry| (entry.sort_order(), entry.key()));
}

/// `sort_order = index + 1` for every entry.
pub fn renumber<T: Ordered>(list: &mut [T]) {
    for (index, entry) in list.iter_mut().enumerate() {
        entry.set_sort_order(index as i64 + 1);
    }
}

/// Swap two positions (drag and drop) and renumber. Out of range or equal
/// indices leave the list untouched.
pub fn swap<T: Ordered>(list: &mut [T], from: usize, to: usize) -> bool {
    if from == to || from >= list.len() || to >= list.len() {
        return false;
    }
    list.swap(from, to);
    renumber(list);
    true
}

pub fn move_up<T: Ordered>(list: &mut [T], index: usize) -> bool {
    index > 0 && swap(list, index, index - 1)
}

pub fn move_down<T: Ordered>(list: &mut [T], index: usize) -> bool {
    swap(list, index, index + 1)
}

/// Entries named by `keys` first, in that order, then the rest in their
/// current order; renumbered. `None` if a key is not in `list`.
pub fn arrange<T: Ordered + Clone>(list: &[T], keys: &[i64]) -> Option<Vec<T>> {
    let mut arranged: Vec<T> = Vec::with_capacity(list.len());
    for &key in keys {
        if arranged.iter().any(|entry| entry.key() == key) {
            continue;
        }
        arranged.push(list.iter().find(|entry| entry.key() == key)?.clone());
    }
    arranged.extend(list.iter().filter(|entry| !keys.contains(&entry.key())).cloned());
    renumber(&mut arranged);
    Some(arranged)
}

/// Entries of `updated` whose order differs from the entry with the same key
/// in `original`. Entries missing from `original` are skipped.
pub fn changed<'a, T: Ordered>(updated: &'a [T], original: &[T]) -> Vec<&'a T> {
    updated
        .iter()
        .filter(|entry| {
            original
                .iter()
                .find(|old| old.key() == entry.key())
                .is_some_and(|old| old.sort_order() != entry.sort_order())
        })
        .collect()
}

/// Order for a new entry appended at the end.
pub fn next_sort_order<T: Ordered>(list: &[T]) -> i64 {
    list.iter().map(Ordered::sort_order).max().unwrap_or(0).max(0) + 1
}

/// Lowercase ASCII slug: runs of anything outside `[a-z0-9]` become one `-`,
/// with no leading or trailing dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}
