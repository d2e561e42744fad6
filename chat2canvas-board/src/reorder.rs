//! Positional algorithms for ordered collections.
//!
//! These functions hold no state and know nothing about projects or
//! columns. The store uses them for every drag-and-drop change: reordering
//! inside one sequence, moving an element between two sequences, and
//! recomputing the 1..N display numbers afterwards.

use crate::error::{BoardError, Result};
use crate::types::{Card, CardId};

/// An element with a stable identity inside a sequence
pub trait Identified {
    type Id: PartialEq;

    fn id(&self) -> &Self::Id;
}

/// An element carrying a 1-based position-derived display number
pub trait Numbered {
    fn number(&self) -> usize;

    fn set_number(&mut self, number: usize);
}

impl Identified for Card {
    type Id = CardId;

    fn id(&self) -> &CardId {
        &self.id
    }
}

impl Numbered for Card {
    fn number(&self) -> usize {
        self.number
    }

    fn set_number(&mut self, number: usize) {
        self.number = number;
    }
}

/// Move the element at `old_index` so that it ends up at `new_index`.
///
/// Remove-then-insert, not swap: every element between the two positions
/// shifts by one. Equal indices leave the sequence untouched. Both indices
/// must lie in `[0, len - 1]`; otherwise `IndexOutOfRange` is returned and
/// the sequence is not modified.
pub fn move_within<T>(seq: &mut Vec<T>, old_index: usize, new_index: usize) -> Result<()> {
    let len = seq.len();
    for index in [old_index, new_index] {
        if index >= len {
            return Err(BoardError::IndexOutOfRange { index, len });
        }
    }
    if old_index != new_index {
        let item = seq.remove(old_index);
        seq.insert(new_index, item);
    }
    Ok(())
}

/// Position of the element with `id`, if present
pub fn position_of<T: Identified>(seq: &[T], id: &T::Id) -> Option<usize> {
    seq.iter().position(|item| item.id() == id)
}

/// Resolve a requested insertion point against a sequence of length `len`.
///
/// A missing index, or one past the end, appends. This is what a drop onto
/// a column body (rather than onto a specific card) produces.
pub fn insertion_index(len: usize, requested: Option<usize>) -> usize {
    match requested {
        Some(index) if index <= len => index,
        _ => len,
    }
}

/// Move the element with `id` from `source` into `target`.
///
/// Returns the index the element landed at in `target`, or `None` when no
/// element in `source` has that id (both sequences are then untouched).
pub fn move_across<T: Identified>(
    source: &mut Vec<T>,
    target: &mut Vec<T>,
    id: &T::Id,
    insert_index: Option<usize>,
) -> Option<usize> {
    let from = position_of(source, id)?;
    let item = source.remove(from);
    let at = insertion_index(target.len(), insert_index);
    target.insert(at, item);
    Some(at)
}

/// Reassign every element's number to its 1-based position.
pub fn renumber<T: Numbered>(seq: &mut [T]) {
    for (index, item) in seq.iter_mut().enumerate() {
        item.set_number(index + 1);
    }
}

/// True when the numbers read exactly `1, 2, ..., N` in sequence order.
pub fn is_contiguous<T: Numbered>(seq: &[T]) -> bool {
    seq.iter()
        .enumerate()
        .all(|(index, item)| item.number() == index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        number: usize,
    }

    impl Identified for Item {
        type Id = &'static str;

        fn id(&self) -> &&'static str {
            &self.id
        }
    }

    impl Numbered for Item {
        fn number(&self) -> usize {
            self.number
        }

        fn set_number(&mut self, number: usize) {
            self.number = number;
        }
    }

    fn items(ids: &[&'static str]) -> Vec<Item> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Item { id, number: i + 1 })
            .collect()
    }

    fn ids(seq: &[Item]) -> Vec<&'static str> {
        seq.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_move_within_forward() {
        let mut seq = items(&["a", "b", "c", "d"]);
        move_within(&mut seq, 0, 2).unwrap();
        assert_eq!(ids(&seq), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_move_within_backward() {
        let mut seq = items(&["a", "b", "c", "d"]);
        move_within(&mut seq, 3, 1).unwrap();
        assert_eq!(ids(&seq), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_move_within_same_index_is_noop() {
        let mut seq = items(&["a", "b", "c"]);
        let before = seq.clone();
        move_within(&mut seq, 1, 1).unwrap();
        assert_eq!(seq, before);
    }

    #[test]
    fn test_move_within_out_of_range() {
        let mut seq = items(&["a", "b"]);
        let before = seq.clone();
        let err = move_within(&mut seq, 0, 2).unwrap_err();
        assert!(matches!(err, BoardError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(seq, before);

        let mut empty: Vec<Item> = Vec::new();
        assert!(move_within(&mut empty, 0, 0).is_err());
    }

    #[test]
    fn test_insertion_index() {
        assert_eq!(insertion_index(3, None), 3);
        assert_eq!(insertion_index(3, Some(0)), 0);
        assert_eq!(insertion_index(3, Some(3)), 3);
        assert_eq!(insertion_index(3, Some(17)), 3);
        assert_eq!(insertion_index(0, Some(5)), 0);
    }

    #[test]
    fn test_move_across() {
        let mut source = items(&["a", "b", "c"]);
        let mut target = items(&["x", "y"]);
        let at = move_across(&mut source, &mut target, &"b", Some(1));
        assert_eq!(at, Some(1));
        assert_eq!(ids(&source), vec!["a", "c"]);
        assert_eq!(ids(&target), vec!["x", "b", "y"]);
    }

    #[test]
    fn test_move_across_defaults_to_end() {
        let mut source = items(&["a"]);
        let mut target = items(&["x", "y"]);
        assert_eq!(move_across(&mut source, &mut target, &"a", None), Some(2));
        assert!(source.is_empty());
        assert_eq!(ids(&target), vec!["x", "y", "a"]);
    }

    #[test]
    fn test_move_across_missing_id() {
        let mut source = items(&["a"]);
        let mut target = items(&["x"]);
        assert_eq!(move_across(&mut source, &mut target, &"zz", Some(0)), None);
        assert_eq!(ids(&source), vec!["a"]);
        assert_eq!(ids(&target), vec!["x"]);
    }

    #[test]
    fn test_renumber() {
        let mut seq = items(&["a", "b", "c"]);
        seq.swap(0, 2);
        assert!(!is_contiguous(&seq));
        renumber(&mut seq);
        assert!(is_contiguous(&seq));
        assert_eq!(seq[0].number, 1);
        assert_eq!(seq[0].id, "c");
    }

    #[test]
    fn test_renumber_idempotent() {
        let mut seq = items(&["a", "b", "c"]);
        seq.reverse();
        renumber(&mut seq);
        let once = seq.clone();
        renumber(&mut seq);
        assert_eq!(seq, once);
    }
}
