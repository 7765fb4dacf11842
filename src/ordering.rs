//! Ordering engine shared by every orderable collection.
//!
//! At rest the `order_position` values of a collection form a dense
//! zero-based permutation. A drag gesture gives a `(from, to)` pair; the
//! pure [`reorder`] function produces the new list and the db layer
//! renumbers every row inside one transaction so a partial failure never
//! leaves a half-renumbered list behind.

/// The collections whose rows carry an `order_position` column.
///
/// Table names are resolved through this enum so the renumbering SQL is
/// never built from caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedCollection {
    Activities,
    Restaurants,
    Poi,
    Faqs,
    Reviews,
    Sections,
}

impl OrderedCollection {
    pub fn table(&self) -> &'static str {
        match self {
            OrderedCollection::Activities => "activities",
            OrderedCollection::Restaurants => "restaurants",
            OrderedCollection::Poi => "poi",
            OrderedCollection::Faqs => "faqs",
            OrderedCollection::Reviews => "reviews",
            OrderedCollection::Sections => "section_visibility",
        }
    }
}

/// Move the element at `from` to position `to`, shifting the elements in
/// between by one.
///
/// Returns `None` when nothing should be written: `from == to` is an
/// explicit no-op (zero writes must be issued), and out-of-range indices
/// are the caller's validation problem, not a list to persist.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from == to || from >= items.len() || to >= items.len() {
        return None;
    }

    let mut next: Vec<T> = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_first_element_to_third_position() {
        let list = vec!["A", "B", "C", "D"];
        let next = reorder(&list, 0, 2).unwrap();
        assert_eq!(next, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn moving_backwards_shifts_intervening_items() {
        let list = vec!["A", "B", "C", "D"];
        let next = reorder(&list, 3, 1).unwrap();
        assert_eq!(next, vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn same_index_is_a_no_op() {
        let list = vec!["A", "B", "C"];
        assert!(reorder(&list, 1, 1).is_none());
    }

    #[test]
    fn out_of_range_indices_produce_no_list() {
        let list = vec!["A", "B"];
        assert!(reorder(&list, 2, 0).is_none());
        assert!(reorder(&list, 0, 2).is_none());
        assert!(reorder::<&str>(&[], 0, 0).is_none());
    }

    #[test]
    fn result_is_a_permutation_of_the_input() {
        let list: Vec<i32> = (0..7).collect();
        let next = reorder(&list, 5, 1).unwrap();
        let mut sorted = next.clone();
        sorted.sort();
        assert_eq!(sorted, list);
        assert_eq!(next.len(), list.len());
    }

    #[test]
    fn renumbering_by_index_matches_new_positions() {
        // After persistence each element carries its index as order_position.
        let list = vec!["A", "B", "C", "D"];
        let next = reorder(&list, 0, 2).unwrap();
        let positions: Vec<(usize, &str)> = next.into_iter().enumerate().collect();
        assert_eq!(positions, vec![(0, "B"), (1, "C"), (2, "A"), (3, "D")]);
    }
}
