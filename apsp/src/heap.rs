//! Indexed binary min-heap over dense item ids `0..capacity`.
//! Every item has at most one entry; a position index makes `decrease_key` and `remove`
//! O(log n) for arbitrary enqueued items. Equal scores pop in ascending item order.
use std::cmp::Ordering;

use crate::Cost;

const ABSENT: usize = usize::MAX;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Entry { score: Cost, item: usize }
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score).then(self.item.cmp(&other.item))
    }
}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

/// Misuse (pushing an enqueued item, decreasing or removing one that is not enqueued,
/// raising a score through `decrease_key`) is a caller bug and panics.
#[derive(Clone, Debug)]
pub struct IndexedMinHeap {
    entries: Vec<Entry>,
    pos: Vec<usize>,
}

impl IndexedMinHeap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), pos: vec![ABSENT; capacity] }
    }

    pub fn capacity(&self) -> usize { self.pos.len() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn contains(&self, item: usize) -> bool {
        self.pos.get(item).is_some_and(|&p| p != ABSENT)
    }

    /// Current score of an enqueued item.
    pub fn score(&self, item: usize) -> Option<Cost> {
        if self.contains(item) { Some(self.entries[self.pos[item]].score) } else { None }
    }

    pub fn push(&mut self, item: usize, score: Cost) {
        assert!(item < self.pos.len(), "item {item} out of range for heap of capacity {}", self.pos.len());
        assert!(self.pos[item] == ABSENT, "item {item} is already enqueued");
        let p = self.entries.len();
        self.entries.push(Entry { score, item });
        self.pos[item] = p;
        self.sift_up(p);
    }

    pub fn peek_min(&self) -> Option<(usize, Cost)> {
        self.entries.first().map(|e| (e.item, e.score))
    }

    pub fn pop_min(&mut self) -> Option<(usize, Cost)> {
        self.take(0).map(|e| (e.item, e.score))
    }

    /// Lowers the score of an enqueued item.
    pub fn decrease_key(&mut self, item: usize, score: Cost) {
        let p = self.position(item);
        assert!(score <= self.entries[p].score, "decrease_key would raise item {item} from {} to {score}", self.entries[p].score);
        self.entries[p].score = score;
        self.sift_up(p);
    }

    /// Deletes an enqueued item and returns its score.
    pub fn remove(&mut self, item: usize) -> Cost {
        let p = self.position(item);
        let score = self.entries[p].score;
        self.take(p);
        score
    }

    fn position(&self, item: usize) -> usize {
        match self.pos.get(item) {
            Some(&p) if p != ABSENT => p,
            _ => panic!("item {item} is not enqueued"),
        }
    }

    fn take(&mut self, p: usize) -> Option<Entry> {
        let last = self.entries.len().checked_sub(1)?;
        self.swap(p, last);
        let e = self.entries.pop()?;
        self.pos[e.item] = ABSENT;
        if p < self.entries.len() {
            self.sift_down(p);
            self.sift_up(p);
        }
        Some(e)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.entries.swap(a, b);
        self.pos[self.entries[a].item] = a;
        self.pos[self.entries[b].item] = b;
    }

    fn sift_up(&mut self, mut p: usize) {
        while p > 0 {
            let parent = (p - 1) / 2;
            if self.entries[p] >= self.entries[parent] { break; }
            self.swap(p, parent);
            p = parent;
        }
    }

    fn sift_down(&mut self, mut p: usize) {
        let n = self.entries.len();
        loop {
            let l = 2 * p + 1;
            if l >= n { break; }
            let r = l + 1;
            let c = if r < n && self.entries[r] < self.entries[l] { r } else { l };
            if self.entries[p] <= self.entries[c] { break; }
            self.swap(p, c);
            p = c;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::BTreeSet;

    fn assert_consistent(h: &IndexedMinHeap) {
        for (p, e) in h.entries.iter().enumerate() {
            assert_eq!(h.pos[e.item], p, "position index stale for item {}", e.item);
            if p > 0 { assert!(h.entries[(p - 1) / 2] <= *e, "heap order broken at {}", p); }
        }
        let live = h.pos.iter().filter(|&&p| p != ABSENT).count();
        assert_eq!(live, h.entries.len());
    }

    fn drain(h: &mut IndexedMinHeap) -> Vec<(usize, Cost)> {
        std::iter::from_fn(|| h.pop_min()).collect()
    }

    #[test]
    fn pops_in_score_order() {
        let mut h = IndexedMinHeap::with_capacity(6);
        for (item, score) in [(0, 9), (1, -3), (2, 4), (3, 0), (4, 12), (5, 4)] { h.push(item, score); }
        assert_consistent(&h);
        assert_eq!(h.peek_min(), Some((1, -3)));
        assert_eq!(drain(&mut h), vec![(1, -3), (3, 0), (2, 4), (5, 4), (0, 9), (4, 12)]);
        assert!(h.is_empty());
        assert_eq!(h.pop_min(), None);
    }

    #[test]
    fn ties_break_by_item_id() {
        let mut h = IndexedMinHeap::with_capacity(5);
        for item in [3, 1, 4, 0, 2] { h.push(item, 7); }
        assert_eq!(drain(&mut h).into_iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut h = IndexedMinHeap::with_capacity(4);
        h.push(0, 10); h.push(1, 20); h.push(2, 30); h.push(3, 40);
        h.decrease_key(3, 5);
        assert_consistent(&h);
        assert_eq!(h.score(3), Some(5));
        assert_eq!(h.pop_min(), Some((3, 5)));
        h.decrease_key(2, 10);
        assert_eq!(drain(&mut h), vec![(0, 10), (2, 10), (1, 20)]);
    }

    #[test]
    fn remove_arbitrary_items() {
        let mut h = IndexedMinHeap::with_capacity(8);
        for item in 0..8 { h.push(item, (item as Cost * 7) % 5); }
        assert_eq!(h.remove(4), 3);
        assert_eq!(h.remove(0), 0);
        assert_consistent(&h);
        assert!(!h.contains(4));
        assert_eq!(h.score(4), None);
        h.push(4, -1);
        assert_eq!(h.pop_min(), Some((4, -1)));
        assert_eq!(h.len(), 6);
    }

    #[test]
    fn matches_ordered_set_model() {
        let mut rng = StdRng::seed_from_u64(2024);
        let cap = 64;
        let mut h = IndexedMinHeap::with_capacity(cap);
        let mut model: BTreeSet<(Cost, usize)> = BTreeSet::new();
        let mut score = vec![0 as Cost; cap];
        for _ in 0..5_000 {
            let item = rng.gen_range(0..cap);
            match rng.gen_range(0..4) {
                0 if !h.contains(item) => {
                    let s = rng.gen_range(-50..50);
                    h.push(item, s);
                    model.insert((s, item));
                    score[item] = s;
                }
                1 if h.contains(item) => {
                    let s = score[item] - rng.gen_range(0..20);
                    h.decrease_key(item, s);
                    model.remove(&(score[item], item));
                    model.insert((s, item));
                    score[item] = s;
                }
                2 if h.contains(item) => {
                    assert_eq!(h.remove(item), score[item]);
                    model.remove(&(score[item], item));
                }
                _ => {
                    let expected = model.pop_first().map(|(s, i)| (i, s));
                    assert_eq!(h.pop_min(), expected);
                }
            }
            assert_eq!(h.len(), model.len());
        }
        assert_consistent(&h);
    }

    #[test]
    #[should_panic(expected = "not enqueued")]
    fn decrease_unknown_item_panics() {
        let mut h = IndexedMinHeap::with_capacity(3);
        h.push(0, 1);
        h.decrease_key(2, 0);
    }

    #[test]
    #[should_panic(expected = "not enqueued")]
    fn remove_unknown_item_panics() {
        let mut h = IndexedMinHeap::with_capacity(3);
        h.remove(1);
    }

    #[test]
    #[should_panic(expected = "already enqueued")]
    fn double_push_panics() {
        let mut h = IndexedMinHeap::with_capacity(3);
        h.push(1, 1);
        h.push(1, 0);
    }

    #[test]
    #[should_panic(expected = "would raise")]
    fn increasing_through_decrease_key_panics() {
        let mut h = IndexedMinHeap::with_capacity(1);
        h.push(0, 1);
        h.decrease_key(0, 2);
    }
}
