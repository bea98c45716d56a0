use crate::Event;
use chrono::DateTime;
use chrono_tz::Tz;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Merges timelines that are each sorted by start into one sorted list.
///
/// Occurrences with the same start keep the order of their timelines.
/// Nothing is deduplicated: two identical events stay two occurrences.
pub fn merge(timelines: Vec<Vec<Event>>) -> Vec<Event> {
    let total = timelines.iter().map(Vec::len).sum();

    let mut min_heap: BinaryHeap<_> = timelines
        .into_iter()
        .enumerate()
        .filter_map(|(index, timeline)| {
            let mut iter = timeline.into_iter();
            iter.next().map(|cursor| {
                Reverse(IterHolder {
                    cursor,
                    index,
                    iter,
                })
            })
        })
        .collect();

    let mut merged = Vec::with_capacity(total);
    while let Some(Reverse(IterHolder {
        cursor,
        index,
        mut iter,
    })) = min_heap.pop()
    {
        if let Some(next) = iter.next() {
            min_heap.push(Reverse(IterHolder {
                cursor: next,
                index,
                iter,
            }));
        }
        merged.push(cursor);
    }

    merged
}

/// Holds a timeline and the earliest event that has not come out of it yet
struct IterHolder<I: Iterator<Item = Event>> {
    cursor: Event,
    index: usize,
    iter: I,
}

impl<I: Iterator<Item = Event>> IterHolder<I> {
    fn key(&self) -> (DateTime<Tz>, usize) {
        (self.cursor.start(), self.index)
    }
}

impl<I: Iterator<Item = Event>> Eq for IterHolder<I> {}

impl<I: Iterator<Item = Event>> PartialEq for IterHolder<I> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<I: Iterator<Item = Event>> PartialOrd for IterHolder<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: Iterator<Item = Event>> Ord for IterHolder<I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
