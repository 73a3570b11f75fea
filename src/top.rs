//! Frequency counting and selection of the most frequent items

use crate::error::Error;
use serde::Serialize;
use std::{
    cmp::Reverse,
    collections::{hash_map, BinaryHeap, HashMap, VecDeque},
    num::NonZeroUsize,
    str::FromStr,
};

/// Maximal number of items to be reported
///
/// Unlike a bare integer, this cannot be negative.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TopK(usize);
//
impl TopK {
    /// Validate a signed rank limit
    pub fn new(k: i64) -> Result<Self, Error> {
        usize::try_from(k).map(Self).map_err(|_| Error::InvalidArgument {
            name: "k",
            message: format!("rank limit must be non-negative, got {k}"),
        })
    }

    /// Numerical value of the limit
    pub fn get(self) -> usize {
        self.0
    }
}
//
impl From<usize> for TopK {
    fn from(k: usize) -> Self {
        Self(k)
    }
}
//
impl FromStr for TopK {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let k = s.trim().parse::<i64>().map_err(|e| Error::InvalidArgument {
            name: "k",
            message: format!("{s:?} is not an integer ({e})"),
        })?;
        Self::new(k)
    }
}

/// Whether items that only differ by case should be counted together
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Case {
    /// `The` and `the` are different items
    Sensitive,

    /// `The` and `the` are both counted as `the`
    #[default]
    Insensitive,
}
//
impl Case {
    /// Counting key of an item
    fn key(self, item: &str) -> Box<str> {
        match self {
            Self::Sensitive => item.into(),
            Self::Insensitive => item.to_lowercase().into(),
        }
    }
}

/// Item along with its number of occurences
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Ranked {
    /// Counted item (lowercase if counted case-insensitively)
    pub item: Box<str>,

    /// Number of occurences
    pub count: usize,
}
//
impl Ranked {
    /// Build from an item and a count
    pub fn new(item: impl Into<Box<str>>, count: usize) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

/// Items in order of decreasing popularity
pub type Ranking = Vec<Ranked>;

/// Occurence counts of a set of items
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    /// How items are turned into counting keys
    case: Case,

    /// Tally of each distinct key
    tallies: HashMap<Box<str>, Tally>,

    /// Number of items that were added so far
    total: usize,
}
//
impl FrequencyTable {
    /// Set up an empty table
    pub fn new(case: Case) -> Self {
        Self {
            case,
            tallies: HashMap::new(),
            total: 0,
        }
    }

    /// Record one occurence of an item
    pub fn add(&mut self, item: &str) {
        match self.tallies.entry(self.case.key(item)) {
            hash_map::Entry::Occupied(o) => {
                let tally = o.into_mut();
                tally.count = tally
                    .count
                    .checked_add(1)
                    .expect("overflow while counting occurences");
            }
            hash_map::Entry::Vacant(v) => {
                v.insert(Tally {
                    count: NonZeroUsize::MIN,
                    first_seen: self.total,
                });
            }
        }
        self.total += 1;
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    /// Truth that no item was added
    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Number of items added, including repetitions
    pub fn total(&self) -> usize {
        self.total
    }

    /// Pick the `k` most frequent items, most frequent first
    ///
    /// Items with equal counts are ordered by first occurence.
    pub fn top(&self, k: TopK) -> Ranking {
        let max_len = k.get();
        if max_len == 0 || self.is_empty() {
            return Ranking::new();
        }

        // Determine the top items using a bounded min-heap...
        let mut heap = BinaryHeap::with_capacity(max_len.min(self.len()) + 1);
        for (item, tally) in &self.tallies {
            heap.push(Reverse((tally.rank(), &**item)));
            if heap.len() > max_len {
                heap.pop();
            }
        }

        // ...then collect them in order of decreasing popularity, which
        // requires an order reversal since we used a min-heap.
        let mut result = VecDeque::with_capacity(heap.len());
        while let Some(Reverse((rank, item))) = heap.pop() {
            let (count, _first_seen) = rank;
            result.push_front(Ranked::new(item, count.get()));
        }
        result.into()
    }

    /// All items in order of decreasing popularity
    pub fn ranked(&self) -> Ranking {
        let mut ranked = self.tallies.iter().collect::<Vec<_>>();
        ranked.sort_unstable_by_key(|(_item, tally)| Reverse(tally.rank()));
        ranked
            .into_iter()
            .map(|(item, tally)| Ranked::new(&**item, tally.count.get()))
            .collect()
    }
}
//
impl<S: AsRef<str>> Extend<S> for FrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, items: I) {
        for item in items {
            self.add(item.as_ref());
        }
    }
}

/// What we know about one distinct item
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct Tally {
    /// Number of occurences
    count: NonZeroUsize,

    /// Position of the first occurence in the input sequence
    first_seen: usize,
}
//
impl Tally {
    /// Popularity ordering key, more popular items compare greater
    fn rank(&self) -> (NonZeroUsize, Reverse<usize>) {
        (self.count, Reverse(self.first_seen))
    }
}

/// Count items and pick the `k` most frequent ones
///
/// Ties are broken by order of first occurence in `items`, not
/// alphabetically.
pub fn top_k<S: AsRef<str>>(items: impl IntoIterator<Item = S>, k: TopK, case: Case) -> Ranking {
    let mut table = FrequencyTable::new(case);
    table.extend(items);
    table.top(k)
}
