//! A 256-ary trie over raw key bytes, one per shard until the final merge.
//!
//! A key is found by descending one edge per byte; the node reached after the
//! last byte owns the key's [`Entry`]. Nothing is hashed and no key is copied
//! unless it is seen for the first time.

use crate::decimal::MiniDec;
use crate::tally::Tally;

type Children = [Option<Box<Node>>; 256];

/// A key, materialized once when its node is first recorded at, and its tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Box<[u8]>,
    pub tally: Tally,
}

#[derive(Debug, Default)]
pub struct Node {
    // allocated on first descent, leaves never pay for the table
    children: Option<Box<Children>>,
    entry: Option<Entry>,
}

impl Node {
    /// Returns the child along `byte`, creating it if absent.
    #[inline(always)]
    pub fn descend(&mut self, byte: u8) -> &mut Node {
        let children = self
            .children
            .get_or_insert_with(|| Box::new(std::array::from_fn(|_| None)));
        children[usize::from(byte)].get_or_insert_with(Box::default)
    }

    /// Adds `val` to the tally at this node. `key` is copied only when the
    /// node has no entry yet; returns `true` in that case.
    #[inline(always)]
    pub fn record_at(&mut self, key: &[u8], val: MiniDec) -> bool {
        match &mut self.entry {
            Some(entry) => {
                entry.tally.add(val);
                false
            }
            None => {
                self.entry = Some(Entry {
                    key: key.into(),
                    tally: Tally::new(val),
                });
                true
            }
        }
    }

    /// Folds `other` into `self`, returning how many keys were present in both.
    fn merge(&mut self, other: Node) -> usize {
        let mut shared = 0;
        if let Some(theirs) = other.entry {
            match &mut self.entry {
                Some(mine) => {
                    mine.tally.merge(theirs.tally);
                    shared += 1;
                }
                None => self.entry = Some(theirs),
            }
        }

        let Some(their_children) = other.children else {
            return shared;
        };
        match &mut self.children {
            None => self.children = Some(their_children),
            Some(my_children) => {
                let their_children: Children = *their_children;
                for (mine, theirs) in my_children.iter_mut().zip(their_children) {
                    let Some(theirs) = theirs else { continue };
                    match mine {
                        Some(mine) => shared += mine.merge(*theirs),
                        None => *mine = Some(theirs),
                    }
                }
            }
        }
        shared
    }

    fn flatten_into(self, out: &mut Vec<Entry>) {
        if let Some(entry) = self.entry {
            out.push(entry);
        }
        if let Some(children) = self.children {
            let children: Children = *children;
            for child in children.into_iter().flatten() {
                child.flatten_into(out);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    len: usize,
}

impl Trie {
    pub fn new() -> Trie {
        Trie::default()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walks `key` from the root and records `val` at the last node.
    pub fn insert(&mut self, key: &[u8], val: MiniDec) {
        let created = self.descend_path(key).record_at(key, val);
        self.commit(usize::from(created));
    }

    /// Merges a whole tally in under `key`, as if every value behind it had
    /// been inserted here.
    pub fn insert_tally(&mut self, key: &[u8], tally: Tally) {
        let node = self.descend_path(key);
        match &mut node.entry {
            Some(entry) => entry.tally.merge(tally),
            None => {
                node.entry = Some(Entry {
                    key: key.into(),
                    tally,
                });
                self.len += 1;
            }
        }
    }

    fn descend_path(&mut self, key: &[u8]) -> &mut Node {
        let mut node = &mut self.root;
        for &b in key {
            node = node.descend(b);
        }
        node
    }

    pub fn get(&self, key: &[u8]) -> Option<&Tally> {
        let mut node = &self.root;
        for &b in key {
            node = node.children.as_ref()?[usize::from(b)].as_deref()?;
        }
        node.entry.as_ref().map(|e| &e.tally)
    }

    /// Gives the scanner a cursor at the root. Every entry created below it
    /// must be reported back through [`Trie::commit`].
    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    #[inline(always)]
    pub(crate) fn commit(&mut self, created: usize) {
        self.len += created;
    }

    /// Consumes both tries. Subtrees missing on one side are moved over whole.
    #[must_use]
    pub fn merge(mut self, other: Trie) -> Trie {
        let shared = self.root.merge(other.root);
        self.len = self.len + other.len - shared;
        self
    }

    /// Depth-first, lowest edge first, which is byte-wise key order.
    pub fn flatten(self) -> Vec<Entry> {
        let mut out = Vec::with_capacity(self.len);
        self.root.flatten_into(&mut out);
        out
    }
}
