//! Label filtering and context expansion.
//!
//! Each matching message is kept together with its parent and one
//! representative reply, so an excerpt still reads as a conversation.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::debug;

use crate::dataset::{Dataset, Record};
use crate::message::{Message, MessageId, Role};
use crate::tree::ChildIndex;

/// Rank assumed for messages without an integer rank.
pub const MISSING_RANK: i64 = 999;

/// Which messages count as direct matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub language: String,
    pub label: String,
    /// Inclusive lower bound on the label value.
    pub threshold: f64,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            label: "humor".to_string(),
            threshold: 0.75,
        }
    }
}

impl Filter {
    pub fn matches(&self, message: &Message) -> bool {
        message.lang.as_deref() == Some(self.language.as_str())
            && message
                .labels
                .value(&self.label)
                .is_some_and(|value| value >= self.threshold)
    }
}

/// Sibling preference key. Larger is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SiblingScore {
    pub reviewed: bool,
    pub review_count: u64,
    pub rank: Reverse<i64>,
}

pub fn score(message: &Message) -> SiblingScore {
    SiblingScore {
        reviewed: message.review_result,
        review_count: message.review_count.unwrap_or(0),
        rank: Reverse(message.rank.unwrap_or(MISSING_RANK)),
    }
}

/// Picks the preferred continuation among `children`.
///
/// With `want_role` set, only children of that role are considered, unless
/// none of them has it, in which case the whole pool is used. Ties keep the
/// earliest child.
pub fn best_child<'a>(children: &[&'a Message], want_role: Option<&Role>) -> Option<&'a Message> {
    let preferred = want_role.filter(|role| children.iter().any(|m| m.has_role(role)));

    children
        .iter()
        .copied()
        .filter(|m| preferred.is_none_or(|role| m.has_role(role)))
        .reduce(|best, m| if score(m) > score(best) { m } else { best })
}

/// Outcome of running the filter over a dataset.
#[derive(Debug, Default)]
pub struct Selection<'a> {
    matched: usize,
    retained: HashSet<&'a MessageId>,
}

impl<'a> Selection<'a> {
    /// Number of direct matches.
    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.retained.contains(id)
    }

    /// Number of distinct ids to keep.
    pub fn retained_ids(&self) -> usize {
        self.retained.len()
    }

    /// Retained records in dataset order. Duplicate ids are all emitted.
    pub fn records<'d>(&'d self, dataset: &'d Dataset) -> impl Iterator<Item = &'d Record> + 'd {
        dataset
            .records()
            .iter()
            .filter(move |record| record.id().is_some_and(|id| self.contains(id)))
    }

    fn include(&mut self, id: &'a MessageId) {
        self.retained.insert(id);
    }
}

/// Runs the filter over every message and expands each match by one hop in
/// each direction.
pub fn select<'a>(dataset: &'a Dataset, children: &ChildIndex<'a>, filter: &Filter) -> Selection<'a> {
    let mut selection = Selection::default();

    for message in dataset.messages().filter(|m| filter.matches(m)) {
        selection.matched += 1;

        let Some(id) = message.id() else {
            // Without an id there is nothing to target or look children up by.
            if let Some(pid) = dataset.resolved_parent(message) {
                selection.include(pid);
            }
            continue;
        };
        selection.include(id);

        if let Some(pid) = dataset.resolved_parent(message) {
            selection.include(pid);
        }

        let opposite = message.role.as_ref().and_then(Role::opposite);
        let Some(next) = best_child(children.children_of(id), opposite.as_ref()) else {
            continue;
        };
        if let Some(next_id) = next.id() {
            selection.include(next_id);
        }

        // Trust the child's own parent link rather than assuming it is `id`.
        if filter.matches(next) {
            if let Some(pid) = dataset.resolved_parent(next) {
                selection.include(pid);
            }
        }
    }

    debug!(
        matched = selection.matched,
        retained = selection.retained.len(),
        "selection complete"
    );
    selection
}
