//! Parent to children adjacency over a loaded dataset.

use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::message::{Message, MessageId};

/// Direct children of every message that has at least one, in input order.
///
/// Built once from a [`Dataset`] and borrowed from it; never mutated after
/// construction. Messages whose parent was not loaded appear in no list.
#[derive(Debug, Default)]
pub struct ChildIndex<'a> {
    children: HashMap<&'a MessageId, Vec<&'a Message>>,
}

impl<'a> ChildIndex<'a> {
    pub fn build(dataset: &'a Dataset) -> Self {
        let mut children: HashMap<&'a MessageId, Vec<&'a Message>> = HashMap::new();
        for message in dataset.messages() {
            if let Some(pid) = dataset.resolved_parent(message) {
                children.entry(pid).or_default().push(message);
            }
        }
        Self { children }
    }

    /// Children of `id` in input order; empty when it has none.
    pub fn children_of(&self, id: &MessageId) -> &[&'a Message] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of messages that have at least one child.
    pub fn parents(&self) -> usize {
        self.children.len()
    }
}

/// Counts messages without a resolvable parent.
pub fn count_roots(dataset: &Dataset) -> usize {
    dataset
        .messages()
        .filter(|message| dataset.resolved_parent(message).is_none())
        .count()
}
