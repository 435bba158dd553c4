//! Label-filtered excerpts from conversation-tree datasets.
//!
//! Input is a JSONL dump where every line is one message of a conversation
//! forest (`message_id` / `parent_id` links). The pipeline keeps messages in a
//! target language whose rating for a label (by default `humor`) reaches a
//! threshold, and adds just enough context to read each one on its own:
//! - the message's parent, if it was loaded
//! - one preferred reply, favouring the opposite role, reviewed messages,
//!   more reviews and better rank, in that order
//!
//! Output lines are the untouched source lines, in source order.
//!
//! # Example
//!
//! ```
//! use jocose_core::{ChildIndex, Dataset, Filter, select};
//!
//! let input = concat!(
//!     r#"{"message_id": "q", "role": "prompter", "lang": "en"}"#, "\n",
//!     r#"{"message_id": "a", "parent_id": "q", "role": "assistant", "lang": "en","#,
//!     r#" "labels": {"humor": {"value": 0.9}}}"#, "\n",
//! );
//!
//! let dataset = Dataset::from_reader(input.as_bytes()).unwrap();
//! let children = ChildIndex::build(&dataset);
//! let selection = select(&dataset, &children, &Filter::default());
//!
//! assert_eq!(selection.matched(), 1);
//! assert_eq!(selection.records(&dataset).count(), 2);
//! ```

mod config;
mod dataset;
mod error;
mod message;
pub mod output;
pub mod pipeline;
mod select;
mod tree;

pub use config::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use dataset::{Dataset, Record};
pub use error::Error;
pub use message::{Label, Labels, Message, MessageId, Role};
pub use pipeline::Summary;
pub use select::{Filter, MISSING_RANK, Selection, SiblingScore, best_child, score, select};
pub use tree::{ChildIndex, count_roots};
