use std::path::PathBuf;

use crate::error::Error;
use crate::select::Filter;

pub const DEFAULT_INPUT: &str = "2023-11-05_oasst2_all.messages.jsonl";
pub const DEFAULT_OUTPUT: &str = "humor_en_with_context.jsonl";

/// Everything a pipeline run needs, resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            filter: Filter::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.filter.threshold.is_finite() {
            return Err(Error::InvalidThreshold(self.filter.threshold));
        }
        Ok(())
    }
}
