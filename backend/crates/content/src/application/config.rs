//! Content application configuration

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Deadline for each content store call
    pub store_timeout: Duration,
    /// Longest accepted comment, in characters
    pub max_comment_len: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            max_comment_len: 2000,
        }
    }
}
