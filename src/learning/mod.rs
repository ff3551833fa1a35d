//! Community style learning.
//!
//! Every comment seen on the stream is offered to [`StyleMemory`], which keeps
//! a rolling window of recent bodies plus counts for a closed catalogue of
//! slang tokens. The resulting style context is appended to the system prompt
//! so replies drift toward the tone of the subreddits being watched.

pub mod catalogue;
pub mod state;
pub mod store;
pub mod style_memory;

pub use catalogue::{CATALOGUE, count_catalogue_matches};
pub use state::{BASELINE_TERMS, StyleMemoryState, TermCounts};
pub use store::{JsonFileStore, MemoryStyleStore, StyleStore};
pub use style_memory::StyleMemory;
