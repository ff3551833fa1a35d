pub mod formatter;

pub use formatter::{DISCLOSURE_MARKER, ReplyFormatter};
