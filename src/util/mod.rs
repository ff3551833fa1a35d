mod text;

pub use text::{log_snippet, truncate_with_ellipsis};
