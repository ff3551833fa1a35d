pub mod reddit;
pub mod runtime;
pub mod traits;

pub use reddit::RedditChannel;
pub use runtime::spawn_listener;
pub use traits::{Channel, Comment, ReplySink};
