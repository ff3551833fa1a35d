pub mod guard;
pub mod rate_limit;

pub use guard::{
    AutomatedAuthorHeuristic, BotNameHeuristic, ContentGuard, GuardVerdict, RejectReason,
};
pub use rate_limit::ReplyRateLimiter;
