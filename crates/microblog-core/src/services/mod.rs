//! Application services - the use cases the web layer calls into.

mod accounts;
mod social;
mod timeline;

#[cfg(test)]
mod test_support;

pub use accounts::AccountService;
pub use social::{FollowOutcome, FollowStats, SocialGraph, UnfollowOutcome};
pub use timeline::Timeline;
