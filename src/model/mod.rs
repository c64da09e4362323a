mod match_detail;
mod matches;

pub use match_detail::*;
pub use matches::*;
