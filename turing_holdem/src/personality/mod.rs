//! Playing styles expressed as starting-hand ranges.
//!
//! A [`Personality`] buckets a starting hand into strong, middle or
//! speculative, biases raw strength estimates, and maps strength onto an
//! [`Action`](crate::game::entities::Action) through a fixed threshold table.

pub mod errors;
pub mod models;
pub mod range;

pub use errors::RangeError;
pub use models::{
    ALL_IN_THRESHOLD, Bucket, CALL_THRESHOLD, CHECK_THRESHOLD, Personality, RAISE_THRESHOLD,
    random_name,
};
pub use range::Range;
