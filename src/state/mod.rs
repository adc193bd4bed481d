//! Interview session state
//!
//! Holds what one interview has collected so far:
//! - validated answers in traversal order
//! - the deduplicated flag set
//! - the flag trail recording which question and trigger raised each flag

mod session;

pub use session::{FlagEvent, FlagSource, Session};
