//! Document model
//!
//!     A [`Document`] exclusively owns its [`DateBlock`]s in first-introduction order,
//!     and each date block exclusively owns its [`Message`]s. No two blocks share a
//!     date and no block is ever empty.
//!
//!     Messages are addressed from outside through a [`MessageAddress`], either a
//!     (date, position) pair or the first match of a [`Query`]. Addresses are resolved
//!     at the time of use, since deletions shift positions.

pub mod address;
pub mod elements;
pub mod query;

pub use address::{MessageAddress, MessageEdit};
pub use elements::{DateBlock, Document, Message};
pub use query::{Located, Query};
