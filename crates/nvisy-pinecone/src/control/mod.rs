//! Control plane operations on [`PineconeClient`].
//!
//! [`PineconeClient`]: crate::PineconeClient

mod indexes;
mod inference;
