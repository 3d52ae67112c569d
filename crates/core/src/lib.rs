//! The core public types of the Meridian ledger.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod address;
pub mod chain;
pub mod pagination;
pub mod string_encoding;
pub mod token;
