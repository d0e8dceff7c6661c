//! vCard (RFC 6350) codec: data model, streaming decoder and encoder.

pub mod error;
pub mod rfc;
