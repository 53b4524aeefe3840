//! Ordinal inscription envelope encoding and decoding.
//!
//! This crate provides functionality for creating and parsing the envelope
//! scripts that carry inscription content inside `OP_FALSE OP_IF ... OP_ENDIF`
//! blocks.
//!
//! # Envelope Structure
//!
//! ```text
//! OP_FALSE OP_IF
//!   "ord"
//!   <0x01> <content_type>
//!   OP_0
//!   <body_chunk_0> ... <body_chunk_n>
//! OP_ENDIF
//! ```
//!
//! Bodies larger than 520 bytes are automatically chunked to comply with
//! Bitcoin's script element size limit.
//!
//! # Examples
//!
//! ```
//! use ordkit_envelope_fmt::{InscriptionContent, build_envelope_script};
//!
//! let content = InscriptionContent::text("text/plain", "hello world").unwrap();
//! let envelope = build_envelope_script(&content).unwrap();
//! assert_eq!(envelope.decode().unwrap(), content);
//! ```
//!
//! Using an encoder with a custom body limit:
//! ```
//! use ordkit_envelope_fmt::{EnvelopeEncoder, InscriptionContent};
//!
//! let encoder = EnvelopeEncoder::new(4);
//! let content = InscriptionContent::new("image/png", vec![0; 8]).unwrap();
//! assert!(encoder.encode(&content).is_err());
//! ```

/// Envelope builder utilities.
pub mod builder;

/// Error types for envelope operations.
pub mod errors;

/// Envelope parser utilities.
pub mod parser;

mod content;
mod script;

pub use builder::{
    DEFAULT_MAX_CONTENT_LEN, EnvelopeEncoder, MAX_ENVELOPE_LEN, build_envelope_script,
};
pub use content::InscriptionContent;
pub use errors::{EnvelopeBuildError, EnvelopeParseError};
pub use parser::parse_envelope;
pub use script::EnvelopeScript;
