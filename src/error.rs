/// Unified error types for MNID identity resolution
use thiserror::Error;

/// Main error type for the resolver
///
/// Each pipeline stage fails with its own variant; no stage downgrades or
/// swallows a failure from a lower stage, so callers can branch on the
/// originating cause.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Malformed MNID (bad length, encoding, or checksum)
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// Issuer and subject decode to different networks
    #[error("Network mismatch: issuer on {issuer}, subject on {subject}")]
    NetworkMismatch { issuer: String, subject: String },

    /// No directory entry for the network id
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Request-level failure at either HTTP stage
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC response missing the result field or wrong-typed
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    /// Registry holds no entry for the subject (empty or all-zero digest)
    #[error("No registry entry for {0}")]
    NotRegistered(String),

    /// Digest could not be translated into a content address
    #[error("Content-hash translation error: {0}")]
    Translate(String),

    /// Document body is not valid JSON or does not match the schema
    #[error("Document decode error: {0}")]
    Decode(String),
}

/// Result type alias for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;
