//! MNID identity resolution
//!
//! Resolves a network-qualified decentralized identifier (MNID) into its
//! identity document: decode the MNID, look up the network's registry
//! contract, read the content digest via `eth_call`, translate it into a
//! content address, and fetch the profile JSON from a content-addressed
//! gateway.
//!
//! ```no_run
//! # async fn example() -> mnid_resolver::ResolverResult<()> {
//! let resolver = mnid_resolver::Resolver::new(Default::default())?;
//! let doc = resolver
//!     .resolve_identity("2nQtiQG6Cgm1GYTBaaKAgr76uY7iSexUkqX")
//!     .await?;
//! println!("{:?}", doc.name);
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod document;
pub mod error;
pub mod mnid;
pub mod multihash;
pub mod networks;
pub mod registry;
pub mod transport;

pub use document::{DocumentFetcher, IdentityDocument};
pub use error::{ResolverError, ResolverResult};
pub use mnid::Account;
pub use networks::{NetworkConfig, NetworkDirectory};
pub use registry::RegistryResolver;
pub use transport::{HttpTransport, Transport};

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default registration tag the registry is keyed under
pub const DEFAULT_REGISTRATION_TAG: &str = "uPortProfileIPFS1220";

/// Default content-addressed gateway
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.infura.io/ipfs/";

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// User-Agent header for HTTP requests
    pub user_agent: String,
    /// Per-request timeout at the transport boundary
    pub timeout: Duration,
    /// Base URL of the content-addressed gateway
    pub gateway_url: String,
    /// Registration tag used for registry lookups
    pub registration_tag: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            user_agent: "mnid-resolver/0.1".to_string(),
            timeout: Duration::from_secs(10),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            registration_tag: DEFAULT_REGISTRATION_TAG.to_string(),
        }
    }
}

/// End-to-end identity resolver
///
/// Holds no mutable state; cloning is cheap and concurrent resolutions need
/// no coordination. Each call runs the pipeline once, no retries, and the
/// returned future completes exactly once with a document or an error.
#[derive(Clone)]
pub struct Resolver {
    registry: RegistryResolver,
    fetcher: DocumentFetcher,
    registration_tag: String,
}

impl Resolver {
    /// Create a resolver over the built-in network directory and an HTTP
    /// transport
    pub fn new(config: ResolverConfig) -> ResolverResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config.user_agent, config.timeout)?);
        Ok(Self::with_transport(
            NetworkDirectory::default(),
            transport,
            config,
        ))
    }

    /// Create a resolver with an explicit directory and transport
    ///
    /// This is the seam tests use to stub the wire and supply custom
    /// network tables.
    pub fn with_transport(
        directory: NetworkDirectory,
        transport: Arc<dyn Transport>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            registry: RegistryResolver::new(directory, Arc::clone(&transport)),
            fetcher: DocumentFetcher::new(transport, config.gateway_url),
            registration_tag: config.registration_tag,
        }
    }

    /// Read the raw registry digest for a subject, optionally attested by a
    /// different issuer
    pub async fn resolve_digest(
        &self,
        subject_id: &str,
        issuer_id: Option<&str>,
    ) -> ResolverResult<String> {
        self.registry
            .resolve(subject_id, issuer_id, &self.registration_tag)
            .await
    }

    /// Resolve an MNID all the way to its identity document
    ///
    /// Short-circuits on the first failing stage and propagates that stage's
    /// error kind unchanged.
    pub async fn resolve_identity(&self, mnid: &str) -> ResolverResult<IdentityDocument> {
        let result = self.resolve_identity_inner(mnid).await;
        if let Err(e) = &result {
            warn!(mnid, error = %e, "identity resolution failed");
        }
        result
    }

    async fn resolve_identity_inner(&self, mnid: &str) -> ResolverResult<IdentityDocument> {
        let digest = self
            .registry
            .resolve(mnid, None, &self.registration_tag)
            .await?;

        let content_address = multihash::to_content_address(&digest)?;
        debug!(mnid, content_address = %content_address, "registry digest translated");

        self.fetcher.fetch_document(&content_address).await
    }
}
