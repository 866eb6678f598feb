/// Registry resolver
///
/// Orchestrates the codec, directory, and ABI encoder to read the content
/// digest for an (tag, issuer, subject) triple out of the on-chain registry.
use crate::{
    abi,
    error::{ResolverError, ResolverResult},
    mnid,
    networks::NetworkDirectory,
    transport::Transport,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Reads content digests from the on-chain registry
#[derive(Clone)]
pub struct RegistryResolver {
    directory: NetworkDirectory,
    transport: Arc<dyn Transport>,
}

impl RegistryResolver {
    /// Create a resolver over the given network directory and transport
    pub fn new(directory: NetworkDirectory, transport: Arc<dyn Transport>) -> Self {
        Self {
            directory,
            transport,
        }
    }

    /// Resolve the registry digest for a subject
    ///
    /// The issuer defaults to the subject for self-attested lookups. Returns
    /// the raw hex digest string from the chain. Each step aborts the
    /// resolution with its own error kind; nothing here retries.
    pub async fn resolve(
        &self,
        subject_id: &str,
        issuer_id: Option<&str>,
        registration_tag: &str,
    ) -> ResolverResult<String> {
        let issuer_id = issuer_id.unwrap_or(subject_id);

        let issuer = mnid::decode(issuer_id)?;
        let subject = mnid::decode(subject_id)?;

        if issuer.network != subject.network {
            return Err(ResolverError::NetworkMismatch {
                issuer: issuer.network,
                subject: subject.network,
            });
        }

        // The registry contract always comes from the subject's network
        let config = self.directory.lookup(&subject.network)?;

        let call_data = abi::encode_registry_get(registration_tag, &issuer, &subject)?;

        let request = json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                {
                    "to": config.registry_address_hex(),
                    "data": format!("0x{}", hex::encode(&call_data)),
                },
                "latest"
            ],
            "id": 1,
        });

        debug!(
            subject = subject_id,
            network = %subject.network,
            registry = %config.registry_address_hex(),
            "querying registry"
        );

        let body = self.transport.post_json(&config.rpc_url, &request).await?;

        let response: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            ResolverError::MalformedResponse(format!(
                "RPC body for {} is not JSON: {}",
                subject_id, e
            ))
        })?;

        if let Some(rpc_error) = response.get("error") {
            return Err(ResolverError::MalformedResponse(format!(
                "RPC error for {}: {}",
                subject_id, rpc_error
            )));
        }

        let result = response
            .get("result")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ResolverError::MalformedResponse(format!(
                    "RPC response for {} has no string result field",
                    subject_id
                ))
            })?;

        if is_unregistered(result) {
            return Err(ResolverError::NotRegistered(subject_id.to_string()));
        }

        Ok(result.to_string())
    }
}

/// An empty or all-zero digest means the registry holds no entry
fn is_unregistered(result: &str) -> bool {
    let digest = result.strip_prefix("0x").unwrap_or(result);
    digest.is_empty() || digest.chars().all(|c| c == '0')
}
