/// Identity document fetching and decoding
///
/// The registry digest points at a JSON profile stored in content-addressed
/// storage. The fetcher builds the gateway URL from the content address,
/// performs the GET, and decodes the body into [`IdentityDocument`].
use crate::{
    error::{ResolverError, ResolverResult},
    transport::Transport,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Schema.org-style identity profile
///
/// Known fields are typed; anything else the document carries lands in
/// `extra` so decoding stays forward-compatible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocument {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<serde_json::Value>,

    /// Signing key registered for this identity
    #[serde(rename = "publicKey", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Encryption key registered for this identity
    #[serde(rename = "publicEncKey", skip_serializing_if = "Option::is_none")]
    pub public_enc_key: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Fetches identity documents through a content-addressed gateway
#[derive(Clone)]
pub struct DocumentFetcher {
    transport: Arc<dyn Transport>,
    gateway_base: String,
}

impl DocumentFetcher {
    /// Create a fetcher against a gateway base URL such as
    /// `https://ipfs.infura.io/ipfs/`
    pub fn new(transport: Arc<dyn Transport>, gateway_base: impl Into<String>) -> Self {
        Self {
            transport,
            gateway_base: gateway_base.into(),
        }
    }

    /// URL the given content address will be fetched from
    pub fn document_url(&self, content_address: &str) -> String {
        if self.gateway_base.ends_with('/') {
            format!("{}{}", self.gateway_base, content_address)
        } else {
            format!("{}/{}", self.gateway_base, content_address)
        }
    }

    /// Fetch and decode the document behind a content address
    pub async fn fetch_document(&self, content_address: &str) -> ResolverResult<IdentityDocument> {
        let url = self.document_url(content_address);
        debug!(url = %url, "fetching identity document");

        let body = self.transport.get(&url).await?;

        serde_json::from_str(&body).map_err(|e| {
            ResolverError::Decode(format!(
                "document at {} does not match the profile schema: {}",
                content_address, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Serves a canned body for every GET and records the URL
    struct CannedGateway {
        body: String,
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl CannedGateway {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for CannedGateway {
        async fn post_json(
            &self,
            url: &str,
            _body: &serde_json::Value,
        ) -> ResolverResult<String> {
            panic!("unexpected POST {}", url);
        }

        async fn get(&self, url: &str) -> ResolverResult<String> {
            self.seen.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn decodes_profile_fields() {
        let gateway = Arc::new(CannedGateway::new(
            r#"{"@context":"http://schema.org","@type":"Person","name":"Alice","publicKey":"0x04aa"}"#,
        ));
        let fetcher = DocumentFetcher::new(gateway.clone(), "https://ipfs.infura.io/ipfs/");

        let doc = fetcher
            .fetch_document("QmNLei78zWmzUdbeRB3CiUfAizWUrbeeZh5K1rhAQKCh51")
            .await
            .unwrap();

        assert_eq!(doc.context.as_deref(), Some("http://schema.org"));
        assert_eq!(doc.doc_type.as_deref(), Some("Person"));
        assert_eq!(doc.name.as_deref(), Some("Alice"));
        assert_eq!(doc.public_key.as_deref(), Some("0x04aa"));
        assert!(doc.extra.is_empty());

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            ["https://ipfs.infura.io/ipfs/QmNLei78zWmzUdbeRB3CiUfAizWUrbeeZh5K1rhAQKCh51"]
        );
    }

    #[tokio::test]
    async fn unknown_fields_land_in_extra() {
        let gateway = Arc::new(CannedGateway::new(
            r#"{"name":"Bob","twitter":"@bob","followers":12}"#,
        ));
        let fetcher = DocumentFetcher::new(gateway, "https://ipfs.infura.io/ipfs");

        let doc = fetcher.fetch_document("QmTest").await.unwrap();
        assert_eq!(doc.name.as_deref(), Some("Bob"));
        assert_eq!(
            doc.extra.get("twitter"),
            Some(&serde_json::Value::String("@bob".to_string()))
        );
        assert_eq!(doc.extra.get("followers"), Some(&serde_json::json!(12)));
    }

    #[tokio::test]
    async fn gateway_base_without_trailing_slash_still_joins() {
        let fetcher = DocumentFetcher::new(
            Arc::new(CannedGateway::new("{}")),
            "https://ipfs.infura.io/ipfs",
        );
        assert_eq!(
            fetcher.document_url("QmTest"),
            "https://ipfs.infura.io/ipfs/QmTest"
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let fetcher = DocumentFetcher::new(
            Arc::new(CannedGateway::new("<html>not found</html>")),
            "https://ipfs.infura.io/ipfs/",
        );
        let result = fetcher.fetch_document("QmTest").await;
        assert!(matches!(result, Err(ResolverError::Decode(_))));
    }

    #[tokio::test]
    async fn non_object_json_is_a_decode_error() {
        let fetcher = DocumentFetcher::new(
            Arc::new(CannedGateway::new(r#"["not","an","object"]"#)),
            "https://ipfs.infura.io/ipfs/",
        );
        let result = fetcher.fetch_document("QmTest").await;
        assert!(matches!(result, Err(ResolverError::Decode(_))));
    }
}
