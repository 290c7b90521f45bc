//! Collaborator seam traits
//!
//! The conversation core is pure computation; everything with a network or
//! disk behind it sits on the other side of these traits. The orchestrator
//! wires real implementations (Directus collections, OpenAI) at startup.

use async_trait::async_trait;

use crate::error::Result;
use crate::property::{Property, PropertyFilter};

/// Free-form reply generation request
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// System prompt: persona and stage guidance
    pub system: String,
    /// User prompt: rendered conversation history plus the latest message
    pub user: String,
}

impl ReplyRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Text-completion collaborator used for free-form chat replies
#[async_trait]
pub trait ReplyModel: Send + Sync {
    /// Generate a reply for the given prompt pair
    async fn complete(&self, request: ReplyRequest) -> Result<String>;
}

/// Read side of the external property collection
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Return listings matching the declarative filter
    async fn search(&self, filter: &PropertyFilter) -> Result<Vec<Property>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct FixedReply(&'static str);

    #[async_trait]
    impl ReplyModel for FixedReply {
        async fn complete(&self, _request: ReplyRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl PropertyStore for EmptyStore {
        async fn search(&self, _filter: &PropertyFilter) -> Result<Vec<Property>> {
            Err(Error::store("collection offline"))
        }
    }

    #[tokio::test]
    async fn test_reply_model_object_safety() {
        let model: Box<dyn ReplyModel> = Box::new(FixedReply("Olá!"));
        let reply = model
            .complete(ReplyRequest::new("persona", "Cliente: oi"))
            .await
            .unwrap();
        assert_eq!(reply, "Olá!");
    }

    #[tokio::test]
    async fn test_store_errors_surface() {
        let store: Box<dyn PropertyStore> = Box::new(EmptyStore);
        let err = store.search(&PropertyFilter::for_sale()).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }
}
