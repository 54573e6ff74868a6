use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use msp_core::{
    CoreResult, Language, LanguageRepository, PaymentMethod, PaymentMethodRepository, SalesChannel,
    SalesChannelRepository,
};

use crate::app_config::SalesChannelConfig;

/// Entity store kept in memory, seeded from configuration
pub struct InMemoryRepository<T> {
    entities: RwLock<HashMap<Uuid, T>>,
}

impl<T: Clone> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self { entities: RwLock::new(HashMap::new()) }
    }

    pub async fn insert(&self, id: Uuid, entity: T) {
        self.entities.write().await.insert(id, entity);
    }

    async fn find(&self, id: Uuid) -> Option<T> {
        self.entities.read().await.get(&id).cloned()
    }
}

impl<T: Clone> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository<PaymentMethod> {
    pub fn with_payment_methods(methods: Vec<PaymentMethod>) -> Self {
        let entities = methods.into_iter().map(|m| (m.id, m)).collect();
        Self { entities: RwLock::new(entities) }
    }
}

impl InMemoryRepository<Language> {
    pub fn with_languages(languages: Vec<Language>) -> Self {
        let entities = languages.into_iter().map(|l| (l.id, l)).collect();
        Self { entities: RwLock::new(entities) }
    }
}

impl InMemoryRepository<SalesChannel> {
    pub fn with_sales_channels(channels: &[SalesChannelConfig]) -> Self {
        let entities = channels
            .iter()
            .map(|c| {
                (
                    c.id,
                    SalesChannel {
                        id: c.id,
                        name: c.name.clone(),
                        language_id: c.language_id,
                        currency_iso: c.currency_iso.clone(),
                    },
                )
            })
            .collect();
        Self { entities: RwLock::new(entities) }
    }
}

#[async_trait]
impl PaymentMethodRepository for InMemoryRepository<PaymentMethod> {
    async fn get(&self, id: Uuid) -> CoreResult<Option<PaymentMethod>> {
        Ok(self.find(id).await)
    }
}

#[async_trait]
impl LanguageRepository for InMemoryRepository<Language> {
    async fn get(&self, id: Uuid) -> CoreResult<Option<Language>> {
        Ok(self.find(id).await)
    }
}

#[async_trait]
impl SalesChannelRepository for InMemoryRepository<SalesChannel> {
    async fn get(&self, id: Uuid) -> CoreResult<Option<SalesChannel>> {
        Ok(self.find(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msp_core::Locale;
    use serde_json::Map;

    #[tokio::test]
    async fn test_payment_method_lookup() {
        let id = Uuid::new_v4();
        let repo = InMemoryRepository::with_payment_methods(vec![PaymentMethod {
            id,
            name: "Visa".to_string(),
            handler_identifier: "multisafepay.handler.visa".to_string(),
            active: true,
            custom_fields: Map::new(),
        }]);

        let found = PaymentMethodRepository::get(&repo, id).await.unwrap();
        assert_eq!(found.unwrap().name, "Visa");
        assert!(PaymentMethodRepository::get(&repo, Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_language() {
        let repo: InMemoryRepository<Language> = InMemoryRepository::new();
        let id = Uuid::new_v4();
        repo.insert(id, Language {
            id,
            name: "English".to_string(),
            locale: Locale { id: Uuid::new_v4(), code: "en-GB".to_string() },
        })
        .await;

        let language = LanguageRepository::get(&repo, id).await.unwrap().unwrap();
        assert_eq!(language.short_locale(), "en");
    }

    #[tokio::test]
    async fn test_require_missing_sales_channel() {
        let repo: InMemoryRepository<SalesChannel> = InMemoryRepository::new();
        let id = Uuid::new_v4();

        match SalesChannelRepository::require(&repo, id).await {
            Err(msp_core::CoreError::NotFound { entity, id: missing }) => {
                assert_eq!(entity, "Sales channel");
                assert_eq!(missing, id.to_string());
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.name)),
        }
    }
}
