use async_trait::async_trait;
use uuid::Uuid;

use crate::context::{Language, PaymentMethod, SalesChannel};
use crate::{CoreError, CoreResult};

fn not_found(entity: &'static str, id: Uuid) -> CoreError {
    CoreError::NotFound { entity, id: id.to_string() }
}

/// Read access to the platform's payment method entities
#[async_trait]
pub trait PaymentMethodRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> CoreResult<Option<PaymentMethod>>;

    async fn require(&self, id: Uuid) -> CoreResult<PaymentMethod> {
        self.get(id).await?.ok_or_else(|| not_found("Payment method", id))
    }
}

/// Read access to languages, with their locale association loaded
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> CoreResult<Option<Language>>;

    async fn require(&self, id: Uuid) -> CoreResult<Language> {
        self.get(id).await?.ok_or_else(|| not_found("Language", id))
    }
}

#[async_trait]
pub trait SalesChannelRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> CoreResult<Option<SalesChannel>>;

    async fn require(&self, id: Uuid) -> CoreResult<SalesChannel> {
        self.get(id).await?.ok_or_else(|| not_found("Sales channel", id))
    }
}
