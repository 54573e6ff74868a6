use serde::{Deserialize, Serialize};

/// Optional behaviour a payment method can declare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Embedded (non-redirect) payment form rendered on the checkout page.
    PaymentComponent,
    /// Card details may be stored and reused for later payments.
    Tokenization,
}

const CARD_CAPABILITIES: &[Capability] = &[Capability::PaymentComponent, Capability::Tokenization];
const NO_CAPABILITIES: &[Capability] = &[];

/// Every payment method this integration can register with the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gateway {
    MultiSafepay,
    AfterPay,
    Ideal,
    Mastercard,
    Visa,
    AmericanExpress,
    CreditCard,
    Maestro,
    Bancontact,
    PayPal,
    Klarna,
    Generic,
    Generic2,
    Generic3,
}

impl Gateway {
    pub const ALL: [Gateway; 14] = [
        Gateway::MultiSafepay,
        Gateway::AfterPay,
        Gateway::Ideal,
        Gateway::Mastercard,
        Gateway::Visa,
        Gateway::AmericanExpress,
        Gateway::CreditCard,
        Gateway::Maestro,
        Gateway::Bancontact,
        Gateway::PayPal,
        Gateway::Klarna,
        Gateway::Generic,
        Gateway::Generic2,
        Gateway::Generic3,
    ];

    /// Display name shown in the platform's payment method list.
    pub fn name(&self) -> &'static str {
        match self {
            Gateway::MultiSafepay => "MultiSafepay",
            Gateway::AfterPay => "AfterPay",
            Gateway::Ideal => "iDEAL",
            Gateway::Mastercard => "Mastercard",
            Gateway::Visa => "Visa",
            Gateway::AmericanExpress => "American Express",
            Gateway::CreditCard => "Credit card",
            Gateway::Maestro => "Maestro",
            Gateway::Bancontact => "Bancontact",
            Gateway::PayPal => "PayPal",
            Gateway::Klarna => "Klarna - Pay in 30 days",
            Gateway::Generic => "Generic gateway",
            Gateway::Generic2 => "Generic gateway 2",
            Gateway::Generic3 => "Generic gateway 3",
        }
    }

    /// Gateway code understood by the MultiSafepay API. The MultiSafepay
    /// payment page has no code: an empty gateway lets the customer pick.
    pub fn gateway_code(&self) -> &'static str {
        match self {
            Gateway::MultiSafepay => "",
            Gateway::AfterPay => "AFTERPAY",
            Gateway::Ideal => "IDEAL",
            Gateway::Mastercard => "MASTERCARD",
            Gateway::Visa => "VISA",
            Gateway::AmericanExpress => "AMEX",
            Gateway::CreditCard => "CREDITCARD",
            Gateway::Maestro => "MAESTRO",
            Gateway::Bancontact => "MISTERCASH",
            Gateway::PayPal => "PAYPAL",
            Gateway::Klarna => "KLARNA",
            Gateway::Generic | Gateway::Generic2 | Gateway::Generic3 => "GENERIC",
        }
    }

    /// Identifier stored on the platform's payment method entity.
    pub fn handler_identifier(&self) -> &'static str {
        match self {
            Gateway::MultiSafepay => "multisafepay.handler.multisafepay",
            Gateway::AfterPay => "multisafepay.handler.afterpay",
            Gateway::Ideal => "multisafepay.handler.ideal",
            Gateway::Mastercard => "multisafepay.handler.mastercard",
            Gateway::Visa => "multisafepay.handler.visa",
            Gateway::AmericanExpress => "multisafepay.handler.american_express",
            Gateway::CreditCard => "multisafepay.handler.credit_card",
            Gateway::Maestro => "multisafepay.handler.maestro",
            Gateway::Bancontact => "multisafepay.handler.bancontact",
            Gateway::PayPal => "multisafepay.handler.paypal",
            Gateway::Klarna => "multisafepay.handler.klarna",
            Gateway::Generic => "multisafepay.handler.generic",
            Gateway::Generic2 => "multisafepay.handler.generic_2",
            Gateway::Generic3 => "multisafepay.handler.generic_3",
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Gateway::CreditCard
            | Gateway::Visa
            | Gateway::Mastercard
            | Gateway::AmericanExpress
            | Gateway::Maestro => CARD_CAPABILITIES,
            _ => NO_CAPABILITIES,
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Generic gateways take their real gateway code from the payment method settings.
    pub fn is_generic(&self) -> bool {
        matches!(self, Gateway::Generic | Gateway::Generic2 | Gateway::Generic3)
    }
}

/// Ordered set of gateways known to this installation.
#[derive(Debug, Clone)]
pub struct GatewayRegistry {
    gateways: Vec<Gateway>,
}

impl GatewayRegistry {
    pub fn new(gateways: Vec<Gateway>) -> Self {
        Self { gateways }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gateway> {
        self.gateways.iter()
    }

    pub fn find_by_handler(&self, handler_identifier: &str) -> Option<Gateway> {
        self.gateways
            .iter()
            .copied()
            .find(|g| g.handler_identifier() == handler_identifier)
    }

    pub fn gateway_code_for_handler(&self, handler_identifier: &str) -> Option<&'static str> {
        self.find_by_handler(handler_identifier).map(|g| g.gateway_code())
    }

    /// Unknown handlers declare no capabilities.
    pub fn supports(&self, handler_identifier: &str, capability: Capability) -> bool {
        self.find_by_handler(handler_identifier)
            .map(|g| g.supports(capability))
            .unwrap_or(false)
    }
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self::new(Gateway::ALL.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_gateways_declare_both_capabilities() {
        for gateway in [Gateway::CreditCard, Gateway::Visa, Gateway::Mastercard, Gateway::AmericanExpress, Gateway::Maestro] {
            assert!(gateway.supports(Capability::PaymentComponent), "{:?}", gateway);
            assert!(gateway.supports(Capability::Tokenization), "{:?}", gateway);
        }
        assert!(!Gateway::Ideal.supports(Capability::Tokenization));
        assert!(!Gateway::MultiSafepay.supports(Capability::PaymentComponent));
    }

    #[test]
    fn test_handler_identifiers_are_unique() {
        let registry = GatewayRegistry::default();
        for gateway in registry.iter() {
            assert_eq!(registry.find_by_handler(gateway.handler_identifier()), Some(*gateway));
        }
    }

    #[test]
    fn test_lookup_of_unknown_handler() {
        let registry = GatewayRegistry::default();
        assert_eq!(registry.find_by_handler("acme.handler.invoice"), None);
        assert_eq!(registry.gateway_code_for_handler("acme.handler.invoice"), None);
        assert!(!registry.supports("acme.handler.invoice", Capability::Tokenization));
    }

    #[test]
    fn test_registry_only_knows_registered_gateways() {
        let registry = GatewayRegistry::new(vec![Gateway::Ideal, Gateway::Visa]);
        assert_eq!(registry.iter().count(), 2);
        assert_eq!(registry.gateway_code_for_handler("multisafepay.handler.ideal"), Some("IDEAL"));
        assert!(registry.supports("multisafepay.handler.visa", Capability::PaymentComponent));
        assert!(!registry.supports("multisafepay.handler.mastercard", Capability::PaymentComponent));
    }

    #[test]
    fn test_generic_gateways() {
        assert_eq!(Gateway::Generic3.name(), "Generic gateway 3");
        assert!(Gateway::Generic3.is_generic());
        assert!(!Gateway::Ideal.is_generic());
    }
}
