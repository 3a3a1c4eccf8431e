// --- File: crates/commerce_common/src/models.rs ---

// Host-owned records and the mutable context objects the host hands to
// plugins. Nothing here is persisted by the payment crates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An order as the commerce module exposes it to payment methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Order {
    pub id: i64,
    /// Total in minor currency units (e.g. cents).
    pub amount: i64,
    pub currency: String,
    /// Key of the payment method the customer selected, if any.
    pub payment_method: Option<String>,
}

impl Order {
    /// True when the customer picked the payment method registered under `key`.
    pub fn uses_payment_method(&self, key: &str) -> bool {
        self.payment_method.as_deref() == Some(key)
    }
}

/// A payment record created by the processor for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    /// Amount in minor currency units.
    pub amount: i64,
    #[serde(default)]
    pub paid: bool,
}

impl Payment {
    pub fn new(id: i64, order_id: i64, amount: i64) -> Self {
        Self {
            id,
            order_id,
            amount,
            paid: false,
        }
    }
}

/// Output placeholders of the order form (mail templates read these).
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    values: BTreeMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_placeholder(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set_placeholder(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

/// A read-only field shown in the manager's order view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderField {
    pub title: String,
    /// Rendered HTML.
    pub content: String,
    pub sort: i32,
}

/// One block of the order detail page, e.g. `payment_delivery`.
#[derive(Debug, Clone, Default)]
pub struct RenderGroup {
    pub title: String,
    pub fields: BTreeMap<String, RenderField>,
}

/// Field groups of the manager order view, keyed by group name.
#[derive(Debug, Clone, Default)]
pub struct OrderRenderGroups {
    pub groups: BTreeMap<String, RenderGroup>,
}

impl OrderRenderGroups {
    pub fn with_group(mut self, key: &str, title: &str) -> Self {
        self.groups.insert(
            key.to_string(),
            RenderGroup {
                title: title.to_string(),
                fields: BTreeMap::new(),
            },
        );
        self
    }

    /// Fields of a group sorted by their `sort` weight.
    pub fn sorted_fields(&self, group: &str) -> Vec<(&str, &RenderField)> {
        let mut fields: Vec<_> = self
            .groups
            .get(group)
            .map(|g| g.fields.iter().map(|(k, v)| (k.as_str(), v)).collect())
            .unwrap_or_default();
        fields.sort_by_key(|(_, field)| field.sort);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_serializes_flat() {
        let json = serde_json::to_value(Payment::new(3, 17, 1250)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "order_id": 17, "amount": 1250, "paid": false })
        );
    }

    #[cfg(feature = "openapi")]
    #[test]
    fn host_records_have_schemas() {
        use utoipa::PartialSchema;

        let payment = serde_json::to_value(Payment::schema()).unwrap();
        assert!(payment["properties"]["order_id"].is_object());
        let order = serde_json::to_value(Order::schema()).unwrap();
        assert!(order["properties"]["payment_method"].is_object());
    }

    #[test]
    fn placeholder_falls_back_to_default() {
        let mut placeholders = Placeholders::new();
        assert_eq!(placeholders.get_placeholder("extra", ""), "");
        placeholders.set_placeholder("extra", "<p>hi</p>");
        assert_eq!(placeholders.get_placeholder("extra", ""), "<p>hi</p>");
    }

    #[test]
    fn fields_are_sorted_by_weight() {
        let mut groups = OrderRenderGroups::default().with_group("payment_delivery", "Payment");
        let group = groups.groups.get_mut("payment_delivery").unwrap();
        for (key, sort) in [("payment_link", 50), ("delivery", 20), ("payment", 10)] {
            group.fields.insert(
                key.to_string(),
                RenderField {
                    title: key.to_string(),
                    content: String::new(),
                    sort,
                },
            );
        }
        let keys: Vec<_> = groups
            .sorted_fields("payment_delivery")
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["payment", "delivery", "payment_link"]);
        assert!(groups.sorted_fields("missing").is_empty());
    }
}
