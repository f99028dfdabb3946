use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_DESCRIPTION: &str = "Order description";
const DEFAULT_UNIT_PATH: &str = "/purchase_units/@reference_id=='default'";

/// Checkout cart as posted by the front end.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub return_url: String,
    #[serde(default)]
    pub cancel_url: String,
    pub currency_code: String,
    pub value: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// recipient full name; PayPal falls back to the payer's name when absent
    #[serde(default)]
    pub shipping_name: Option<String>,
}

/// New amount (and optionally invoice) for an existing order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub currency_code: String,
    pub value: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

/// One JSON Patch operation as accepted by `PATCH /v2/checkout/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOp {
    pub op: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOp {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self { op: "add".to_owned(), path: path.into(), value: Some(value) }
    }
}

/// Orders v2 create body for a single purchase unit captured immediately.
pub fn create_order_payload(cart: &Cart) -> Value {
    let mut unit = json!({
        "amount": {
            "currency_code": cart.currency_code,
            "value": cart.value,
            "breakdown": {
                "item_total": {
                    "currency_code": cart.currency_code,
                    "value": cart.value
                }
            }
        },
        "description": cart.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
    });
    if let Some(invoice) = &cart.invoice_number {
        unit["invoice_id"] = json!(invoice);
    }
    if let Some(full_name) = &cart.shipping_name {
        unit["shipping"] = json!({ "name": { "full_name": full_name } });
    }

    json!({
        "intent": "CAPTURE",
        "purchase_units": [unit],
        "payment_source": {
            "paypal": {
                "experience_context": {
                    "return_url": cart.return_url,
                    "cancel_url": cart.cancel_url
                }
            }
        }
    })
}

pub fn update_order_patch(update: &OrderUpdate) -> Vec<PatchOp> {
    let mut ops = vec![PatchOp::add(
        format!("{}/amount", DEFAULT_UNIT_PATH),
        json!({ "currency_code": update.currency_code, "value": update.value }),
    )];
    if let Some(invoice) = &update.invoice_number {
        ops.push(PatchOp::add(format!("{}/invoice_id", DEFAULT_UNIT_PATH), json!(invoice)));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_maps_to_capture_intent_with_breakdown() {
        let cart: Cart = serde_json::from_value(json!({
            "returnUrl": "https://shop.test/ok",
            "cancelUrl": "https://shop.test/cancel",
            "currencyCode": "USD",
            "value": "100.00",
            "invoiceNumber": "inv-1"
        }))
        .unwrap();

        let payload = create_order_payload(&cart);
        assert_eq!(payload["intent"], "CAPTURE");
        let unit = &payload["purchase_units"][0];
        assert_eq!(unit["amount"]["value"], "100.00");
        assert_eq!(unit["amount"]["breakdown"]["item_total"]["currency_code"], "USD");
        assert_eq!(unit["invoice_id"], "inv-1");
        assert_eq!(unit["description"], DEFAULT_DESCRIPTION);
        assert_eq!(
            payload["payment_source"]["paypal"]["experience_context"]["cancel_url"],
            "https://shop.test/cancel"
        );
    }

    #[test]
    fn shipping_name_is_sent_only_when_given() {
        let mut cart: Cart = serde_json::from_value(json!({
            "currencyCode": "USD",
            "value": "20.00",
            "shippingName": "Ada Lovelace"
        }))
        .unwrap();
        let payload = create_order_payload(&cart);
        assert_eq!(payload["purchase_units"][0]["shipping"]["name"]["full_name"], "Ada Lovelace");

        cart.shipping_name = None;
        let payload = create_order_payload(&cart);
        assert!(payload["purchase_units"][0].get("shipping").is_none());
    }

    #[test]
    fn update_without_invoice_only_patches_amount() {
        let ops = update_order_patch(&OrderUpdate {
            currency_code: "USD".into(),
            value: "110.00".into(),
            invoice_number: None,
        });
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].path, "/purchase_units/@reference_id=='default'/amount");

        let serialized = serde_json::to_value(&ops).unwrap();
        assert_eq!(serialized[0]["op"], "add");
        assert_eq!(serialized[0]["value"]["value"], "110.00");
    }

    #[test]
    fn update_with_invoice_adds_second_op() {
        let ops = update_order_patch(&OrderUpdate {
            currency_code: "EUR".into(),
            value: "5.00".into(),
            invoice_number: Some("inv-2".into()),
        });
        assert_eq!(ops[1], PatchOp::add("/purchase_units/@reference_id=='default'/invoice_id", json!("inv-2")));
    }
}
