//! Shared payload fixtures for the integration tests.

use serde_json::{json, Value};

/// A fully conformant payload with exactly one item.
pub fn minimal_payload(place_of_supply: &str, place_of_delivery: &str) -> Value {
    json!({
        "sellerDetails": {
            "name": "Acme Traders Pvt Ltd",
            "address": "12 MG Road",
            "city": "Pune",
            "state": "Maharashtra",
            "pincode": "411001",
            "panNo": "ABCDE1234F",
            "gstRegistrationNo": "27ABCDE1234F1Z5"
        },
        "placeOfSupply": place_of_supply,
        "billingDetails": {
            "name": "Globex Corporation",
            "address": "4 Park Street",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560001",
            "stateCode": "29"
        },
        "shippingDetails": {
            "name": "Globex Warehouse",
            "address": "Plot 9, Peenya Industrial Area",
            "city": "Bengaluru",
            "state": "Karnataka",
            "pincode": "560058",
            "stateCode": "29"
        },
        "placeOfDelivery": place_of_delivery,
        "orderDetails": { "orderNo": "PO-2024-0042", "orderDate": "2024-03-01" },
        "invoiceDetails": {
            "invoiceNo": "INV-2024-0107",
            "invoiceDetails": "Supply against PO-2024-0042",
            "invoiceDate": "2024-03-05",
            "reverseCharge": "No"
        },
        "items": [
            { "description": "Industrial widget", "unitPrice": 1000, "quantity": 2, "discount": 0, "taxRate": 18 }
        ],
        "signatureImage": "https://cdn.example.com/acme/signature.png",
        "companyLogo": "https://cdn.example.com/acme/logo.png"
    })
}
