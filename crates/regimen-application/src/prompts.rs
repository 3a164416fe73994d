//! Fixed texts and prompt construction for routine generation.

use regimen_core::catalog::Product;
use regimen_core::session::ChatMessage;
use serde_json::{Value, json};

pub const GREETING: &str = "Hi — select products and click \"Generate Routine\" to get started. Ask follow-up questions after a routine is generated.";
pub const EMPTY_SELECTION_GUIDANCE: &str =
    "Please select one or more products before generating a routine.";
pub const GENERATING_PLACEHOLDER: &str = "Generating your personalized routine…";
pub const ROUTINE_APOLOGY: &str =
    "Sorry — I couldn't generate the routine right now. Please try again.";
pub const CHAT_APOLOGY: &str = "Sorry — I couldn't reach the server. Try again.";

pub const ROUTINE_SYSTEM_INSTRUCTION: &str = "You are a helpful beauty advisor that crafts clear step-by-step routines using given products.";
const ROUTINE_USER_INSTRUCTION: &str = "Create a personalized, step-by-step routine using only these selected products. Be concise and include when to use each item (AM/PM or pre/post styling), and any important cautions. Products:";

/// Minimal product payload: name, brand, category and description only.
pub fn routine_payload(products: &[&Product]) -> Value {
    Value::Array(
        products
            .iter()
            .map(|product| {
                json!({
                    "name": product.name,
                    "brand": product.brand,
                    "category": product.category,
                    "description": product.description,
                })
            })
            .collect(),
    )
}

/// System instruction plus a user instruction embedding the product payload.
pub fn routine_messages(products: &[&Product]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ROUTINE_SYSTEM_INSTRUCTION),
        ChatMessage::user(format!(
            "{} {}",
            ROUTINE_USER_INSTRUCTION,
            routine_payload(products)
        )),
    ]
}
