use campus_domain::{
    Applicant, Application, Billing, Card, FunctionResult, Page, Posting, UserProfile,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Capabilities whose result is only an acknowledgement; the assistant text
/// already describes the outcome.
pub const MUTATION_FUNCTIONS: [&str; 4] = [
    "apply_to_posting",
    "update_user_profile",
    "update_company_profile",
    "update_application_status",
];

/// Maps one structured payload to the card that displays it.
///
/// Total over `function_name`: mutation acknowledgements and payloads whose
/// shape does not match their known capability yield `None`, unknown
/// capabilities always yield [`Card::Raw`].
pub fn render(result: &FunctionResult) -> Option<Card> {
    let name = result.function_name.as_str();
    let data = &result.data;

    if MUTATION_FUNCTIONS.contains(&name) {
        return None;
    }

    match name {
        "get_posting_list" | "get_my_postings" => {
            page::<Posting>(name, data).map(|page| Card::PostingList(page.content))
        }
        "filter_postings" => list::<Posting>(name, data).map(Card::PostingList),
        "get_posting_detail" | "create_posting" => {
            entity::<Posting>(name, data).map(Card::PostingDetail)
        }
        "get_my_applications" => list::<Application>(name, data).map(Card::ApplicationList),
        "get_user_info" => entity::<UserProfile>(name, data).map(Card::UserProfile),
        "get_billing_list" => list::<Billing>(name, data).map(Card::BillingList),
        "get_billing_detail" => entity::<Billing>(name, data).map(Card::BillingDetail),
        "get_applications_for_posting" => list::<Applicant>(name, data).map(Card::applicants),
        _ => Some(Card::Raw(data.clone())),
    }
}

/// Renders every result of a turn, keeping their order.
pub fn render_all(results: &[FunctionResult]) -> Vec<Card> {
    results.iter().filter_map(render).collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn page<T: DeserializeOwned>(name: &str, data: &Value) -> Option<Page<T>> {
    let has_content = data.get("content").is_some_and(Value::is_array);
    if !has_content {
        return None;
    }
    decode(name, data)
}

fn list<T: DeserializeOwned>(name: &str, data: &Value) -> Option<Vec<T>> {
    if !data.is_array() {
        return None;
    }
    decode(name, data)
}

fn entity<T: DeserializeOwned>(name: &str, data: &Value) -> Option<T> {
    if !is_truthy(data) || !data.is_object() {
        return None;
    }
    decode(name, data)
}

fn decode<T: DeserializeOwned>(name: &str, data: &Value) -> Option<T> {
    serde_json::from_value(data.clone())
        .inspect_err(|error| debug!(function = name, %error, "Payload shape not recognised"))
        .ok()
}
