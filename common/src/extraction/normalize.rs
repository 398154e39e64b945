use serde_json::{Map, Value};

use super::WRAPPER_KEY;
use crate::error::FormError;
use crate::model::record::Record;

/// Parses an extraction response into records.
///
/// Accepted shapes: a single object, or a non-empty array of objects. Any
/// object may wrap the record under `json`. Scalars are stringified, `null`
/// becomes an empty string, and missing card fields stay empty.
pub fn normalize_response(body: &str) -> Result<Vec<Record>, FormError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| FormError::MalformedResponse(format!("JSON illisible ({e})")))?;

    match value {
        Value::Array(items) if items.is_empty() => Err(FormError::MalformedResponse(
            "aucune donnée extraite".to_string(),
        )),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                unwrap_item(item)
                    .and_then(record_from_object)
                    .map_err(|reason| {
                        FormError::MalformedResponse(format!("élément {index} : {reason}"))
                    })
            })
            .collect(),
        Value::Object(_) => unwrap_item(value)
            .and_then(record_from_object)
            .map(|record| vec![record])
            .map_err(FormError::MalformedResponse),
        other => Err(FormError::MalformedResponse(format!(
            "objet ou tableau attendu, reçu {}",
            type_name(&other)
        ))),
    }
}

fn unwrap_item(item: Value) -> Result<Map<String, Value>, String> {
    match item {
        Value::Object(mut object) => match object.remove(WRAPPER_KEY) {
            Some(Value::Object(inner)) => Ok(inner),
            // A falsy wrapper is ignored and the element is taken as-is.
            Some(wrapper) if is_falsy(&wrapper) => Ok(object),
            None => Ok(object),
            Some(other) => Err(format!(
                "« {WRAPPER_KEY} » doit être un objet, reçu {}",
                type_name(&other)
            )),
        },
        other => Err(format!("objet attendu, reçu {}", type_name(&other))),
    }
}

fn record_from_object(object: Map<String, Value>) -> Result<Record, String> {
    let mut pairs = Vec::with_capacity(object.len());
    for (key, value) in object {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("le champ « {key} » n'est pas une valeur simple"));
            }
        };
        pairs.push((key, text));
    }
    Ok(Record::from_pairs(pairs))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booléen",
        Value::Number(_) => "un nombre",
        Value::String(_) => "une chaîne",
        Value::Array(_) => "un tableau",
        Value::Object(_) => "un objet",
    }
}
