use crate::error::{NamecheapError, NcResult};
use serde_json::{Map, Value};

/// One name/value pair destined for the request query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

/// Encode a flat parameter object into ordered query pairs.
///
/// Only string, number and boolean values are emitted; objects, arrays and
/// nulls are silently dropped - callers flatten structured parameters (e.g.
/// `ForwardTo1`, `ForwardTo2`) before encoding. Output order follows key
/// insertion order.
pub fn to_query_params(params: &Map<String, Value>) -> Vec<QueryParam> {
    let mut pairs = Vec::with_capacity(params.len());
    for (name, value) in params {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        pairs.push(QueryParam {
            name: name.clone(),
            value,
        });
    }
    pairs
}

/// Split a domain name into its second-level and top-level labels.
///
/// DNS operations address the zone as separate `SLD`/`TLD` parameters.
pub fn split_domain(domain_name: &str) -> NcResult<(String, String)> {
    let mut parts = domain_name.rsplit('.');
    match (parts.next(), parts.next()) {
        (Some(tld), Some(sld)) if !tld.is_empty() && !sld.is_empty() => {
            Ok((sld.to_string(), tld.to_string()))
        }
        _ => Err(NamecheapError::Configuration(format!(
            "invalid domain name: {domain_name}"
        ))),
    }
}
