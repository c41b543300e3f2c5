//! Response envelope handling.
//!
//! Every API call answers with the same XML envelope: a single `ApiResponse`
//! root carrying a `Status` attribute, an `Errors` block and, on success, a
//! `CommandResponse` payload. [`parse_response`] runs the full normalization
//! pipeline over the raw text and [`unwrap_envelope`] validates the status
//! and extracts the payload.

use crate::error::{NamecheapError, NcResult};
use crate::transform::{arrayify, coerce_types, normalize_keys, Case};
use crate::xml;
use serde_json::Value;

/// Decode raw XML and normalize it: keys lower-cased first-char, string
/// leaves coerced to primitives, numeric-keyed objects turned into arrays.
pub fn parse_response(text: &str) -> NcResult<Value> {
    let decoded = xml::decode(text)?;
    let normalized = normalize_keys(decoded, Case::Lower);
    Ok(arrayify(coerce_types(normalized)))
}

/// Validate the envelope status and extract the `commandResponse` payload.
///
/// A `status` of `"error"` (any casing) fails with the provider's numeric
/// code and text, surfaced verbatim.
pub fn unwrap_envelope(value: Value) -> NcResult<Value> {
    let mut root = match value {
        Value::Object(map) => map,
        _ => return Err(malformed("response root is not an element")),
    };

    let mut envelope = match root.remove("apiResponse") {
        Some(Value::Object(map)) => map,
        _ => return Err(malformed("missing apiResponse envelope")),
    };

    let status = envelope
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("envelope has no status field"))?;

    if status.eq_ignore_ascii_case("error") {
        let (code, message) = read_error(&envelope);
        return Err(NamecheapError::Api { code, message });
    }

    Ok(envelope.remove("commandResponse").unwrap_or(Value::Null))
}

fn read_error(envelope: &serde_json::Map<String, Value>) -> (i64, String) {
    let error = envelope.get("errors").and_then(|errors| errors.get("error"));
    // Multiple <Error> siblings arrayify; report the first one.
    let error = match error {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };

    let code = error
        .and_then(|e| e.get("number"))
        .and_then(Value::as_i64)
        .unwrap_or(-1);
    let message = error
        .and_then(|e| e.get("text"))
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    (code, message)
}

fn malformed(detail: &str) -> NamecheapError {
    NamecheapError::MalformedResponse(detail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_envelope_fails_with_code_and_text() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
            <ApiResponse Status="ERROR">
              <Errors>
                <Error Number="1011102">Bad</Error>
              </Errors>
              <CommandResponse />
            </ApiResponse>"#;

        let value = parse_response(xml).unwrap();
        match unwrap_envelope(value) {
            Err(NamecheapError::Api { code, message }) => {
                assert_eq!(code, 1011102);
                assert_eq!(message, "Bad");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_success_envelope_returns_coerced_payload() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.dns.setDefault">
                <DomainDNSSetDefaultResult Domain="example.com" Updated="true" />
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        assert_eq!(
            payload["domainDNSSetDefaultResult"],
            json!({ "domain": "example.com", "updated": true })
        );
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let xml = r#"
            <ApiResponse Status="Error">
              <Errors><Error Number="2030280">TLD is not supported</Error></Errors>
            </ApiResponse>"#;

        let result = unwrap_envelope(parse_response(xml).unwrap());
        assert!(matches!(result, Err(NamecheapError::Api { code: 2030280, .. })));
    }

    #[test]
    fn test_repeated_hosts_arrayify_end_to_end() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.dns.getHosts">
                <DomainDNSGetHostsResult Domain="example.com" IsUsingOurDNS="true" EmailType="FWD">
                  <Host HostId="10" Name="@" Type="A" Address="1.2.3.4" TTL="1800" MXPref="10" IsActive="true" IsDDNSEnabled="false" />
                  <Host HostId="11" Name="www" Type="CNAME" Address="example.com." TTL="1800" MXPref="10" IsActive="true" IsDDNSEnabled="false" />
                  <Host HostId="12" Name="mail" Type="MX" Address="mx.example.com." TTL="3600" MXPref="20" IsActive="true" IsDDNSEnabled="false" />
                </DomainDNSGetHostsResult>
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        let hosts = payload["domainDNSGetHostsResult"]["host"]
            .as_array()
            .expect("hosts should be a sequence");
        assert_eq!(hosts.len(), 3);
        assert_eq!(hosts[0]["tTL"], json!(1800));
        assert_eq!(hosts[2]["mXPref"], json!(20));
        assert_eq!(hosts[1]["isActive"], json!(true));
    }

    #[test]
    fn test_missing_envelope_is_malformed() {
        let value = json!({ "somethingElse": {} });
        assert!(matches!(
            unwrap_envelope(value),
            Err(NamecheapError::MalformedResponse(_))
        ));
    }
}
