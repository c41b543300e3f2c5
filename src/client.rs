use crate::error::{NamecheapError, NcResult};
use crate::models::*;
use crate::query::{split_domain, to_query_params};
use crate::transform::{normalize_keys, Case};
use crate::transport::HttpClient;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Namecheap API client.
///
/// Holds the credential parameters and the HTTP transport; carries no other
/// state, so a single instance can serve concurrent calls without
/// coordination.
#[derive(Debug, Clone)]
pub struct Client {
    transport: HttpClient,
    global: GlobalParams,
}

impl Client {
    /// Create a client against the sandbox endpoint. Credential lengths are
    /// validated eagerly, before any network activity.
    pub fn new(global: GlobalParams) -> NcResult<Self> {
        Self::with_base_url(global, SANDBOX_API_URL)
    }

    /// Create a client against a custom endpoint (e.g. production).
    pub fn with_base_url(global: GlobalParams, base_url: &str) -> NcResult<Self> {
        global.validate()?;
        Ok(Self {
            transport: HttpClient::new(base_url)?,
            global,
        })
    }

    fn base_params(&self, command: Command) -> NcResult<Map<String, Value>> {
        let mut params = match serde_json::to_value(&self.global)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        params.insert(
            "command".to_string(),
            Value::String(command.as_str().to_string()),
        );
        Ok(params)
    }

    /// Fold parameter keys to their wire casing, encode and send.
    async fn run(&self, method: Method, params: Map<String, Value>) -> NcResult<Value> {
        let params = match normalize_keys(Value::Object(params), Case::Upper) {
            Value::Object(map) => map,
            // normalize_keys preserves the object shape
            _ => Map::new(),
        };
        let pairs = to_query_params(&params);
        self.transport.send(method, &pairs).await
    }

    /// List domains in the account.
    pub async fn domains_get_list(
        &self,
        request: &DomainsListRequest,
    ) -> NcResult<DomainsListResponse> {
        let mut params = self.base_params(Command::DomainsGetList)?;
        merge(&mut params, serde_json::to_value(request)?);

        let mut payload = self.run(Method::GET, params).await?;
        // An account with no domains answers with an empty result element,
        // which decodes to a primitive; clear it instead of surfacing it.
        if let Value::Object(map) = &mut payload {
            let primitive = map
                .get("domainGetListResult")
                .is_some_and(|v| !v.is_object() && !v.is_array());
            if primitive {
                map.remove("domainGetListResult");
            }
        }
        Ok(serde_json::from_value(payload)?)
    }

    /// Register a new domain.
    pub async fn create_domain(
        &self,
        request: &DomainRegistrationRequest,
    ) -> NcResult<CreateDomainResponse> {
        let mut params = self.base_params(Command::DomainsCreate)?;
        merge(&mut params, serde_json::to_value(request)?);
        merge_contacts(&mut params, request.contacts())?;
        if let Some(billing) = &request.billing {
            params.extend(contact_params("billing", billing)?);
        }

        let payload = self.run(Method::POST, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Check availability for a batch of domains.
    pub async fn check_domain_availability(
        &self,
        domains: &[&str],
    ) -> NcResult<CheckDomainsResponse> {
        let mut params = self.base_params(Command::DomainsCheck)?;
        params.insert(
            "domainList".to_string(),
            Value::String(domains.join(",")),
        );

        let payload = self.run(Method::GET, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Check availability for a single domain.
    pub async fn check_domain(&self, domain: &str) -> NcResult<CheckDomainsResponse> {
        self.check_domain_availability(&[domain]).await
    }

    /// List TLDs the registrar supports.
    pub async fn get_tld_list(&self) -> NcResult<TldListResponse> {
        let params = self.base_params(Command::DomainsGetTldList)?;
        let payload = self.run(Method::GET, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Fetch the whois contacts for a domain.
    pub async fn get_contacts(&self, domain_name: &str) -> NcResult<ContactsResponse> {
        let mut params = self.base_params(Command::DomainsGetContacts)?;
        params.insert(
            "domainName".to_string(),
            Value::String(domain_name.to_string()),
        );

        let payload = self.run(Method::GET, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Replace the whois contacts for a domain.
    pub async fn set_contacts(&self, request: &SetContactsRequest) -> NcResult<SetContactsResponse> {
        let mut params = self.base_params(Command::DomainsSetContacts)?;
        merge(&mut params, serde_json::to_value(request)?);
        merge_contacts(&mut params, request.contacts())?;

        let payload = self.run(Method::GET, params).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Read the registrar lock state for a domain.
    pub async fn get_registrar_lock(&self, domain_name: &str) -> NcResult<RegistrarLockStatus> {
        let mut params = self.base_params(Command::DomainsGetRegistrarLock)?;
        params.insert(
            "domainName".to_string(),
            Value::String(domain_name.to_string()),
        );

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainGetRegistrarLockResult")
    }

    /// Lock or unlock a domain at the registrar.
    pub async fn set_registrar_lock(
        &self,
        domain_name: &str,
        action: LockAction,
    ) -> NcResult<AckResult> {
        let mut params = self.base_params(Command::DomainsSetRegistrarLock)?;
        params.insert(
            "domainName".to_string(),
            Value::String(domain_name.to_string()),
        );
        params.insert("lockAction".to_string(), serde_json::to_value(action)?);

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainSetRegistrarLockResult")
    }

    /// Fetch registration details for a domain.
    pub async fn get_info(&self, request: &GetInfoRequest) -> NcResult<DomainInfoResult> {
        let mut params = self.base_params(Command::DomainsGetInfo)?;
        merge(&mut params, serde_json::to_value(request)?);

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainGetInfoResult")
    }

    /// Point a domain back at the registrar's default nameservers.
    pub async fn set_default_dns(&self, domain_name: &str) -> NcResult<DnsUpdateResult> {
        let mut params = self.base_params(Command::DnsSetDefault)?;
        insert_zone(&mut params, domain_name)?;

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSSetDefaultResult")
    }

    /// Point a domain at custom nameservers.
    pub async fn set_custom_dns(
        &self,
        domain_name: &str,
        nameservers: &[&str],
    ) -> NcResult<DnsUpdateResult> {
        let mut params = self.base_params(Command::DnsSetCustom)?;
        insert_zone(&mut params, domain_name)?;
        params.insert(
            "nameservers".to_string(),
            Value::String(nameservers.join(",").replace(' ', "")),
        );

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSSetCustomResult")
    }

    /// List the nameservers currently serving a domain.
    pub async fn get_dns_list(&self, domain_name: &str) -> NcResult<DnsListResult> {
        let mut params = self.base_params(Command::DnsGetList)?;
        insert_zone(&mut params, domain_name)?;

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSGetListResult")
    }

    /// List the DNS host records for a domain.
    pub async fn get_dns_hosts(&self, domain_name: &str) -> NcResult<DnsHostsResult> {
        let mut params = self.base_params(Command::DnsGetHosts)?;
        insert_zone(&mut params, domain_name)?;

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSGetHostsResult")
    }

    /// List the email forwarding rules for a domain.
    pub async fn get_dns_email_forwarding(
        &self,
        domain_name: &str,
    ) -> NcResult<EmailForwardingResult> {
        let mut params = self.base_params(Command::DnsGetEmailForwarding)?;
        params.insert(
            "domainName".to_string(),
            Value::String(domain_name.to_string()),
        );

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSGetEmailForwardingResult")
    }

    /// Replace the email forwarding rules for a domain. `mail_boxes` and
    /// `forward_to` pair up by index and flatten into `MailBox1..n` /
    /// `ForwardTo1..n` parameters.
    pub async fn set_dns_email_forwarding(
        &self,
        domain_name: &str,
        mail_boxes: &[&str],
        forward_to: &[&str],
    ) -> NcResult<AckResult> {
        let mut params = self.base_params(Command::DnsSetEmailForwarding)?;
        params.insert(
            "domainName".to_string(),
            Value::String(domain_name.to_string()),
        );
        for (index, destination) in forward_to.iter().enumerate() {
            params.insert(
                format!("ForwardTo{}", index + 1),
                Value::String((*destination).to_string()),
            );
        }
        for (index, mailbox) in mail_boxes.iter().enumerate() {
            params.insert(
                format!("MailBox{}", index + 1),
                Value::String((*mailbox).to_string()),
            );
        }

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainDNSSetEmailForwardingResult")
    }

    /// Register a nameserver under a domain.
    pub async fn create_ns(
        &self,
        domain_name: &str,
        nameserver: &str,
        ip: &str,
    ) -> NcResult<NsCreateResult> {
        let mut params = self.base_params(Command::NsCreate)?;
        insert_zone(&mut params, domain_name)?;
        params.insert(
            "nameserver".to_string(),
            Value::String(nameserver.to_string()),
        );
        params.insert("IP".to_string(), Value::String(ip.to_string()));

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainNSCreateResult")
    }

    /// Fetch details for a nameserver registered under a domain.
    pub async fn get_ns_info(&self, domain_name: &str, nameserver: &str) -> NcResult<NsInfoResult> {
        let mut params = self.base_params(Command::NsGetInfo)?;
        insert_zone(&mut params, domain_name)?;
        params.insert(
            "nameserver".to_string(),
            Value::String(nameserver.to_string()),
        );

        let payload = self.run(Method::GET, params).await?;
        unwrap_result(payload, "domainNSInfoResult")
    }
}

impl DomainRegistrationRequest {
    fn contacts(&self) -> [(&str, &Contact); 4] {
        [
            ("registrant", &self.registrant),
            ("tech", &self.tech),
            ("admin", &self.admin),
            ("auxBilling", &self.aux_billing),
        ]
    }
}

impl SetContactsRequest {
    fn contacts(&self) -> [(&str, &Contact); 4] {
        [
            ("registrant", &self.registrant),
            ("tech", &self.tech),
            ("admin", &self.admin),
            ("auxBilling", &self.aux_billing),
        ]
    }
}

fn merge(params: &mut Map<String, Value>, value: Value) {
    if let Value::Object(map) = value {
        params.extend(map);
    }
}

fn merge_contacts(
    params: &mut Map<String, Value>,
    contacts: [(&str, &Contact); 4],
) -> NcResult<()> {
    for (prefix, contact) in contacts {
        params.extend(contact_params(prefix, contact)?);
    }
    Ok(())
}

fn insert_zone(params: &mut Map<String, Value>, domain_name: &str) -> NcResult<()> {
    let (sld, tld) = split_domain(domain_name)?;
    params.insert("SLD".to_string(), Value::String(sld));
    params.insert("TLD".to_string(), Value::String(tld));
    Ok(())
}

fn unwrap_result<T: DeserializeOwned>(payload: Value, key: &str) -> NcResult<T> {
    let mut payload = match payload {
        Value::Object(map) => map,
        other => {
            return Err(NamecheapError::MalformedResponse(format!(
                "expected object command response, got {other}"
            )))
        }
    };
    let inner = payload.remove(key).ok_or_else(|| {
        NamecheapError::MalformedResponse(format!("missing {key} in command response"))
    })?;
    Ok(serde_json::from_value(inner)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn global_params() -> GlobalParams {
        GlobalParams {
            api_user: "apiuser".into(),
            api_key: "apikey".into(),
            username: "user".into(),
            client_ip: "192.168.100.1".into(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new(global_params()).unwrap();
        assert_eq!(
            client.transport.base_url().as_str(),
            "https://api.sandbox.namecheap.com/xml.response"
        );
    }

    #[test]
    fn test_oversized_client_ip_fails_before_any_request() {
        let err = Client::new(GlobalParams {
            client_ip: "1234.5678.90.1234".into(), // 16+ chars
            ..global_params()
        })
        .unwrap_err();

        match err {
            NamecheapError::Configuration(message) => assert!(message.contains("15")),
            other => panic!("expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_base_params_carry_credentials_and_command() {
        let client = Client::new(global_params()).unwrap();
        let params = client.base_params(Command::DnsGetHosts).unwrap();

        let folded = match normalize_keys(Value::Object(params), Case::Upper) {
            Value::Object(map) => map,
            _ => unreachable!("object in, object out"),
        };
        let pairs = to_query_params(&folded);
        let names: Vec<&str> = pairs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["ApiUser", "ApiKey", "Username", "ClientIP", "Command"]
        );
        assert_eq!(pairs[4].value, "namecheap.domains.dns.getHosts");
    }

    #[test]
    fn test_unwrap_result_extracts_inner_payload() {
        let payload = json!({
            "domainDNSSetDefaultResult": { "domain": "example.com", "updated": true },
            "type": "namecheap.domains.dns.setDefault"
        });
        let result: DnsUpdateResult = unwrap_result(payload, "domainDNSSetDefaultResult").unwrap();
        assert_eq!(result.domain, "example.com");
        assert!(result.updated);
    }

    #[test]
    fn test_unwrap_result_missing_key_is_malformed() {
        let payload = json!({ "type": "namecheap.domains.dns.setDefault" });
        let result: NcResult<DnsUpdateResult> = unwrap_result(payload, "domainDNSSetDefaultResult");
        assert!(matches!(result, Err(NamecheapError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_surfaces_transport_error() {
        let client =
            Client::with_base_url(global_params(), "http://127.0.0.1:9/xml.response").unwrap();
        let err = client.get_tld_list().await.unwrap_err();
        assert!(matches!(err, NamecheapError::Transport { .. }));
    }
}
