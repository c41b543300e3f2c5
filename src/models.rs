use crate::error::{NamecheapError, NcResult};
use crate::transform::{normalize_keys, Case};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default API endpoint (sandbox). Use [`crate::Client::with_base_url`] for
/// the production endpoint.
pub const SANDBOX_API_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

const API_USER_MAX_LENGTH: usize = 20;
const API_KEY_MAX_LENGTH: usize = 50;
const USERNAME_MAX_LENGTH: usize = 20;
const CLIENT_IP_MAX_LENGTH: usize = 15;

/// Remote operation identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DomainsGetList,
    DomainsCreate,
    DomainsCheck,
    DomainsGetTldList,
    DomainsGetContacts,
    DomainsSetContacts,
    DomainsGetRegistrarLock,
    DomainsSetRegistrarLock,
    DomainsGetInfo,
    DnsSetDefault,
    DnsSetCustom,
    DnsGetList,
    DnsGetHosts,
    DnsGetEmailForwarding,
    DnsSetEmailForwarding,
    NsCreate,
    NsGetInfo,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::DomainsGetList => "namecheap.domains.getList",
            Command::DomainsCreate => "namecheap.domains.create",
            Command::DomainsCheck => "namecheap.domains.check",
            Command::DomainsGetTldList => "namecheap.domains.getTldList",
            Command::DomainsGetContacts => "namecheap.domains.getContacts",
            Command::DomainsSetContacts => "namecheap.domains.setContacts",
            Command::DomainsGetRegistrarLock => "namecheap.domains.getRegistrarLock",
            Command::DomainsSetRegistrarLock => "namecheap.domains.setRegistrarLock",
            Command::DomainsGetInfo => "namecheap.domains.getInfo",
            Command::DnsSetDefault => "namecheap.domains.dns.setDefault",
            Command::DnsSetCustom => "namecheap.domains.dns.setCustom",
            Command::DnsGetList => "namecheap.domains.dns.getList",
            Command::DnsGetHosts => "namecheap.domains.dns.getHosts",
            Command::DnsGetEmailForwarding => "namecheap.domains.dns.getEmailForwarding",
            Command::DnsSetEmailForwarding => "namecheap.domains.dns.setEmailForwarding",
            Command::NsCreate => "namecheap.domains.ns.create",
            Command::NsGetInfo => "namecheap.domains.ns.getInfo",
        }
    }
}

/// Credential/identity parameters attached to every outbound request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalParams {
    pub api_user: String,
    pub api_key: String,
    pub username: String,
    #[serde(rename = "clientIP")]
    pub client_ip: String,
}

impl GlobalParams {
    /// Eager max-length validation, performed at client construction before
    /// any network activity.
    pub fn validate(&self) -> NcResult<()> {
        if self.client_ip.len() > CLIENT_IP_MAX_LENGTH {
            return Err(NamecheapError::Configuration(format!(
                "client ip max length is {CLIENT_IP_MAX_LENGTH}"
            )));
        }
        if self.api_user.len() > API_USER_MAX_LENGTH {
            return Err(NamecheapError::Configuration(format!(
                "api user max length is {API_USER_MAX_LENGTH}"
            )));
        }
        if self.api_key.len() > API_KEY_MAX_LENGTH {
            return Err(NamecheapError::Configuration(format!(
                "api key max length is {API_KEY_MAX_LENGTH}"
            )));
        }
        if self.username.len() > USERNAME_MAX_LENGTH {
            return Err(NamecheapError::Configuration(format!(
                "username max length is {USERNAME_MAX_LENGTH}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DomainsListType {
    #[serde(rename = "ALL")]
    All,
    #[serde(rename = "EXPIRING")]
    Expiring,
    #[serde(rename = "EXPIRED")]
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DomainsListSortBy {
    #[serde(rename = "NAME")]
    Name,
    #[serde(rename = "NAME_DESC")]
    NameDesc,
    #[serde(rename = "EXPIREDATE")]
    ExpireDate,
    #[serde(rename = "EXPIREDATE_DESC")]
    ExpireDateDesc,
    #[serde(rename = "CREATEDATE")]
    CreateDate,
    #[serde(rename = "CREATEDATE_DESC")]
    CreateDateDesc,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainsListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_type: Option<DomainsListType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<DomainsListSortBy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LockAction {
    #[serde(rename = "LOCK")]
    Lock,
    #[serde(rename = "UNLOCK")]
    Unlock,
}

/// One whois contact block. The API takes these as flat prefixed parameters
/// (`RegistrantFirstName`, `TechCity`, ...); [`contact_params`] does the
/// flattening.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub city: String,
    pub state_province: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_province_choice: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_ext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    pub email_address: String,
}

/// Flatten a contact block into `{prefix}{Field}` parameters.
pub(crate) fn contact_params(prefix: &str, contact: &Contact) -> NcResult<Map<String, Value>> {
    let value = normalize_keys(serde_json::to_value(contact)?, Case::Upper);
    let mut out = Map::new();
    if let Value::Object(fields) = value {
        for (key, field) in fields {
            out.insert(format!("{prefix}{key}"), field);
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRegistrationRequest {
    pub domain_name: String,
    pub years: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
    #[serde(skip)]
    pub registrant: Contact,
    #[serde(skip)]
    pub tech: Contact,
    #[serde(skip)]
    pub admin: Contact,
    #[serde(skip)]
    pub aux_billing: Contact,
    #[serde(skip)]
    pub billing: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idn_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_free_whoisguard: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wg_enabled: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium_domain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eap_fee: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetContactsRequest {
    pub domain_name: String,
    #[serde(skip)]
    pub registrant: Contact,
    #[serde(skip)]
    pub tech: Contact,
    #[serde(skip)]
    pub admin: Contact,
    #[serde(skip)]
    pub aux_billing: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_attributes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInfoRequest {
    pub domain_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Deserialize a field that holds either a single element or a sequence.
///
/// A lone repeated element stays an object after array-ification, so typed
/// sequence fields must accept both shapes.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub total_items: u64,
    pub current_page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    #[serde(rename = "iD")]
    pub id: u64,
    pub name: String,
    pub user: String,
    pub created: String,
    pub expires: String,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub whois_guard: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(rename = "isOurDNS", default)]
    pub is_our_dns: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListEntries {
    #[serde(default, deserialize_with = "one_or_many")]
    pub domain: Vec<DomainSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainsListResponse {
    /// Absent when the account holds no domains (the API answers with an
    /// empty element, which the client clears rather than surfaces).
    #[serde(default)]
    pub domain_get_list_result: Option<DomainListEntries>,
    pub paging: Paging,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCreateResult {
    pub domain: String,
    pub registered: bool,
    #[serde(default)]
    pub charged_amount: f64,
    #[serde(rename = "domainID", default)]
    pub domain_id: u64,
    #[serde(rename = "orderID", default)]
    pub order_id: u64,
    #[serde(rename = "transactionID", default)]
    pub transaction_id: u64,
    #[serde(default)]
    pub whoisguard_enable: bool,
    #[serde(default)]
    pub non_real_time_domain: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDomainResponse {
    pub domain_create_result: DomainCreateResult,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCheckResult {
    pub domain: String,
    pub available: bool,
    #[serde(default)]
    pub is_premium_name: bool,
    #[serde(default)]
    pub premium_registration_price: f64,
    #[serde(default)]
    pub premium_renewal_price: f64,
    #[serde(default)]
    pub premium_restore_price: f64,
    #[serde(default)]
    pub premium_transfer_price: f64,
    #[serde(default)]
    pub icann_fee: f64,
    #[serde(default)]
    pub eap_fee: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDomainsResponse {
    #[serde(default, deserialize_with = "one_or_many")]
    pub domain_check_result: Vec<DomainCheckResult>,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tld {
    pub name: String,
    #[serde(default)]
    pub non_real_time_domain: bool,
    #[serde(default)]
    pub min_register_years: u32,
    #[serde(default)]
    pub max_register_years: u32,
    #[serde(default)]
    pub min_renew_years: u32,
    #[serde(default)]
    pub max_renew_years: u32,
    #[serde(default)]
    pub min_transfer_years: u32,
    #[serde(default)]
    pub max_transfer_years: u32,
    #[serde(default)]
    pub is_api_registerable: bool,
    #[serde(default)]
    pub is_api_renewable: bool,
    #[serde(default)]
    pub is_api_transferable: bool,
    #[serde(default)]
    pub is_epp_required: bool,
    #[serde(default)]
    pub is_disable_mod_contact: bool,
    #[serde(rename = "isDisableWGAllot", default)]
    pub is_disable_wg_allot: bool,
    #[serde(default)]
    pub is_include_in_extended_search_only: bool,
    #[serde(default)]
    pub sequence_number: u32,
    #[serde(rename = "type", default)]
    pub tld_type: String,
    #[serde(rename = "isSupportsIDN", default)]
    pub is_supports_idn: bool,
    /// String or numeric, depending on what the coercer made of it.
    #[serde(default)]
    pub category: Value,
    /// Element text, if the entry carries a description.
    #[serde(rename = "text", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub tld: Vec<Tld>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TldListResponse {
    pub tlds: TldList,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

/// A contact block as returned by getContacts. Several fields come back
/// empty or get coerced to numbers by the pipeline (phone numbers parse as
/// floats), so the loosely-typed ones stay `Value`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub organization_name: Value,
    #[serde(default)]
    pub job_title: Value,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: Value,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state_province: String,
    #[serde(default)]
    pub state_province_choice: String,
    #[serde(default)]
    pub postal_code: Value,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: Value,
    #[serde(default)]
    pub fax: Value,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub phone_ext: Value,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContactsResult {
    pub registrant: ContactInfo,
    pub tech: ContactInfo,
    pub admin: ContactInfo,
    pub aux_billing: ContactInfo,
    pub domain: String,
    #[serde(default)]
    pub domainnameid: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub domain_contacts_result: DomainContactsResult,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

/// Shared `{ domain, isSuccess }` acknowledgement payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckResult {
    pub domain: String,
    pub is_success: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetContactsResponse {
    pub domain_set_contact_result: AckResult,
    #[serde(rename = "type", default)]
    pub command_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarLockStatus {
    pub domain: String,
    pub registrar_lock_status: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfoResult {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "iD", default)]
    pub id: u64,
    pub domain_name: String,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_premium: bool,
}

/// `{ domain, updated }` result shared by the DNS setter operations.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsUpdateResult {
    pub domain: String,
    pub updated: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsListResult {
    pub domain: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub nameserver: Vec<String>,
    #[serde(rename = "isUsingOurDNS", default)]
    pub is_using_our_dns: bool,
    #[serde(rename = "isPremiumDNS", default)]
    pub is_premium_dns: bool,
    #[serde(rename = "isUsingFreeDNS", default)]
    pub is_using_free_dns: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsHost {
    pub host_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub address: String,
    /// Provider casing quirk: arrives as `mXPref` after normalization.
    #[serde(rename = "mXPref", default)]
    pub mx_pref: Option<u32>,
    /// Provider casing quirk: arrives as `tTL` after normalization.
    #[serde(rename = "tTL")]
    pub ttl: u32,
    #[serde(default)]
    pub associated_app_title: Value,
    #[serde(default)]
    pub friendly_name: Value,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "isDDNSEnabled", default)]
    pub is_ddns_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsHostsResult {
    pub domain: String,
    #[serde(rename = "isUsingOurDNS", default)]
    pub is_using_our_dns: bool,
    #[serde(default)]
    pub email_type: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub host: Vec<DnsHost>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailForward {
    pub mailbox: String,
    /// Element text: the destination address.
    #[serde(rename = "text", default)]
    pub forward_to: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailForwardingResult {
    pub domain: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub forward: Vec<EmailForward>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsCreateResult {
    pub domain: String,
    pub nameserver: String,
    /// Provider casing quirk: arrives as `iP` after normalization.
    #[serde(rename = "iP")]
    pub ip: String,
    #[serde(default)]
    pub is_success: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameserverStatuses {
    #[serde(default, deserialize_with = "one_or_many")]
    pub status: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsInfoResult {
    pub domain: String,
    pub nameserver: String,
    #[serde(rename = "iP", default)]
    pub ip: String,
    #[serde(default)]
    pub nameserver_statuses: Option<NameserverStatuses>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{parse_response, unwrap_envelope};
    use serde_json::json;

    #[test]
    fn test_global_params_length_limits() {
        let params = GlobalParams {
            api_user: "user".into(),
            api_key: "key".into(),
            username: "user".into(),
            client_ip: "192.168.100.1".into(),
        };
        assert!(params.validate().is_ok());

        let bad_ip = GlobalParams {
            client_ip: "1234.5678.90.1234".into(),
            ..params.clone()
        };
        match bad_ip.validate() {
            Err(NamecheapError::Configuration(message)) => {
                assert!(message.contains("15"), "message should name the limit");
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }

        let bad_key = GlobalParams {
            api_key: "k".repeat(51),
            ..params
        };
        assert!(matches!(
            bad_key.validate(),
            Err(NamecheapError::Configuration(_))
        ));
    }

    #[test]
    fn test_command_strings() {
        assert_eq!(Command::DomainsGetList.as_str(), "namecheap.domains.getList");
        assert_eq!(Command::DnsGetHosts.as_str(), "namecheap.domains.dns.getHosts");
        assert_eq!(Command::NsCreate.as_str(), "namecheap.domains.ns.create");
    }

    #[test]
    fn test_one_or_many_accepts_both_shapes() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(default, deserialize_with = "one_or_many")]
            nameserver: Vec<String>,
        }

        let many: Wrapper = serde_json::from_value(json!({ "nameserver": ["a", "b"] })).unwrap();
        assert_eq!(many.nameserver, vec!["a", "b"]);

        let one: Wrapper = serde_json::from_value(json!({ "nameserver": "a" })).unwrap();
        assert_eq!(one.nameserver, vec!["a"]);

        let none: Wrapper = serde_json::from_value(json!({})).unwrap();
        assert!(none.nameserver.is_empty());
    }

    #[test]
    fn test_contact_params_flatten_with_prefix() {
        let contact = Contact {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            address1: "1 Main St".into(),
            city: "Springfield".into(),
            state_province: "IL".into(),
            postal_code: "62701".into(),
            country: "US".into(),
            phone: "+1.2025551234".into(),
            email_address: "jane@example.com".into(),
            ..Contact::default()
        };

        let params = contact_params("registrant", &contact).unwrap();
        assert_eq!(params["registrantFirstName"], json!("Jane"));
        assert_eq!(params["registrantEmailAddress"], json!("jane@example.com"));
        // None fields are skipped entirely, not emitted as nulls.
        assert!(!params.contains_key("registrantOrganizationName"));
    }

    #[test]
    fn test_dns_hosts_typed_from_envelope() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.dns.getHosts">
                <DomainDNSGetHostsResult Domain="example.com" IsUsingOurDNS="true" EmailType="FWD">
                  <Host HostId="10" Name="@" Type="A" Address="1.2.3.4" TTL="1800" MXPref="10" IsActive="true" IsDDNSEnabled="false" />
                  <Host HostId="11" Name="www" Type="CNAME" Address="example.com." TTL="1800" MXPref="10" IsActive="true" IsDDNSEnabled="false" />
                  <Host HostId="12" Name="mail" Type="MX" Address="mx.example.com." TTL="3600" MXPref="20" IsActive="false" IsDDNSEnabled="false" />
                </DomainDNSGetHostsResult>
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        let result: DnsHostsResult =
            serde_json::from_value(payload["domainDNSGetHostsResult"].clone()).unwrap();

        assert_eq!(result.domain, "example.com");
        assert!(result.is_using_our_dns);
        assert_eq!(result.host.len(), 3);
        assert_eq!(result.host[0].ttl, 1800);
        assert_eq!(result.host[2].mx_pref, Some(20));
        assert_eq!(result.host[1].record_type, "CNAME");
        assert!(!result.host[2].is_active);
    }

    #[test]
    fn test_single_host_still_deserializes_as_sequence() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.dns.getHosts">
                <DomainDNSGetHostsResult Domain="example.com" IsUsingOurDNS="true">
                  <Host HostId="10" Name="@" Type="A" Address="1.2.3.4" TTL="1800" IsActive="true" IsDDNSEnabled="false" />
                </DomainDNSGetHostsResult>
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        let result: DnsHostsResult =
            serde_json::from_value(payload["domainDNSGetHostsResult"].clone()).unwrap();
        assert_eq!(result.host.len(), 1);
        assert_eq!(result.host[0].name, "@");
        assert_eq!(result.host[0].mx_pref, None);
    }

    #[test]
    fn test_email_forwarding_typed_from_envelope() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.dns.getEmailForwarding">
                <DomainDNSGetEmailForwardingResult Domain="example.com">
                  <Forward mailbox="info">one@example.org</Forward>
                  <Forward mailbox="sales">two@example.org</Forward>
                </DomainDNSGetEmailForwardingResult>
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        let result: EmailForwardingResult =
            serde_json::from_value(payload["domainDNSGetEmailForwardingResult"].clone()).unwrap();
        assert_eq!(result.forward.len(), 2);
        assert_eq!(result.forward[0].mailbox, "info");
        assert_eq!(result.forward[1].forward_to.as_deref(), Some("two@example.org"));
    }

    #[test]
    fn test_ns_create_typed_from_envelope() {
        let xml = r#"
            <ApiResponse Status="OK">
              <Errors />
              <CommandResponse Type="namecheap.domains.ns.create">
                <DomainNSCreateResult Domain="example.com" Nameserver="ns1.example.com" IP="216.239.32.10" IsSuccess="true" />
              </CommandResponse>
            </ApiResponse>"#;

        let payload = unwrap_envelope(parse_response(xml).unwrap()).unwrap();
        let result: NsCreateResult =
            serde_json::from_value(payload["domainNSCreateResult"].clone()).unwrap();
        assert_eq!(result.ip, "216.239.32.10");
        assert!(result.is_success);
    }
}
