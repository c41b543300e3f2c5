//! # Namecheap SDK for Rust
//!
//! A typed async client for the Namecheap XML API: domain listing and
//! registration, availability checks, whois contacts, registrar locks, DNS
//! host records, email forwarding and nameserver management.
//!
//! The API answers every call with the same XML envelope; this crate decodes
//! it, camel-cases the keys, coerces string leaves to primitives, turns
//! repeated elements into sequences and hands back typed results.
//!
//! ## Quick Start
//!
//! ```no_run
//! use namecheap_sdk_rs::{Client, GlobalParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(GlobalParams {
//!         api_user: "apiuser".into(),
//!         api_key: "secret".into(),
//!         username: "apiuser".into(),
//!         client_ip: "203.0.113.7".into(),
//!     })?;
//!
//!     let hosts = client.get_dns_hosts("example.com").await?;
//!     for host in hosts.host {
//!         println!("{} {} -> {} (ttl {})", host.record_type, host.name, host.address, host.ttl);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod response;
pub mod transform;
pub mod transport;
pub mod xml;

// Re-exports
pub use client::Client;
pub use error::{NamecheapError, NcResult};
pub use models::{
    AckResult, CheckDomainsResponse, Command, Contact, ContactsResponse, CreateDomainResponse,
    DnsHost, DnsHostsResult, DnsListResult, DnsUpdateResult, DomainInfoResult,
    DomainRegistrationRequest, DomainsListRequest, DomainsListResponse, DomainsListSortBy,
    DomainsListType, EmailForwardingResult, GetInfoRequest, GlobalParams, LockAction,
    NsCreateResult, NsInfoResult, RegistrarLockStatus, SetContactsRequest, SetContactsResponse,
    TldListResponse, YesNo,
};
pub use transport::HttpClient;
