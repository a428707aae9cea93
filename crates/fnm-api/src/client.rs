//! Asynchronous FastNetMon appliance client.
//!
//! One client owns one authenticated HTTP session for its lifetime: the
//! connection pool is created at construction and released when the client
//! (and all clones) drop, on every exit path. Each method is a single
//! verb+path round trip through the appliance's response envelope; the
//! appliance stages writes until [`FnmClient::commit`] is called.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::models::{FlowSpecRule, HostGroup, HostGroupSettings};
use crate::Result;
use fnm_core::client::ClientConfig;
use fnm_core::config::ApplianceConfig;
use fnm_core::envelope::{Envelope, ListEnvelope};
use fnm_core::options::{GlobalOption, GlobalOptionKey, HostGroupOption, HostGroupOptionKey};
use fnm_core::uuid::MitigationUuid;
use fnm_core::Error;

const USER_AGENT: &str = concat!("fnm-api/", env!("CARGO_PKG_VERSION"));

/// Builder for [`FnmClient`].
#[derive(Debug, Clone)]
pub struct FnmClientBuilder {
    config: ApplianceConfig,
    http: ClientConfig,
}

impl FnmClientBuilder {
    /// Create a builder for the given appliance endpoint and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection settings fail validation.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self> {
        let config = ApplianceConfig::new(host, port, username, password)?;
        let http = ClientConfig::new().with_timeout(config.timeout());
        Ok(Self { config, http })
    }

    /// Create a builder from an existing configuration.
    #[must_use]
    pub fn from_config(config: ApplianceConfig) -> Self {
        let http = ClientConfig::new().with_timeout(config.timeout());
        Self { config, http }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, http: ClientConfig) -> Self {
        self.http = http;
        self
    }

    /// Build the client, opening its persistent session.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<FnmClient> {
        let base_url = self.config.base_url()?;

        let http = reqwest::Client::builder()
            .timeout(self.http.timeout)
            .pool_idle_timeout(self.http.pool_idle_timeout)
            .pool_max_idle_per_host(self.http.pool_max_idle_per_host)
            .gzip(self.http.enable_compression)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::from)?;

        Ok(FnmClient {
            http,
            base_url,
            username: self.config.username,
            password: self.config.password,
            log_requests: self.http.enable_logging,
        })
    }
}

/// Asynchronous client for the FastNetMon Advanced REST API.
#[derive(Clone)]
pub struct FnmClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
    log_requests: bool,
}

impl FnmClient {
    /// Construct a client directly from endpoint and credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection settings are invalid.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self> {
        FnmClientBuilder::new(host, port, username, password)?.build()
    }

    /// Return the appliance base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create a host group and stage its supplied settings.
    ///
    /// The appliance accepts one option per call, so every populated field
    /// of `settings` becomes its own PUT; list values (networks) become one
    /// call per element. Remember to [`commit`](Self::commit) afterwards.
    pub async fn create_host_group(
        &self,
        name: &str,
        settings: &HostGroupSettings,
    ) -> Result<()> {
        self.ack(Method::POST, &format!("/hostgroup/{name}")).await?;

        for option in settings.to_options() {
            self.set_host_group_option(name, &option).await?;
        }

        Ok(())
    }

    /// Remove a host group.
    pub async fn remove_host_group(&self, name: &str) -> Result<()> {
        self.ack(Method::DELETE, &format!("/hostgroup/{name}")).await
    }

    /// Fetch a single host group by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the appliance answers with an empty
    /// result sequence.
    pub async fn get_host_group(&self, name: &str) -> Result<HostGroup> {
        let response = self
            .request::<()>(Method::GET, &format!("/hostgroup/{name}"), None)
            .await?;
        let envelope: ListEnvelope<HostGroup> = Self::decode(response).await?;
        envelope.into_single(name)
    }

    /// List all host groups, in the order the appliance returns them.
    pub async fn get_host_groups(&self) -> Result<Vec<HostGroup>> {
        let response = self.request::<()>(Method::GET, "/hostgroup", None).await?;
        let envelope: ListEnvelope<HostGroup> = Self::decode(response).await?;
        envelope.into_values()
    }

    /// Stage a single host group option.
    pub async fn set_host_group_option(
        &self,
        host_group: &str,
        option: &HostGroupOption,
    ) -> Result<()> {
        let path = format!("/hostgroup/{host_group}/{}/{}", option.key(), option.value());
        self.ack(Method::PUT, &path).await
    }

    /// Remove a single host group option value.
    pub async fn remove_host_group_option(
        &self,
        host_group: &str,
        option: &HostGroupOption,
    ) -> Result<()> {
        let path = format!("/hostgroup/{host_group}/{}/{}", option.key(), option.value());
        self.ack(Method::DELETE, &path).await
    }

    /// Read a host group option.
    ///
    /// Returns the decoded envelope verbatim after the success check; the
    /// payload shape varies by option kind and firmware version.
    pub async fn get_host_group_option(
        &self,
        host_group: &str,
        option: impl Into<HostGroupOptionKey>,
    ) -> Result<serde_json::Value> {
        let path = format!("/hostgroup/{host_group}/{}", option.into().key());
        self.fetch_raw(&path).await
    }

    /// Stage a global appliance option.
    pub async fn set_option(&self, option: &GlobalOption) -> Result<()> {
        let path = format!("/main/{}/{}", option.key(), option.value());
        self.ack(Method::PUT, &path).await
    }

    /// Remove a global appliance option value.
    pub async fn remove_option(&self, option: &GlobalOption) -> Result<()> {
        let path = format!("/main/{}/{}", option.key(), option.value());
        self.ack(Method::DELETE, &path).await
    }

    /// Read a global appliance option.
    ///
    /// Returns the decoded envelope verbatim after the success check.
    pub async fn get_option(
        &self,
        option: impl Into<GlobalOptionKey>,
    ) -> Result<serde_json::Value> {
        let path = format!("/main/{}", option.into().key());
        self.fetch_raw(&path).await
    }

    /// Apply all staged configuration changes.
    ///
    /// The appliance holds every write in a pending state until this call;
    /// nothing takes effect without it.
    pub async fn commit(&self) -> Result<()> {
        self.ack(Method::PUT, "/commit").await
    }

    /// Announce a FlowSpec rule.
    pub async fn add_flow_spec_rule(&self, rule: &FlowSpecRule) -> Result<()> {
        let response = self.request(Method::PUT, "/flowspec", Some(rule)).await?;
        Self::decode::<Envelope>(response).await?.into_result()
    }

    /// List the FlowSpec rules announced under a mitigation.
    pub async fn get_flow_spec_rules(
        &self,
        mitigation_uuid: MitigationUuid,
    ) -> Result<Vec<FlowSpecRule>> {
        let response = self
            .request::<()>(Method::GET, &format!("/flowspec/{mitigation_uuid}"), None)
            .await?;
        let envelope: ListEnvelope<FlowSpecRule> = Self::decode(response).await?;
        envelope.into_values()
    }

    /// Withdraw the FlowSpec rules of a mitigation.
    pub async fn remove_flow_spec_rule(&self, mitigation_uuid: MitigationUuid) -> Result<()> {
        self.ack(Method::DELETE, &format!("/flowspec/{mitigation_uuid}"))
            .await
    }

    async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base_url.join(path)?;
        if self.log_requests {
            debug!(%method, %url, "appliance request");
        }

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header("Accept", "application/json");
        if let Some(payload) = body {
            request = request.json(payload);
        }

        request.send().await.map_err(Error::from)
    }

    /// Issue a request whose reply carries no payload beyond the envelope.
    async fn ack(&self, method: Method, path: &str) -> Result<()> {
        let response = self.request::<()>(method, path, None).await?;
        Self::decode::<Envelope>(response).await?.into_result()
    }

    /// Issue a GET and return the decoded envelope verbatim after the
    /// success check.
    async fn fetch_raw(&self, path: &str) -> Result<serde_json::Value> {
        let response = self.request::<()>(Method::GET, path, None).await?;
        let value: serde_json::Value = Self::decode(response).await?;

        let envelope: Envelope = serde_json::from_value(value.clone())?;
        envelope.into_result()?;

        Ok(value)
    }

    async fn decode<T>(response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await.map_err(Error::from)?;

        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(Error::from)
    }
}
