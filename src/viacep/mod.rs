use color_eyre::eyre::WrapErr;
use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use crate::config::Config;
use crate::viacep::model::{LookupOutcome, PostalCode};

mod extract;
pub mod model;

const UA: &str = concat!("cep-lookup/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the ViaCEP web service
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let mut builder = Client::builder()
            .default_headers(Self::default_headers());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(
            Self {
                client: builder.build()?,
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }
        )
    }

    fn default_headers() -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(USER_AGENT, HeaderValue::from_static(UA));
        map
    }

    /// the code is embedded as-is, the service is left to reject malformed codes
    fn lookup_url(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code)
    }

    /// Look up one postal code with a single request.
    ///
    /// Never returns an error: transport problems become [`LookupOutcome::Failed`].
    #[tracing::instrument(skip_all, fields(code = %code))]
    pub async fn lookup(&self, code: &PostalCode) -> LookupOutcome {
        match self.fetch_body(&self.lookup_url(code)).await {
            Ok(body) => {
                let outcome = extract::classify(&body);
                debug!("[{}] classified as {}", code, if outcome.is_found() { "found" } else { "not found" });
                outcome
            }
            Err(e) => {
                warn!("cannot look up [{}]: {:#}", code, e);
                LookupOutcome::Failed(e)
            }
        }
    }

    /// get the whole body as one string, line breaks dropped
    async fn fetch_body(&self, url: &str) -> color_eyre::Result<String> {
        debug!("GET {}", url);
        let resp = self.client
            .get(url)
            .send()
            .await
            .wrap_err_with(|| format!("request to {} failed", url))?;
        debug!("{} responded with {}", url, resp.status());
        let text = resp
            .error_for_status()?
            .text()
            .await
            .wrap_err("cannot read response body")?;
        Ok(text.lines().collect())
    }
}
