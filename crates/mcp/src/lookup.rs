//! Postal-code lookup against the ViaCEP API.

use std::time::Duration;

use cepnet_common::{CepnetError, Result, mark};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

pub const DEFAULT_VIACEP_URL: &str = "https://viacep.com.br";

const NOT_PROVIDED: &str = "⚠️ Not provided";

/// Reduce `raw` to its digits, requiring exactly eight of them.
pub fn normalize_postal_code(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 8 {
        return Err(CepnetError::InvalidPostalCode(raw.to_string()));
    }
    Ok(digits)
}

/// Address fields as returned by ViaCEP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub cep: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub ddd: Option<String>,
}

fn or_not_provided(field: &Option<String>) -> &str {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => NOT_PROVIDED,
    }
}

impl AddressRecord {
    /// The text block handed to specialists and to the LLM.
    pub fn render(&self) -> String {
        format!(
            "📍 **Postal code found: {}**\n\
             🛣️ **Street:** {}\n\
             🏘️ **Neighborhood:** {}\n\
             🏙️ **City:** {}\n\
             🗺️ **State:** {}\n\
             📮 **Area code:** {}\n\
             ✅ **Lookup performed via ViaCEP**",
            or_not_provided(&self.cep),
            or_not_provided(&self.logradouro),
            or_not_provided(&self.bairro),
            or_not_provided(&self.localidade),
            or_not_provided(&self.uf),
            or_not_provided(&self.ddd),
        )
    }
}

/// ViaCEP answers 200 with `{"erro": true}` (or `"true"`) for unknown codes.
fn is_not_found(body: &Value) -> bool {
    match body.get("erro") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Lookup client; the HTTP client is built on first use and then shared.
pub struct PostalLookup {
    base_url: String,
    timeout: Duration,
    http: OnceCell<reqwest::Client>,
}

impl PostalLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            http: OnceCell::new(),
        }
    }

    fn http(&self) -> Result<&reqwest::Client> {
        self.http.get_or_try_init(|| {
            debug!(timeout = ?self.timeout, "Building lookup HTTP client");
            reqwest::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| CepnetError::Upstream(e.to_string()))
        })
    }

    /// Look up `raw`, which may carry punctuation around its eight digits.
    pub async fn lookup(&self, raw: &str) -> Result<AddressRecord> {
        let digits = normalize_postal_code(raw)?;
        info!(postal_code = %digits, "Looking up postal code");

        let url = format!("{}/ws/{}/json/", self.base_url, digits);
        let response = self
            .http()?
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CepnetError::Upstream(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| CepnetError::Upstream(e.to_string()))?;

        if is_not_found(&body) {
            return Err(CepnetError::NotFound(digits));
        }

        let mut record: AddressRecord =
            serde_json::from_value(body).map_err(|e| CepnetError::Upstream(e.to_string()))?;
        if record.cep.as_deref().is_none_or(|c| c.trim().is_empty()) {
            record.cep = Some(digits);
        }

        info!(
            city = record.localidade.as_deref().unwrap_or_default(),
            state = record.uf.as_deref().unwrap_or_default(),
            "Postal code found"
        );
        Ok(record)
    }

    /// Lookup rendered as text; failures come back as marked text.
    pub async fn consult(&self, raw: &str) -> String {
        match self.lookup(raw).await {
            Ok(record) => record.render(),
            Err(e) => {
                warn!(input = %raw, error = %e, "Postal code lookup failed");
                mark(e)
            }
        }
    }
}
