use serde::Deserialize;
use tracing::warn;

use crate::pcs::tools::error::Result;
use crate::pcs::tools::model::{SeriesItem, YearWindow};

/// Production host of the Cidades Sustentáveis platform.
pub const BASE_URL: &str = "https://www.cidadessustentaveis.org.br";

/// Identifier of the municipality whose indicators are exported.
pub const CITY_ID: u32 = 3981;

/// Thin client over the two read-only endpoints the export consumes.
///
/// Fetch failures are logged and converted into sentinel values (an empty
/// metadata string, a missing series) so one unreachable indicator never
/// aborts the rest of the export.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client pointed at the production platform.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Creates a client against an alternative host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the raw `meta` string attached to an indicator.
    ///
    /// Returns an empty string when the request fails or the payload carries
    /// no metadata; the failure is logged with the indicator id.
    pub async fn fetch_target_meta(&self, indicator: &str) -> String {
        match self.try_fetch_target_meta(indicator).await {
            Ok(meta) => meta,
            Err(error) => {
                warn!(indicator, %error, "indicator metadata unavailable");
                String::new()
            }
        }
    }

    async fn try_fetch_target_meta(&self, indicator: &str) -> Result<String> {
        let url = format!(
            "{}/api/indicador/preenchidos/grafico/indicadores?indicador={indicator}&cidades={CITY_ID}&formulaidx=0",
            self.base_url
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let payload: MetaResponse = response.json().await?;
        Ok(payload.meta.unwrap_or_default())
    }

    /// Fetches the per-year series of every indicator of a goal for one year
    /// window.
    ///
    /// Returns `None` when the request fails or the payload cannot be
    /// decoded; the failure is logged with the goal and the window.
    pub async fn fetch_goal_series(&self, goal: u8, window: YearWindow) -> Option<Vec<SeriesItem>> {
        match self.try_fetch_goal_series(goal, window).await {
            Ok(items) => Some(items),
            Err(error) => {
                warn!(
                    goal,
                    start = window.start,
                    end = window.end,
                    %error,
                    "goal series unavailable"
                );
                None
            }
        }
    }

    async fn try_fetch_goal_series(
        &self,
        goal: u8,
        window: YearWindow,
    ) -> Result<Vec<SeriesItem>> {
        let url = format!(
            "{}/api/painel/indicadores?idOds={goal}&idCidade={CITY_ID}&anoInicial={}&anoFinal={}&indicadorPcs=true&indicadorComplementar=false&indicadorIndice=false",
            self.base_url, window.start, window.end
        );
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Envelope returned by the metadata endpoint; only `meta` is consumed.
#[derive(Debug, Deserialize)]
struct MetaResponse {
    meta: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pcs::tools::model::EARLY_WINDOW;

    #[tokio::test]
    async fn fetch_failures_collapse_to_sentinels() {
        // Reserved TLD, so resolution fails fast and deterministically.
        let client = ApiClient::with_base_url("http://pcs.invalid");

        assert_eq!(client.fetch_target_meta("101").await, "");
        assert!(client.fetch_goal_series(1, EARLY_WINDOW).await.is_none());
    }

    #[tokio::test]
    #[ignore] // hits the live Cidades Sustentáveis API
    async fn goal_series_endpoint_returns_rows() {
        let client = ApiClient::new();
        let series = client.fetch_goal_series(1, EARLY_WINDOW).await;
        assert!(series.is_some());
    }
}
