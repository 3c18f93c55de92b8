//! Scan orchestration: prompt -> grounded completion -> normalized analysis

use anyhow::Result;
use niftyscan_core::{MarketAnalysis, MarketIndex, STRATEGIST_SYSTEM, normalize, scan_prompt};
use niftyscan_llm::{GroundedProvider, GroundingRequest};
use tracing::info;

/// Parameters for one scan request
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub model: String,
    pub temperature: f32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
        }
    }
}

/// Run one scan against the completion service
///
/// Transport failures and unparseable payloads both surface here as
/// errors; the caller renders a single failure banner and shows no partial
/// results. Scans are strictly sequential: the next one starts only after
/// this future resolves.
pub async fn run_scan(
    provider: &dyn GroundedProvider,
    index: MarketIndex,
    options: &ScanOptions,
) -> Result<MarketAnalysis> {
    let prompt = scan_prompt(index)?;

    let request = GroundingRequest::builder(&options.model)
        .prompt(prompt)
        .system(STRATEGIST_SYSTEM)
        .temperature(options.temperature)
        .web_search(true)
        .build();

    info!(index = %index, model = %options.model, "Scanning market");
    let response = provider.generate(request).await?;

    let analysis = normalize(&response.text, &response.citations)?;
    info!(
        setups = analysis.stocks.len(),
        sources = analysis.source_urls.len(),
        "Scan complete"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use niftyscan_core::{Citation, ParseError, Sentiment};
    use niftyscan_llm::{GroundedResponse, LLMError};

    /// Canned collaborator so the pipeline runs without a network
    struct CannedProvider {
        text: String,
        citations: Vec<Citation>,
    }

    #[async_trait]
    impl GroundedProvider for CannedProvider {
        async fn generate(
            &self,
            _request: GroundingRequest,
        ) -> niftyscan_llm::Result<GroundedResponse> {
            Ok(GroundedResponse {
                text: self.text.clone(),
                citations: self.citations.clone(),
            })
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl GroundedProvider for FailingProvider {
        async fn generate(
            &self,
            _request: GroundingRequest,
        ) -> niftyscan_llm::Result<GroundedResponse> {
            Err(LLMError::RequestFailed("connection reset".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_scan_pipeline_with_canned_fixture() {
        let provider = CannedProvider {
            text: concat!(
                "Here is my analysis for today.\n",
                "```json\n",
                "{\"marketSentiment\": \"BULLISH\", \"overallSummary\": \"Buy dips.\",\n",
                " \"stocks\": [{\"symbol\": \"SBIN\", \"recommendation\": \"BUY\"}]}\n",
                "```\n"
            )
            .to_string(),
            citations: vec![Citation {
                title: None,
                uri: Some("https://example.com/live".to_string()),
            }],
        };

        let analysis = run_scan(&provider, MarketIndex::Nifty50, &ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(analysis.market_sentiment, Sentiment::Bullish);
        assert_eq!(analysis.stocks[0].symbol, "SBIN");
        assert_eq!(analysis.source_urls[0].title, "Source");
    }

    #[tokio::test]
    async fn test_transport_and_parse_failures_stay_distinguishable() {
        let options = ScanOptions::default();

        let err = run_scan(&FailingProvider, MarketIndex::Nifty50, &options)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<LLMError>().is_some());

        let provider = CannedProvider {
            text: "The market looks choppy, no setups today.".to_string(),
            citations: Vec::new(),
        };
        let err = run_scan(&provider, MarketIndex::Nifty50, &options)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::NoStructuredData)
        ));
    }
}
