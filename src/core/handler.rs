use crate::domain::model::{CalculationResult, FetchOutcome};
use crate::domain::ports::{ApiClient, OutputSink};
use crate::utils::error::{CalcError, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// Coerce a raw form-field value to a number: empty or whitespace-only input
/// is 0, anything non-numeric is NaN.
pub fn coerce_operand(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Render the service payload as the answer line, e.g. `2 + 3 = 5`.
pub fn format_answer(result: &CalculationResult) -> String {
    format!(
        "{} {} {} = {}",
        result.a, result.operator, result.b, result.answer
    )
}

/// Wires one click handler to a request client and an output sink. Built once
/// at startup; `handle_click` may be invoked any number of times, including
/// while an earlier invocation is still awaiting its response.
pub struct AddHandler<C: ApiClient, S: OutputSink> {
    client: C,
    sink: S,
    base_url: Url,
    generation: AtomicU64,
}

impl<C: ApiClient, S: OutputSink> AddHandler<C, S> {
    pub fn new(client: C, sink: S, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(CalcError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot serve as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            sink,
            base_url,
            generation: AtomicU64::new(0),
        })
    }

    /// One click: read the two operand fields, call the addition endpoint,
    /// and write the formatted answer to the sink.
    ///
    /// Returns the displayed text, or `None` when nothing was written: the
    /// fetch failed (logged, display left unchanged) or a newer click already
    /// owns the display.
    pub async fn handle_click(&self, raw_a: &str, raw_b: &str) -> Result<Option<String>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let a = coerce_operand(raw_a);
        let b = coerce_operand(raw_b);
        tracing::debug!(a, b, generation, "operands read");

        let url = self.build_add_url(a, b)?;
        tracing::debug!(%url, "requesting addition");

        match self.client.get_json(&url).await {
            FetchOutcome::Payload(result) => {
                let text = format_answer(&result);
                // Only the newest click may update the display.
                if self.generation.load(Ordering::SeqCst) == generation {
                    self.sink.write_text(&text);
                    Ok(Some(text))
                } else {
                    tracing::debug!(generation, "stale response discarded");
                    Ok(None)
                }
            }
            FetchOutcome::Failed(err) => {
                tracing::warn!(error = %err, "addition request failed, display unchanged");
                Ok(None)
            }
        }
    }

    fn build_add_url(&self, a: f64, b: f64) -> Result<Url> {
        let endpoint = format!("{}/add", self.base_url.as_str().trim_end_matches('/'));
        let url = Url::parse_with_params(&endpoint, &[("a", a.to_string()), ("b", b.to_string())])?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct FixedClient {
        payload: CalculationResult,
    }

    #[async_trait]
    impl ApiClient for FixedClient {
        async fn get_json(&self, _url: &Url) -> FetchOutcome {
            FetchOutcome::Payload(self.payload.clone())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        last: Arc<Mutex<Option<String>>>,
    }

    impl RecordingSink {
        fn last_text(&self) -> Option<String> {
            self.last.lock().unwrap().clone()
        }
    }

    impl OutputSink for RecordingSink {
        fn write_text(&self, text: &str) {
            *self.last.lock().unwrap() = Some(text.to_string());
        }
    }

    fn handler_with_payload(
        payload: CalculationResult,
    ) -> (AddHandler<FixedClient, RecordingSink>, RecordingSink) {
        let sink = RecordingSink::default();
        let handler = AddHandler::new(
            FixedClient { payload },
            sink.clone(),
            "http://localhost:5000/calculator",
        )
        .unwrap();
        (handler, sink)
    }

    #[test]
    fn test_coerce_operand() {
        assert_eq!(coerce_operand("2"), 2.0);
        assert_eq!(coerce_operand("-4"), -4.0);
        assert_eq!(coerce_operand("2.5"), 2.5);
        assert_eq!(coerce_operand(" 7 "), 7.0);
        assert_eq!(coerce_operand(""), 0.0);
        assert_eq!(coerce_operand("   "), 0.0);
        assert!(coerce_operand("abc").is_nan());
        assert!(coerce_operand("1x2").is_nan());
    }

    #[test]
    fn test_format_answer_uses_payload_fields() {
        let result = CalculationResult {
            a: 2.0,
            b: 3.0,
            operator: "+".to_string(),
            answer: 5.0,
        };
        assert_eq!(format_answer(&result), "2 + 3 = 5");

        let fractional = CalculationResult {
            a: 2.5,
            b: 0.5,
            operator: "+".to_string(),
            answer: 3.0,
        };
        assert_eq!(format_answer(&fractional), "2.5 + 0.5 = 3");
    }

    #[test]
    fn test_build_add_url_embeds_numbers_intact() {
        let (handler, _sink) = handler_with_payload(CalculationResult {
            a: 0.0,
            b: 0.0,
            operator: "+".to_string(),
            answer: 0.0,
        });

        let url = handler.build_add_url(-4.0, 10.0).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/calculator/add?a=-4&b=10"
        );

        let nan_url = handler.build_add_url(f64::NAN, 1.0).unwrap();
        assert_eq!(nan_url.query(), Some("a=NaN&b=1"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_tolerated() {
        let handler = AddHandler::new(
            FixedClient {
                payload: CalculationResult {
                    a: 0.0,
                    b: 0.0,
                    operator: "+".to_string(),
                    answer: 0.0,
                },
            },
            RecordingSink::default(),
            "http://localhost:5000/calculator/",
        )
        .unwrap();

        let url = handler.build_add_url(1.0, 2.0).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/calculator/add?a=1&b=2");
    }

    #[test]
    fn test_new_rejects_non_base_url() {
        let result = AddHandler::new(
            FixedClient {
                payload: CalculationResult {
                    a: 0.0,
                    b: 0.0,
                    operator: "+".to_string(),
                    answer: 0.0,
                },
            },
            RecordingSink::default(),
            "mailto:someone@example.com",
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_handle_click_writes_formatted_answer() {
        let (handler, sink) = handler_with_payload(CalculationResult {
            a: 2.0,
            b: 3.0,
            operator: "+".to_string(),
            answer: 5.0,
        });

        let shown = handler.handle_click("2", "3").await.unwrap();

        assert_eq!(shown.as_deref(), Some("2 + 3 = 5"));
        assert_eq!(sink.last_text().as_deref(), Some("2 + 3 = 5"));
    }
}
