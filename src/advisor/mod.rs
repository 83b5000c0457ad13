//! Language-model packing advisor
//!
//! Builds a prompt from the computed weather and air reports, sends it to a
//! completion service and parses a checklist out of the answer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ApiKey;
use crate::models::{AirReport, WeatherReport};
use crate::{Result, TripcastError};

pub mod openai;
pub mod parser;

pub use openai::OpenAiClient;
pub use parser::{CompletionParser, LenientParser, PackingSuggestions, StrictParser};

/// A remote text-completion service
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a single user prompt and return the raw text answer
    async fn complete(&self, prompt: &str, key: &ApiKey) -> Result<String>;
}

/// Parser matching the configured strictness
#[must_use]
pub fn parser_for(strict: bool) -> Arc<dyn CompletionParser> {
    if strict {
        Arc::new(StrictParser)
    } else {
        Arc::new(LenientParser)
    }
}

/// Prompt asking for a JSON packing checklist for the given reports
pub fn build_prompt(weather: &WeatherReport, air: &AirReport) -> Result<String> {
    let weather_json = serde_json::to_string(weather)
        .map_err(|e| TripcastError::general(format!("Failed to encode weather report: {e}")))?;
    let air_json = serde_json::to_string(air)
        .map_err(|e| TripcastError::general(format!("Failed to encode air report: {e}")))?;

    Ok(format!(
        "You are a concise travel assistant. Given the daily weather and air quality for the \
         next 3 days, write a short packing checklist (6-10 items) and a short rationale. \
         Only if air quality is very poor (AQI > 3), include a precaution. \
         Reply with JSON only, using the keys {{\"checklist\": string[], \"notes\": string}}.\n\n\
         Weather: {weather_json}\n\nAir: {air_json}"
    ))
}

/// Ask the model for packing suggestions and parse its answer
pub async fn suggest_packing(
    model: &dyn LanguageModel,
    parser: &dyn CompletionParser,
    weather: &WeatherReport,
    air: &AirReport,
    key: &ApiKey,
) -> Result<PackingSuggestions> {
    let prompt = build_prompt(weather, air)?;
    let text = model.complete(&prompt, key).await?;
    debug!("Completion for {} is {} bytes", weather.city, text.len());
    parser.parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyAirSummary, DailyWeather, PackingAdvice, PackingCategory, Place};
    use std::sync::Mutex;

    struct EchoModel {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for EchoModel {
        async fn complete(&self, prompt: &str, _: &ApiKey) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.answer.clone())
        }
    }

    fn reports() -> (WeatherReport, AirReport) {
        let place = Place::new(53.35, -6.26, "Dublin".to_string(), Some("IE".to_string()));
        let weather = WeatherReport::new(
            &place,
            vec![DailyWeather::placeholder("2024-01-15")],
            PackingAdvice {
                umbrella: true,
                packing: PackingCategory::Cold,
                mean_temp_c: Some(5.0),
            },
        );
        let air = AirReport::new(
            &place,
            vec![DailyAirSummary {
                day: "2024-01-15".to_string(),
                aqi_max: 4,
                alerts: Vec::new(),
            }],
        );
        (weather, air)
    }

    fn key() -> ApiKey {
        ApiKey::parse(Some("test-openai-key"), "OPENAI_API_KEY").unwrap()
    }

    #[test]
    fn test_prompt_embeds_reports() {
        let (weather, air) = reports();
        let prompt = build_prompt(&weather, &air).unwrap();
        assert!(prompt.contains("6-10 items"));
        assert!(prompt.contains("AQI > 3"));
        assert!(prompt.contains("\"city\":\"Dublin\""));
        assert!(prompt.contains("\"aqi_max\":4"));
        assert!(prompt.contains("\"packing\":\"Cold\""));
    }

    #[tokio::test]
    async fn test_suggest_packing_parses_answer() {
        let model = EchoModel {
            answer: "```json\n{\"checklist\": [\"Umbrella\"], \"notes\": \"Wet\"}\n```".to_string(),
            prompts: Mutex::new(Vec::new()),
        };
        let (weather, air) = reports();

        let suggestions = suggest_packing(&model, &LenientParser, &weather, &air, &key())
            .await
            .unwrap();

        assert_eq!(suggestions.checklist, ["Umbrella"]);
        assert_eq!(suggestions.notes, "Wet");
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_parser_strictness_is_configurable() {
        let model = EchoModel {
            answer: "Bring a coat.".to_string(),
            prompts: Mutex::new(Vec::new()),
        };
        let (weather, air) = reports();

        let lenient = parser_for(false);
        let ok = suggest_packing(&model, lenient.as_ref(), &weather, &air, &key()).await;
        assert_eq!(ok.unwrap().notes, "Bring a coat.");

        let strict = parser_for(true);
        let err = suggest_packing(&model, strict.as_ref(), &weather, &air, &key()).await;
        assert!(err.is_err());
    }
}
