//! Demo tools with simulated data: stock price and current weather.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

use crate::error::ToolError;
use crate::tool_source::registry::Tool;

/// Conditions `get_current_weather` picks from.
pub const WEATHER_CONDITIONS: [&str; 8] = [
    "Clear",
    "Partly Cloudy",
    "Cloudy",
    "Light Rain",
    "Heavy Rain",
    "Thunderstorm",
    "Snow",
    "Fog",
];

fn string_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::ValidationFailed(format!("missing or non-string '{}'", key)))
}

/// `fetch_stock_price(symbol)`: a simulated quote between roughly $0.95 and $1050.
#[derive(Debug, Default)]
pub struct FetchStockPriceTool;

impl FetchStockPriceTool {
    /// Base price uniform in [1, 1000], then a ±5% fluctuation.
    fn quote(symbol: &str) -> String {
        let mut rng = rand::thread_rng();
        let base: f64 = rng.gen_range(1.0..=1000.0);
        let fluctuation: f64 = rng.gen_range(-0.05..=0.05);
        let price = base * (1.0 + fluctuation);
        format!("The current price of {} is ${:.2}", symbol, price)
    }
}

#[async_trait]
impl Tool for FetchStockPriceTool {
    fn name(&self) -> &str {
        "fetch_stock_price"
    }

    fn description(&self) -> &str {
        "Fetch the current stock price for a given symbol."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "symbol": { "type": "string", "description": "Ticker symbol, e.g. ABC" }
            },
            "required": ["symbol"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let symbol = string_arg(&args, "symbol")?;
        Ok(Value::String(Self::quote(symbol)))
    }
}

/// `get_current_weather(location)`: a simulated multi-line weather report.
#[derive(Debug, Default)]
pub struct CurrentWeatherTool;

impl CurrentWeatherTool {
    fn report(location: &str) -> String {
        let mut rng = rand::thread_rng();
        let temperature: i32 = rng.gen_range(-10..=40);
        let condition = WEATHER_CONDITIONS.choose(&mut rng).copied().unwrap_or("Clear");
        let humidity: u32 = rng.gen_range(30..=90);
        let wind_speed: u32 = rng.gen_range(0..=30);
        format!(
            "Current weather in {}:\n- Condition: {}\n- Temperature: {}°C\n- Humidity: {}%\n- Wind Speed: {} km/h",
            location, condition, temperature, humidity, wind_speed
        )
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn name(&self) -> &str {
        "get_current_weather"
    }

    fn description(&self) -> &str {
        "Get the current weather for a given location."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "location": { "type": "string", "description": "City or place name" }
            },
            "required": ["location"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let location = string_arg(&args, "location")?;
        Ok(Value::String(Self::report(location)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stock_price_format_and_range() {
        for _ in 0..50 {
            let out = FetchStockPriceTool
                .execute(serde_json::json!({"symbol": "ABC"}))
                .await
                .unwrap();
            let text = out.as_str().unwrap();
            let price: f64 = text
                .strip_prefix("The current price of ABC is $")
                .unwrap()
                .parse()
                .unwrap();
            assert!((0.94..=1050.01).contains(&price), "{}", text);
            assert_eq!(text.rsplit('.').next().unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn weather_report_fields_in_range() {
        let out = CurrentWeatherTool
            .execute(serde_json::json!({"location": "Lisbon"}))
            .await
            .unwrap();
        let text = out.as_str().unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Current weather in Lisbon:");
        let condition = lines[1].strip_prefix("- Condition: ").unwrap();
        assert!(WEATHER_CONDITIONS.contains(&condition));
        let temp: i32 = lines[2]
            .strip_prefix("- Temperature: ")
            .and_then(|s| s.strip_suffix("°C"))
            .unwrap()
            .parse()
            .unwrap();
        assert!((-10..=40).contains(&temp));
        let humidity: u32 = lines[3]
            .strip_prefix("- Humidity: ")
            .and_then(|s| s.strip_suffix('%'))
            .unwrap()
            .parse()
            .unwrap();
        assert!((30..=90).contains(&humidity));
        let wind: u32 = lines[4]
            .strip_prefix("- Wind Speed: ")
            .and_then(|s| s.strip_suffix(" km/h"))
            .unwrap()
            .parse()
            .unwrap();
        assert!(wind <= 30);
    }

    #[tokio::test]
    async fn missing_argument_is_validation_error() {
        let err = CurrentWeatherTool
            .execute(serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ValidationFailed(_)));
    }
}
