//! Telemetry sample wire format and card formatting.

use crate::ui::render::TelemetryCard;
use serde::{Deserialize, Deserializer};

/// One environment sample pushed by the publisher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TelemetrySample {
    pub time: String,
    #[serde(deserialize_with = "number_or_string")]
    pub temp: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub signal: f64,
    pub nodes: i64,
}

impl TelemetrySample {
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// `Temp 21.5°C · Signal 87% · Nodes 4`
    ///
    /// Ties round away from zero (`21.25` shows as `21.3`).
    pub fn summary(&self) -> String {
        format!(
            "Temp {:.1}°C · Signal {:.0}% · Nodes {}",
            round_half_away(self.temp, 1),
            round_half_away(self.signal, 0),
            self.nodes
        )
    }

    pub fn to_card(&self) -> TelemetryCard {
        TelemetryCard::Sample {
            time: self.time.clone(),
            summary: self.summary(),
        }
    }
}

fn round_half_away(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// The publisher formats floats as strings; accept either representation.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| serde::de::Error::custom(format!("invalid number `{text}`: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_encoded_floats() {
        let sample = TelemetrySample::parse(
            r#"{"time":"2024-05-01T10:00:00Z","temp":"21.46","signal":"87","nodes":4}"#,
        )
        .unwrap();
        assert_eq!(sample.temp, 21.46);
        assert_eq!(sample.summary(), "Temp 21.5°C · Signal 87% · Nodes 4");
    }

    #[test]
    fn parses_numeric_floats() {
        let sample =
            TelemetrySample::parse(r#"{"time":"t","temp":20,"signal":99.6,"nodes":7}"#).unwrap();
        assert_eq!(sample.summary(), "Temp 20.0°C · Signal 100% · Nodes 7");
        assert_eq!(
            sample.to_card(),
            TelemetryCard::Sample {
                time: "t".to_string(),
                summary: "Temp 20.0°C · Signal 100% · Nodes 7".to_string(),
            }
        );
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(TelemetrySample::parse("not json").is_err());
        assert!(
            TelemetrySample::parse(r#"{"time":"t","temp":"hot","signal":1,"nodes":1}"#).is_err()
        );
        assert!(TelemetrySample::parse(r#"{"time":"t","temp":1,"signal":1}"#).is_err());
    }

    #[test]
    fn ties_round_away_from_zero() {
        let sample =
            TelemetrySample::parse(r#"{"time":"t","temp":21.25,"signal":86.5,"nodes":3}"#)
                .unwrap();
        assert_eq!(sample.summary(), "Temp 21.3°C · Signal 87% · Nodes 3");

        let low =
            TelemetrySample::parse(r#"{"time":"t","temp":"-0.25","signal":0.5,"nodes":0}"#)
                .unwrap();
        assert_eq!(low.summary(), "Temp -0.3°C · Signal 1% · Nodes 0");
    }
}
