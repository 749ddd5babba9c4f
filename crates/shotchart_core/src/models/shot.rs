//! Shot event record as ingested from per-season-per-team JSON files.
//!
//! Field names mirror the NBA stats export schema (upper-snake keys), with
//! the on-court context arrays added by the fetch tooling. `elapsed_min` is
//! derived once at ingestion by the clock model and is not part of the wire
//! schema.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Point value class of a shot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotValue {
    TwoPoint,
    ThreePoint,
}

impl ShotValue {
    pub fn is_three(self) -> bool {
        matches!(self, ShotValue::ThreePoint)
    }
}

impl Default for ShotValue {
    fn default() -> Self {
        ShotValue::TwoPoint
    }
}

/// One shot attempt. Immutable fact; cloned freely between contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    #[serde(rename = "PLAYER_ID")]
    pub player_id: u32,

    #[serde(rename = "PLAYER_NAME", default)]
    pub player_name: String,

    /// Court x in the stats coordinate system (-250..250, tenths of feet).
    #[serde(rename = "LOC_X")]
    pub loc_x: f32,

    /// Court y in the stats coordinate system (-47.5..422.5).
    #[serde(rename = "LOC_Y")]
    pub loc_y: f32,

    #[serde(
        rename = "SHOT_MADE_FLAG",
        deserialize_with = "flag_from_int",
        serialize_with = "flag_to_int"
    )]
    pub made: bool,

    #[serde(rename = "PERIOD")]
    pub period: u32,

    #[serde(rename = "MINUTES_REMAINING")]
    pub minutes_remaining: u32,

    #[serde(rename = "SECONDS_REMAINING")]
    pub seconds_remaining: u32,

    /// Free-text action description ("Driving Layup Shot", ...). Missing in
    /// some exports; aggregation treats `None` as "Unknown".
    #[serde(rename = "ACTION_TYPE", default)]
    pub action_type: Option<String>,

    /// Anything other than the literal "3PT Field Goal" counts as two points.
    #[serde(
        rename = "SHOT_TYPE",
        default,
        deserialize_with = "value_from_shot_type",
        serialize_with = "value_to_shot_type"
    )]
    pub value: ShotValue,

    #[serde(default)]
    pub teammates_on_court: Vec<u32>,

    #[serde(default)]
    pub opponents_on_court: Vec<u32>,

    /// Elapsed game minutes, attached once at ingestion (see `engine::clock`).
    #[serde(default)]
    pub elapsed_min: f32,
}

impl ShotRecord {
    /// Action text with the missing-value default applied.
    pub fn action_text(&self) -> &str {
        self.action_type.as_deref().unwrap_or("Unknown")
    }
}

fn flag_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(i64::deserialize(deserializer)? == 1)
}

fn flag_to_int<S>(made: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*made))
}

fn value_from_shot_type<'de, D>(deserializer: D) -> Result<ShotValue, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("3PT Field Goal") => ShotValue::ThreePoint,
        _ => ShotValue::TwoPoint,
    })
}

fn value_to_shot_type<S>(value: &ShotValue, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        ShotValue::TwoPoint => "2PT Field Goal",
        ShotValue::ThreePoint => "3PT Field Goal",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_schema() {
        let json = r#"{
            "PLAYER_ID": 2544,
            "PLAYER_NAME": "LeBron James",
            "LOC_X": -12.0,
            "LOC_Y": 45.5,
            "SHOT_MADE_FLAG": 1,
            "PERIOD": 2,
            "MINUTES_REMAINING": 3,
            "SECONDS_REMAINING": 42,
            "ACTION_TYPE": "Driving Layup Shot",
            "SHOT_TYPE": "2PT Field Goal",
            "teammates_on_court": [101, 102],
            "opponents_on_court": [201]
        }"#;

        let shot: ShotRecord = serde_json::from_str(json).unwrap();
        assert_eq!(shot.player_id, 2544);
        assert!(shot.made);
        assert_eq!(shot.value, ShotValue::TwoPoint);
        assert_eq!(shot.action_text(), "Driving Layup Shot");
        assert_eq!(shot.teammates_on_court, vec![101, 102]);
        // Not on the wire; attached at ingestion.
        assert_eq!(shot.elapsed_min, 0.0);
    }

    #[test]
    fn test_missing_optionals_default() {
        let json = r#"{
            "PLAYER_ID": 7,
            "LOC_X": 0.0,
            "LOC_Y": 0.0,
            "SHOT_MADE_FLAG": 0,
            "PERIOD": 1,
            "MINUTES_REMAINING": 11,
            "SECONDS_REMAINING": 59
        }"#;

        let shot: ShotRecord = serde_json::from_str(json).unwrap();
        assert!(!shot.made);
        assert_eq!(shot.action_text(), "Unknown");
        assert_eq!(shot.value, ShotValue::TwoPoint);
        assert!(shot.teammates_on_court.is_empty());
    }

    #[test]
    fn test_unrecognized_shot_type_is_two_point() {
        let json = r#"{
            "PLAYER_ID": 7,
            "LOC_X": 1.0,
            "LOC_Y": 1.0,
            "SHOT_MADE_FLAG": 1,
            "PERIOD": 1,
            "MINUTES_REMAINING": 0,
            "SECONDS_REMAINING": 30,
            "SHOT_TYPE": "Free Throw"
        }"#;

        let shot: ShotRecord = serde_json::from_str(json).unwrap();
        assert_eq!(shot.value, ShotValue::TwoPoint);
    }
}
