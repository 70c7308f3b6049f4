use chrono::NaiveTime;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;

use crate::ShiftId;

/// Reference data for a named shift, e.g. "Ca sáng 06:00-12:00".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDefinition
{
    id: ShiftId,
    name: String,
    #[serde(with = "clock_time")]
    start_time: NaiveTime,
    #[serde(with = "clock_time")]
    end_time: NaiveTime,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

fn active_by_default() -> bool
{
    true
}

impl ShiftDefinition
{
    pub fn new(id: ShiftId, name: impl Into<String>, start_time: NaiveTime, end_time: NaiveTime, is_active: bool) -> Self
    {
        Self {
            id,
            name: name.into(),
            start_time,
            end_time,
            is_active,
        }
    }

    pub fn id(&self) -> ShiftId
    {
        self.id
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    pub fn start_time(&self) -> NaiveTime
    {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime
    {
        self.end_time
    }

    pub fn is_active(&self) -> bool
    {
        self.is_active
    }

    /// Length of the shift. A shift whose end is not after its start runs
    /// past midnight, so a full day is added.
    pub fn duration(&self) -> TimeDelta
    {
        let delta = self.end_time - self.start_time;
        if delta <= TimeDelta::zero() { delta + TimeDelta::days(1) } else { delta }
    }
}

/// The shift fields the assignment source embeds next to an assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary
{
    pub id: ShiftId,
    pub name: String,
}

/// `NaiveTime` on the wire as `HH:MM`. `HH:MM:SS` is accepted when reading
/// because the backend returns both.
pub mod clock_time
{
    use chrono::NaiveTime;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;
    use serde::de::Error;

    const SHORT_FORMAT: &str = "%H:%M";
    const LONG_FORMAT: &str = "%H:%M:%S%.f";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(SHORT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, LONG_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, SHORT_FORMAT))
            .map_err(|e| D::Error::custom(format!("invalid clock time `{raw}`: {e}")))
    }
}
