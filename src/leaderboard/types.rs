//! Leaderboard API Types - payloads of the Binance futures leaderboard endpoints

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decode a field that upstream may send null or with an unexpected type.
/// Anything that does not fit `T` becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

/// Envelope shared by every `bapi` response
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ApiEnvelope<T> {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<T>,
}

/// `getOtherPosition` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    /// Kept as raw JSON so it can be returned to the caller untouched
    #[serde(default, deserialize_with = "lenient")]
    pub other_position_ret_list: Option<Vec<Value>>,
}

/// `getOtherPerformance` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceData {
    #[serde(default, deserialize_with = "lenient")]
    performance_ret_list: Option<Vec<Value>>,
}

impl PerformanceData {
    /// Entries that are not objects are dropped
    pub fn into_samples(self) -> Vec<PerformanceSample> {
        self.performance_ret_list
            .unwrap_or_default()
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

/// `getOtherLeaderboardBaseInfo` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub nick_name: Option<String>,
}

/// Reporting window of a performance sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    Daily,
    Weekly,
    Monthly,
    All,
    #[default]
    #[serde(other)]
    Other,
}

/// Quantity a performance sample measures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatisticsType {
    Roi,
    Pnl,
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of `performanceRetList`.
///
/// Null or mistyped fields fall back to `Other` / `None` so one odd sample
/// never fails the whole list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    #[serde(default, deserialize_with = "lenient")]
    pub period_type: PeriodType,
    #[serde(default, deserialize_with = "lenient")]
    pub statistics_type: StatisticsType,
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<f64>,
}

impl PerformanceSample {
    pub fn new(period_type: PeriodType, statistics_type: StatisticsType, value: f64) -> Self {
        Self {
            period_type,
            statistics_type,
            value: Some(value),
        }
    }
}

/// The three fields of a position the classifier reads.
///
/// Each is `None` when the upstream object lacks it or carries a non-number.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionMarks {
    pub entry_price: Option<f64>,
    pub mark_price: Option<f64>,
    pub pnl: Option<f64>,
}

impl PositionMarks {
    pub fn from_value(position: &Value) -> Self {
        let number = |key: &str| position.get(key).and_then(Value::as_f64);
        Self {
            entry_price: number("entryPrice"),
            mark_price: number("markPrice"),
            pnl: number("pnl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_with_null_data_decodes() {
        let raw = r#"{"code":"000000","message":null,"messageDetail":null,"data":null,"success":true}"#;
        let env: ApiEnvelope<PositionData> = serde_json::from_str(raw).unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn envelope_with_mistyped_data_is_treated_as_absent() {
        let raw = r#"{"data":"maintenance","success":false}"#;
        let env: ApiEnvelope<BaseInfo> = serde_json::from_str(raw).unwrap();
        assert!(env.data.is_none());
    }

    #[test]
    fn performance_list_tolerates_unknown_periods() {
        let raw = json!({
            "performanceRetList": [
                {"periodType": "DAILY", "statisticsType": "ROI", "value": 0.0123, "rank": 0},
                {"periodType": "EXACT_YEARLY", "statisticsType": "PNL", "value": 4.5},
                {"periodType": "ALL", "statisticsType": "SHARPE", "value": 1.0},
                {"periodType": "WEEKLY", "statisticsType": "PNL"}
            ]
        });
        let data: PerformanceData = serde_json::from_value(raw).unwrap();
        let list = data.into_samples();

        assert_eq!(list[0], PerformanceSample::new(PeriodType::Daily, StatisticsType::Roi, 0.0123));
        assert_eq!(list[1].period_type, PeriodType::Other);
        assert_eq!(list[2].statistics_type, StatisticsType::Other);
        assert_eq!(list[3].value, None);
    }

    #[test]
    fn performance_list_tolerates_null_and_mistyped_fields() {
        let raw = json!({
            "performanceRetList": [
                {"periodType": "DAILY", "statisticsType": "ROI", "value": 0.05},
                {"periodType": null, "statisticsType": "PNL", "value": 1.0},
                {"periodType": "WEEKLY", "statisticsType": 7, "value": 2.0},
                {"periodType": "MONTHLY", "statisticsType": null, "value": "3.5"},
                {"periodType": "ALL", "statisticsType": "PNL", "value": "n/a"},
                null,
                "junk"
            ]
        });
        let list = serde_json::from_value::<PerformanceData>(raw)
            .unwrap()
            .into_samples();

        assert_eq!(list.len(), 5);
        assert_eq!(list[0], PerformanceSample::new(PeriodType::Daily, StatisticsType::Roi, 0.05));
        assert_eq!(list[1].period_type, PeriodType::Other);
        assert_eq!(list[1].value, Some(1.0));
        assert_eq!(list[2].statistics_type, StatisticsType::Other);
        assert_eq!(list[3].statistics_type, StatisticsType::Other);
        assert_eq!(list[3].value, None);
        assert_eq!(list[4].statistics_type, StatisticsType::Pnl);
        assert_eq!(list[4].value, None);
    }

    #[test]
    fn performance_list_of_wrong_type_is_empty() {
        let data: PerformanceData =
            serde_json::from_value(json!({"performanceRetList": {"oops": 1}})).unwrap();
        assert!(data.into_samples().is_empty());
    }

    #[test]
    fn position_marks_read_numbers_only() {
        let full = json!({"symbol": "BTCUSDT", "entryPrice": 100.0, "markPrice": 110.5, "pnl": -3});
        let marks = PositionMarks::from_value(&full);
        assert_eq!(marks.entry_price, Some(100.0));
        assert_eq!(marks.mark_price, Some(110.5));
        assert_eq!(marks.pnl, Some(-3.0));

        let partial = json!({"entryPrice": "100", "pnl": null});
        assert_eq!(PositionMarks::from_value(&partial), PositionMarks::default());
    }

    #[test]
    fn base_info_nickname_is_optional() {
        let info: BaseInfo = serde_json::from_value(json!({"positionShared": true})).unwrap();
        assert_eq!(info.nick_name, None);

        let info: BaseInfo = serde_json::from_value(json!({"nickName": 42})).unwrap();
        assert_eq!(info.nick_name, None);
    }
}
