//! Summary assembly
//!
//! Pure functions that fold the three upstream payloads into one record:
//! direction inference for each open position and metric extraction from the
//! performance samples.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{PerformanceSample, PeriodType, PositionMarks, StatisticsType};

/// Direction inferred from how price movement and PnL relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

/// Infer the side of a position.
///
/// A long gains when the mark is above entry and loses when it is below; a
/// short is the mirror image. `None` when a field is missing, the mark equals
/// the entry, or PnL is exactly zero.
pub fn classify_position(marks: &PositionMarks) -> Option<PositionSide> {
    let (entry, mark, pnl) = (marks.entry_price?, marks.mark_price?, marks.pnl?);

    if (entry < mark && pnl > 0.0) || (entry > mark && pnl < 0.0) {
        Some(PositionSide::Long)
    } else if (entry > mark && pnl > 0.0) || (entry < mark && pnl < 0.0) {
        Some(PositionSide::Short)
    } else {
        None
    }
}

/// Open position counts. `open` always equals the list length, so
/// `long + short <= open`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCounts {
    pub open: usize,
    pub long: usize,
    pub short: usize,
}

impl PositionCounts {
    pub fn tally(positions: &[Value]) -> Self {
        let mut counts = Self {
            open: positions.len(),
            ..Self::default()
        };
        for position in positions {
            match classify_position(&PositionMarks::from_value(position)) {
                Some(PositionSide::Long) => counts.long += 1,
                Some(PositionSide::Short) => counts.short += 1,
                None => {}
            }
        }
        counts
    }
}

/// The seven metrics reported from `performanceRetList`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub daily_roi: Option<f64>,
    pub daily_pnl: Option<f64>,
    pub weekly_roi: Option<f64>,
    pub weekly_pnl: Option<f64>,
    pub monthly_roi: Option<f64>,
    pub monthly_pnl: Option<f64>,
    pub total_pnl: Option<f64>,
}

impl PerformanceMetrics {
    /// Single pass; a later sample for the same pair overwrites an earlier one
    pub fn from_samples(samples: &[PerformanceSample]) -> Self {
        let mut metrics = Self::default();
        for sample in samples {
            if let Some(slot) = metrics.slot_mut(sample.period_type, sample.statistics_type) {
                *slot = sample.value;
            }
        }
        metrics
    }

    fn slot_mut(
        &mut self,
        period: PeriodType,
        statistic: StatisticsType,
    ) -> Option<&mut Option<f64>> {
        use PeriodType as P;
        use StatisticsType as S;

        match (period, statistic) {
            (P::Daily, S::Roi) => Some(&mut self.daily_roi),
            (P::Daily, S::Pnl) => Some(&mut self.daily_pnl),
            (P::Weekly, S::Roi) => Some(&mut self.weekly_roi),
            (P::Weekly, S::Pnl) => Some(&mut self.weekly_pnl),
            (P::Monthly, S::Roi) => Some(&mut self.monthly_roi),
            (P::Monthly, S::Pnl) => Some(&mut self.monthly_pnl),
            (P::All, S::Pnl) => Some(&mut self.total_pnl),
            _ => None,
        }
    }
}

/// Record returned by `POST /leaderboard-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardSummary {
    pub username: Option<String>,
    #[serde(rename = "dailyROI")]
    pub daily_roi: Option<f64>,
    #[serde(rename = "dailyPNL")]
    pub daily_pnl: Option<f64>,
    #[serde(rename = "weeklyROI")]
    pub weekly_roi: Option<f64>,
    #[serde(rename = "weeklyPNL")]
    pub weekly_pnl: Option<f64>,
    #[serde(rename = "monthlyROI")]
    pub monthly_roi: Option<f64>,
    #[serde(rename = "monthlyPNL")]
    pub monthly_pnl: Option<f64>,
    #[serde(rename = "totalPNL")]
    pub total_pnl: Option<f64>,
    #[serde(rename = "openPositions")]
    pub open_positions: usize,
    #[serde(rename = "openLongPositions")]
    pub open_long_positions: usize,
    #[serde(rename = "openShortPositions")]
    pub open_short_positions: usize,
    /// Upstream position objects, unmodified
    #[serde(rename = "Positions")]
    pub positions: Vec<Value>,
}

impl LeaderboardSummary {
    pub fn assemble(
        username: Option<String>,
        positions: Vec<Value>,
        samples: &[PerformanceSample],
    ) -> Self {
        let counts = PositionCounts::tally(&positions);
        let metrics = PerformanceMetrics::from_samples(samples);

        Self {
            username,
            daily_roi: metrics.daily_roi,
            daily_pnl: metrics.daily_pnl,
            weekly_roi: metrics.weekly_roi,
            weekly_pnl: metrics.weekly_pnl,
            monthly_roi: metrics.monthly_roi,
            monthly_pnl: metrics.monthly_pnl,
            total_pnl: metrics.total_pnl,
            open_positions: counts.open,
            open_long_positions: counts.long,
            open_short_positions: counts.short,
            positions,
        }
    }
}
