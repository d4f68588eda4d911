//! Per-patient analytics aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::entry::Emotion;

/// Supported analytics windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeDays {
    #[default]
    Week,
    Month,
    Quarter,
}

impl RangeDays {
    /// `"30"` and `"90"` select the longer windows; anything else is a week.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("30") => Self::Month,
            Some("90") => Self::Quarter,
            _ => Self::Week,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }

    /// Inclusive `[from, to]` window ending at `now`.
    pub fn window(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(i64::from(self.days())), now)
    }
}

/// The fields of an entry the aggregation reads.
#[derive(Debug, Clone, Copy)]
pub struct EntrySample<'a> {
    pub happened_at: DateTime<Utc>,
    pub emotions: &'a [Emotion],
    pub triggers: &'a [String],
    pub techniques: &'a [String],
    pub stutter_frequency: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distributions {
    pub emotions: BTreeMap<String, u32>,
    pub triggers: BTreeMap<String, u32>,
    pub techniques: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_stutter_frequency: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAnalytics {
    pub range_days: u32,
    pub distributions: Distributions,
    pub trend: Vec<TrendPoint>,
}

impl PatientAnalytics {
    /// Tally label frequencies over every sample and average the stutter
    /// frequency per UTC calendar day, counting only samples that carry one.
    /// Trend points come out in ascending date order.
    pub fn aggregate<'a>(
        range: RangeDays,
        samples: impl IntoIterator<Item = EntrySample<'a>>,
    ) -> Self {
        let mut distributions = Distributions::default();
        let mut per_day: BTreeMap<NaiveDate, (i64, u32)> = BTreeMap::new();

        for sample in samples {
            for emotion in sample.emotions {
                *distributions.emotions.entry(emotion.name.clone()).or_default() += 1;
            }
            for trigger in sample.triggers {
                *distributions.triggers.entry(trigger.clone()).or_default() += 1;
            }
            for technique in sample.techniques {
                *distributions.techniques.entry(technique.clone()).or_default() += 1;
            }
            if let Some(value) = sample.stutter_frequency {
                let day = per_day.entry(sample.happened_at.date_naive()).or_default();
                day.0 += i64::from(value);
                day.1 += 1;
            }
        }

        let trend = per_day
            .into_iter()
            .map(|(date, (sum, count))| TrendPoint {
                date,
                avg_stutter_frequency: sum as f64 / f64::from(count),
                count,
            })
            .collect();

        Self {
            range_days: range.days(),
            distributions,
            trend,
        }
    }
}
