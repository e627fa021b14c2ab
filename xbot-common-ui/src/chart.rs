//! Message volume chart.
//!
//! The backend exposes no history endpoint yet, so the series is generated
//! demonstration data in the same ranges the web page draws.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::Day => "day",
            ChartPeriod::Week => "week",
            ChartPeriod::Month => "month",
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(ChartPeriod::Day),
            "week" => Ok(ChartPeriod::Week),
            "month" => Ok(ChartPeriod::Month),
            other => Err(format!("unknown chart period '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub period: ChartPeriod,
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

impl ChartSeries {
    pub fn sample(period: ChartPeriod) -> Self {
        Self::sample_with(period, &mut rand::rng())
    }

    pub fn sample_with<R: Rng>(period: ChartPeriod, rng: &mut R) -> Self {
        let (labels, data): (Vec<String>, Vec<u32>) = match period {
            ChartPeriod::Day => (0..24)
                .map(|h| (format!("{}:00", h), rng.random_range(0..30)))
                .unzip(),
            ChartPeriod::Week => ["周一", "周二", "周三", "周四", "周五", "周六", "周日"]
                .iter()
                .map(|d| (d.to_string(), rng.random_range(50..150)))
                .unzip(),
            ChartPeriod::Month => (1..=30)
                .map(|d| (format!("{}日", d), rng.random_range(100..300)))
                .unzip(),
        };
        Self { period, labels, data }
    }

    pub fn max(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// One block character per point, scaled to the series maximum.
    pub fn sparkline(&self) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        let max = self.max();
        self.data
            .iter()
            .map(|&v| {
                if max == 0 {
                    BARS[0]
                } else {
                    BARS[((v as usize) * (BARS.len() - 1)) / max as usize]
                }
            })
            .collect()
    }
}
