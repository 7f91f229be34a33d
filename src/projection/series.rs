//! Growth series for comparison charts
//!
//! Monthly and six-monthly series compound monthly; yearly series compound
//! annually. Series are plain values regenerated on every call.

use serde::{Deserialize, Serialize};

/// Sampling interval of a growth series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SamplingInterval {
    /// One point per month, term given in months
    Month,
    /// One point every six months plus the term end, term given in months
    SixMonth,
    /// One point per year, term given in years
    Year,
}

/// One sample of a growth trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// Months for monthly/six-monthly series, years for yearly series
    pub time: f64,
    pub value: f64,
}

/// Ordered growth trajectory for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    pub interval: SamplingInterval,
    pub points: Vec<GrowthPoint>,
}

impl GrowthSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Axis label for a point (`7`, `1.5 yr`, `10`)
    pub fn time_label(&self, point: &GrowthPoint) -> String {
        match self.interval {
            SamplingInterval::Month | SamplingInterval::Year => format!("{}", point.time),
            SamplingInterval::SixMonth => {
                let years = point.time / 12.0;
                if years.fract() == 0.0 {
                    format!("{} yr", years)
                } else {
                    format!("{:.1} yr", years)
                }
            }
        }
    }
}

fn monthly_point(investment: f64, rate: f64, month: u32) -> GrowthPoint {
    GrowthPoint {
        time: month as f64,
        value: investment * (1.0 + rate / 12.0).powi(month as i32),
    }
}

/// Generate the growth trajectory of an investment
///
/// `term` is in months for [`SamplingInterval::Month`] and
/// [`SamplingInterval::SixMonth`], in years for [`SamplingInterval::Year`].
/// Both ends are included, so a zero term yields the single starting point.
pub fn generate_series(
    investment: f64,
    rate: f64,
    term: u32,
    interval: SamplingInterval,
) -> GrowthSeries {
    let points = match interval {
        SamplingInterval::Month => (0..=term)
            .map(|m| monthly_point(investment, rate, m))
            .collect(),
        SamplingInterval::SixMonth => {
            let mut points: Vec<GrowthPoint> = (0..=term)
                .step_by(6)
                .map(|m| monthly_point(investment, rate, m))
                .collect();
            // Always finish exactly at the term boundary
            if term % 6 != 0 {
                points.push(monthly_point(investment, rate, term));
            }
            points
        }
        SamplingInterval::Year => (0..=term)
            .map(|y| GrowthPoint {
                time: y as f64,
                value: investment * (1.0 + rate).powi(y as i32),
            })
            .collect(),
    };

    GrowthSeries { interval, points }
}

/// A labelled series on a comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLine {
    pub label: String,
    pub series: GrowthSeries,
}

/// One x position of a comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub x: String,
    /// One entry per line; `None` past the end of that line's term
    pub values: Vec<Option<f64>>,
}

/// Align several series by index for a shared chart
///
/// Lines are not resampled onto a common clock: row `i` holds the `i`-th
/// point of every line. The x label comes from the last line that still has
/// a point at that index.
pub fn align_series(lines: &[ChartLine]) -> Vec<ChartRow> {
    let max_len = lines.iter().map(|l| l.series.len()).max().unwrap_or(0);

    (0..max_len)
        .map(|i| {
            let mut x = i.to_string();
            let values = lines
                .iter()
                .map(|line| {
                    line.series.points.get(i).map(|point| {
                        x = line.series.time_label(point);
                        point.value
                    })
                })
                .collect();
            ChartRow { x, values }
        })
        .collect()
}

/// Index of the last row holding a value for a line, where its end marker goes
pub fn line_end_index(rows: &[ChartRow], line: usize) -> Option<usize> {
    rows.iter()
        .rposition(|row| row.values.get(line).copied().flatten().is_some())
}
