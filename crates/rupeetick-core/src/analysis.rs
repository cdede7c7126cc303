//! Trend cards and chart projections computed from a [`Series`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CurrencyConverter, DataPoint, DisplayMode, Granularity, Series, ValidationError};

/// Moves smaller than this percentage are reported as stable.
const STABLE_BAND_PERCENT: f64 = 1.0;
const ONE_CRORE: f64 = 10_000_000.0;

/// Metric columns of a [`DataPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    Volume,
    MarketCap,
    Revenue,
    Profit,
    Employees,
}

impl Metric {
    /// Metrics shown as trend cards.
    pub const TRENDED: [Self; 4] = [Self::Price, Self::MarketCap, Self::Revenue, Self::Profit];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Volume => "volume",
            Self::MarketCap => "market_cap",
            Self::Revenue => "revenue",
            Self::Profit => "profit",
            Self::Employees => "employees",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Price => "Stock Price",
            Self::Volume => "Volume",
            Self::MarketCap => "Market Cap",
            Self::Revenue => "Revenue",
            Self::Profit => "Profit",
            Self::Employees => "Employees",
        }
    }

    /// Axis label used by chart projections.
    pub const fn chart_label(self) -> &'static str {
        match self {
            Self::Price => "Stock Price (₹)",
            Self::Volume => "Trading Volume",
            Self::MarketCap => "Market Cap (₹ Cr)",
            Self::Revenue => "Revenue (₹ Cr)",
            Self::Profit => "Profit (₹ Cr)",
            Self::Employees => "Employee Count",
        }
    }

    /// Rupee metrics charted in crores.
    pub const fn is_crore_scaled(self) -> bool {
        matches!(self, Self::MarketCap | Self::Revenue | Self::Profit)
    }

    pub fn value(self, point: &DataPoint) -> f64 {
        match self {
            Self::Price => point.price,
            Self::Volume => point.volume as f64,
            Self::MarketCap => point.market_cap,
            Self::Revenue => point.revenue,
            Self::Profit => point.profit,
            Self::Employees => f64::from(point.employees),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "price" | "stock_price" => Ok(Self::Price),
            "volume" => Ok(Self::Volume),
            "market_cap" => Ok(Self::MarketCap),
            "revenue" => Ok(Self::Revenue),
            "profit" => Ok(Self::Profit),
            "employees" => Ok(Self::Employees),
            other => Err(ValidationError::InvalidMetric {
                value: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    fn from_change_percent(change_percent: f64) -> Self {
        if change_percent.abs() < STABLE_BAND_PERCENT {
            Self::Stable
        } else if change_percent > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Latest-vs-previous comparison for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendCard {
    pub metric: Metric,
    pub title: String,
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub change_percent: f64,
    pub direction: TrendDirection,
    /// Current value formatted for display (plain for price, crores otherwise).
    pub display: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Positive,
    Declining,
    Mixed,
}

impl Outlook {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Positive => "Positive growth trajectory",
            Self::Declining => "Declining performance",
            Self::Mixed => "Mixed performance indicators",
        }
    }
}

/// Trend cards plus the summary insights shown next to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub symbol: String,
    pub granularity: Granularity,
    pub data_points: usize,
    pub exchange_rate: f64,
    pub cards: Vec<TrendCard>,
    pub outlook: Outlook,
    pub best_performer: Option<Metric>,
}

impl TrendReport {
    /// Compares the last two points. Series shorter than two points yield no
    /// cards, a mixed outlook and no best performer.
    pub fn from_series(series: &Series, converter: &CurrencyConverter) -> Self {
        let cards = match series.points.as_slice() {
            [.., previous, current] => Metric::TRENDED
                .iter()
                .map(|metric| trend_card(*metric, previous, current, converter))
                .collect(),
            _ => Vec::new(),
        };

        let ups = count_direction(&cards, TrendDirection::Up);
        let downs = count_direction(&cards, TrendDirection::Down);
        let outlook = if ups > downs {
            Outlook::Positive
        } else if downs > ups {
            Outlook::Declining
        } else {
            Outlook::Mixed
        };

        let best_performer = cards
            .iter()
            .fold(None::<&TrendCard>, |best, card| match best {
                Some(best) if best.change_percent >= card.change_percent => Some(best),
                _ => Some(card),
            })
            .map(|card| card.metric);

        Self {
            symbol: series.symbol.clone(),
            granularity: series.granularity,
            data_points: series.len(),
            exchange_rate: converter.rate(),
            cards,
            outlook,
            best_performer,
        }
    }
}

fn trend_card(
    metric: Metric,
    previous: &DataPoint,
    current: &DataPoint,
    converter: &CurrencyConverter,
) -> TrendCard {
    let current_value = metric.value(current);
    let previous_value = metric.value(previous);
    let change = current_value - previous_value;
    let change_percent = if previous_value == 0.0 {
        0.0
    } else {
        change / previous_value * 100.0
    };
    let mode = if metric == Metric::Price {
        DisplayMode::Plain
    } else {
        DisplayMode::Crores
    };

    TrendCard {
        metric,
        title: metric.title().to_owned(),
        current: current_value,
        previous: previous_value,
        change,
        change_percent,
        direction: TrendDirection::from_change_percent(change_percent),
        display: converter.format(current_value, mode),
    }
}

fn count_direction(cards: &[TrendCard], direction: TrendDirection) -> usize {
    cards.iter().filter(|card| card.direction == direction).count()
}

/// Label/value pairs for plotting one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub metric: Metric,
    pub label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartData {
    /// Money metrics other than price are scaled to crores; date labels
    /// depend on the granularity (`Mar 05`, `Mar 2024`, `2024`).
    pub fn from_series(series: &Series, metric: Metric) -> Self {
        let labels = series
            .points
            .iter()
            .map(|point| axis_label(point, series.granularity))
            .collect();
        let values = series
            .points
            .iter()
            .map(|point| {
                let value = metric.value(point);
                if metric.is_crore_scaled() {
                    value / ONE_CRORE
                } else {
                    value
                }
            })
            .collect();

        Self {
            metric,
            label: metric.chart_label().to_owned(),
            labels,
            values,
        }
    }
}

fn axis_label(point: &DataPoint, granularity: Granularity) -> String {
    let date = point.date.into_inner();
    let month = short_month(date.month());
    match granularity {
        Granularity::Daily | Granularity::Weekly => format!("{month} {:02}", date.day()),
        Granularity::Monthly => format!("{month} {}", date.year()),
        Granularity::Yearly => date.year().to_string(),
    }
}

fn short_month(month: time::Month) -> &'static str {
    use time::Month;
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IsoDate, SeriesOrigin};

    fn point(date: &str, price: f64, market_cap: f64, revenue: f64, profit: f64) -> DataPoint {
        DataPoint::new(
            IsoDate::parse(date).expect("date"),
            price,
            80_000_000,
            market_cap,
            revenue,
            profit,
            29_000,
        )
        .expect("valid point")
    }

    fn series(points: Vec<DataPoint>, granularity: Granularity) -> Series {
        Series::new("NVDA", granularity, SeriesOrigin::Simulated, points)
    }

    #[test]
    fn classifies_moves_against_one_percent_band() {
        let data = series(
            vec![
                point("2024-03-01", 100.0, 1_000.0, 1_000.0, 1_000.0),
                point("2024-03-02", 100.5, 1_100.0, 900.0, 1_020.0),
            ],
            Granularity::Daily,
        );
        let report = TrendReport::from_series(&data, &CurrencyConverter::default());

        let directions = report
            .cards
            .iter()
            .map(|card| card.direction)
            .collect::<Vec<_>>();
        assert_eq!(
            directions,
            vec![
                TrendDirection::Stable,
                TrendDirection::Up,
                TrendDirection::Down,
                TrendDirection::Up,
            ]
        );
        assert_eq!(report.outlook, Outlook::Positive);
        assert_eq!(report.best_performer, Some(Metric::MarketCap));
        assert_eq!(report.data_points, 2);
    }

    #[test]
    fn declining_when_most_metrics_fall() {
        let data = series(
            vec![
                point("2024-03-01", 100.0, 1_000.0, 1_000.0, 1_000.0),
                point("2024-03-02", 90.0, 900.0, 990.0, 1_000.0),
            ],
            Granularity::Daily,
        );
        let report = TrendReport::from_series(&data, &CurrencyConverter::default());
        assert_eq!(report.outlook, Outlook::Declining);
        assert_eq!(report.outlook.describe(), "Declining performance");
    }

    #[test]
    fn single_point_yields_no_cards() {
        let data = series(
            vec![point("2024-03-01", 100.0, 1.0, 1.0, 1.0)],
            Granularity::Daily,
        );
        let report = TrendReport::from_series(&data, &CurrencyConverter::default());
        assert!(report.cards.is_empty());
        assert_eq!(report.outlook, Outlook::Mixed);
        assert_eq!(report.best_performer, None);
    }

    #[test]
    fn card_display_uses_price_and_crore_formats() {
        let data = series(
            vec![
                point("2024-03-01", 37_000.0, 9.0e11, 2.0e12, 5.0e11),
                point("2024-03-02", 37_462.5, 1.0e12, 2.1e12, 5.2e11),
            ],
            Granularity::Daily,
        );
        let report = TrendReport::from_series(&data, &CurrencyConverter::default());
        assert_eq!(report.cards[0].display, "₹37,462.5");
        assert_eq!(report.cards[1].display, "₹100.00 Lakh Cr");
    }

    #[test]
    fn chart_scales_money_to_crores_and_labels_by_granularity() {
        let data = series(
            vec![
                point("2023-04-30", 1.0, 5.0e13, 1.0, 1.0),
                point("2024-03-31", 1.0, 6.0e13, 1.0, 1.0),
            ],
            Granularity::Monthly,
        );

        let chart = ChartData::from_series(&data, Metric::MarketCap);
        assert_eq!(chart.labels, vec!["Apr 2023", "Mar 2024"]);
        assert_eq!(chart.values, vec![5_000_000.0, 6_000_000.0]);
        assert_eq!(chart.label, "Market Cap (₹ Cr)");

        let yearly = Series {
            granularity: Granularity::Yearly,
            ..data.clone()
        };
        let volume = ChartData::from_series(&yearly, Metric::Volume);
        assert_eq!(volume.labels, vec!["2023", "2024"]);
        assert_eq!(volume.values, vec![80_000_000.0, 80_000_000.0]);
    }

    #[test]
    fn parses_metric_names() {
        assert_eq!("market-cap".parse::<Metric>(), Ok(Metric::MarketCap));
        assert!(matches!(
            "ebitda".parse::<Metric>(),
            Err(ValidationError::InvalidMetric { .. })
        ));
    }
}
