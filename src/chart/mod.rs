//! Grouped bar chart layout.
//!
//! [`GroupedBarChart`] holds everything the renderer draws: category
//! positions, the three bar series, the y-axis range and ticks, and the
//! annotations. Building it is pure index arithmetic, so the layout can be
//! inspected without touching a drawing backend.

mod ticks;

pub use ticks::nice_ticks;

use crate::config::ChartConfig;
use crate::table::{columns, BenchmarkRecord, BenchmarkTable};
use crate::{Error, Result};

use plotters::style::RGBColor;

/// Horizontal padding between the outermost possible bar edge and the
/// plot border, in category slots.
const X_MARGIN: f64 = 0.75;

/// Headroom above the tallest bar, as a fraction of the data span.
const Y_HEADROOM: f64 = 0.05;

/// Target number of y-axis ticks.
const Y_TICK_TARGET: usize = 8;

/// One of the three timing metrics drawn for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Keypair generation
    KeyGen,
    /// Signing
    Sign,
    /// Verification
    Verify,
}

impl Series {
    /// All series, in drawing and legend order.
    pub const ALL: [Series; 3] = [Series::KeyGen, Series::Sign, Series::Verify];

    /// Legend label.
    pub fn name(self) -> &'static str {
        match self {
            Series::KeyGen => "KeyGen",
            Series::Sign => "Sign",
            Series::Verify => "Verify",
        }
    }

    /// Fill color, constant across the chart.
    pub fn color(self) -> RGBColor {
        match self {
            // skyblue
            Series::KeyGen => RGBColor(0x87, 0xCE, 0xEB),
            // lightgreen
            Series::Sign => RGBColor(0x90, 0xEE, 0x90),
            // salmon
            Series::Verify => RGBColor(0xFA, 0x80, 0x72),
        }
    }

    /// Source column in the benchmark table.
    pub fn column(self) -> &'static str {
        match self {
            Series::KeyGen => columns::KEYGEN,
            Series::Sign => columns::SIGN,
            Series::Verify => columns::VERIFY,
        }
    }

    /// Offset of this series' bar from the category position, in bar widths.
    pub fn offset(self) -> f64 {
        match self {
            Series::KeyGen => -1.0,
            Series::Sign => 0.0,
            Series::Verify => 1.0,
        }
    }

    /// Value of this metric in a table row.
    pub fn value(self, record: &BenchmarkRecord) -> f64 {
        match self {
            Series::KeyGen => record.keygen_ms,
            Series::Sign => record.sign_ms,
            Series::Verify => record.verify_ms,
        }
    }
}

/// A labeled group on the x-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Integer slot on the x-axis, equal to the row index
    pub position: usize,
    /// Label drawn under the slot
    pub label: String,
}

/// A single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Series the bar belongs to
    pub series: Series,
    /// Category slot the bar belongs to
    pub category: usize,
    /// Horizontal center
    pub center: f64,
    /// Left edge
    pub left: f64,
    /// Right edge
    pub right: f64,
    /// Bar height (the metric value)
    pub height: f64,
}

/// All bars of one series, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBars {
    /// The metric
    pub series: Series,
    /// One bar per category
    pub bars: Vec<Bar>,
}

/// Fully computed grouped bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBarChart {
    /// Chart title
    pub title: String,
    /// X-axis description
    pub x_label: String,
    /// Y-axis description
    pub y_label: String,
    /// Rotate category labels
    pub rotate_labels: bool,
    /// Bar width in category slots
    pub bar_width: f64,
    /// Categories in table order
    pub categories: Vec<Category>,
    /// The three series, in legend order
    pub series: Vec<SeriesBars>,
    /// Visible x range
    pub x_range: (f64, f64),
    /// Visible y range
    pub y_range: (f64, f64),
    /// Y positions of the tick labels and dashed gridlines
    pub y_ticks: Vec<f64>,
}

impl GroupedBarChart {
    /// Lay out a chart for a table.
    ///
    /// Fails with [`Error::Render`] for an empty table or a non-finite
    /// value; nothing has been drawn at that point. Values whose spread
    /// exceeds the `f64` range are rejected the same way.
    pub fn from_table(table: &BenchmarkTable, style: &ChartConfig) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::render("cannot chart an empty table"));
        }

        for (row, record) in table.records().iter().enumerate() {
            for series in Series::ALL {
                let value = series.value(record);
                if !value.is_finite() {
                    return Err(Error::render(format!(
                        "row {} ({}): {} is {}",
                        row + 1,
                        record.scheme_label,
                        series.column(),
                        value
                    )));
                }
            }
        }

        let w = style.bar_width;
        let categories: Vec<Category> = table
            .labels()
            .enumerate()
            .map(|(position, label)| Category {
                position,
                label: label.to_string(),
            })
            .collect();

        let series = Series::ALL
            .iter()
            .map(|&series| SeriesBars {
                series,
                bars: table
                    .records()
                    .iter()
                    .enumerate()
                    .map(|(i, record)| {
                        let center = i as f64 + series.offset() * w;
                        Bar {
                            series,
                            category: i,
                            center,
                            left: center - w / 2.0,
                            right: center + w / 2.0,
                            height: series.value(record),
                        }
                    })
                    .collect(),
            })
            .collect();

        let (lo, hi) = table
            .records()
            .iter()
            .flat_map(|r| Series::ALL.map(|s| s.value(r)))
            .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let span = if hi > lo { (hi - lo).min(f64::MAX) } else { 1.0 };
        let y_range = (
            if lo < 0.0 { (lo - span * Y_HEADROOM).max(f64::MIN) } else { 0.0 },
            if hi > 0.0 || lo == hi { (hi + span * Y_HEADROOM).min(f64::MAX) } else { 0.0 },
        );
        // Pixel mapping divides by the range width, which must stay finite.
        if !(y_range.1 - y_range.0).is_finite() {
            return Err(Error::render(format!(
                "value range {} to {} is too wide to plot",
                lo, hi
            )));
        }
        let y_ticks = nice_ticks(y_range.0, y_range.1, Y_TICK_TARGET);

        let n = categories.len();
        Ok(Self {
            title: style.title.clone(),
            x_label: style.x_label.clone(),
            y_label: style.y_label.clone(),
            rotate_labels: style.rotate_labels,
            bar_width: w,
            categories,
            series,
            x_range: (-X_MARGIN, (n - 1) as f64 + X_MARGIN),
            y_range,
            y_ticks,
        })
    }

    /// Every bar, series by series.
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.series.iter().flat_map(|s| s.bars.iter())
    }

    /// Total number of bars.
    pub fn bar_count(&self) -> usize {
        self.series.iter().map(|s| s.bars.len()).sum()
    }

    /// Bars of one category, in series order.
    pub fn bars_for(&self, category: usize) -> Vec<&Bar> {
        self.bars().filter(|b| b.category == category).collect()
    }

    /// Legend entries, in legend order.
    pub fn legend_entries(&self) -> Vec<&'static str> {
        self.series.iter().map(|s| s.series.name()).collect()
    }

    /// Label of the category at an integer x position, if any.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        let rounded = x.round();
        if (x - rounded).abs() > 1e-9 || rounded < 0.0 {
            return None;
        }
        self.categories
            .get(rounded as usize)
            .map(|c| c.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: &[(&str, f64, f64, f64)]) -> BenchmarkTable {
        rows.iter()
            .map(|&(label, k, s, v)| BenchmarkRecord::new(label, k, s, v))
            .collect()
    }

    #[test]
    fn test_two_category_example() {
        let chart = GroupedBarChart::from_table(
            &table(&[("A", 1.0, 2.0, 3.0), ("B", 4.0, 5.0, 6.0)]),
            &ChartConfig::default(),
        )
        .unwrap();

        let positions: Vec<usize> = chart.categories.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(chart.bar_count(), 6);
        assert_eq!(chart.legend_entries(), vec!["KeyGen", "Sign", "Verify"]);

        let heights: Vec<f64> = chart.bars_for(1).iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_bar_heights_and_offsets() {
        let chart = GroupedBarChart::from_table(
            &table(&[("Falcon-512", 7.9, 0.25, 0.04), ("Dilithium-II", 2.1, 0.9, 1.3)]),
            &ChartConfig::default(),
        )
        .unwrap();

        let bars = chart.bars_for(1);
        assert_eq!(bars.len(), 3);
        let expected = [
            (Series::KeyGen, 0.75, 2.1),
            (Series::Sign, 1.0, 0.9),
            (Series::Verify, 1.25, 1.3),
        ];
        for (bar, (series, center, height)) in bars.iter().zip(expected) {
            assert_eq!(bar.series, series);
            assert!((bar.center - center).abs() < 1e-12);
            assert!((bar.right - bar.left - 0.25).abs() < 1e-12);
            assert_eq!(bar.height, height);
        }
    }

    #[test]
    fn test_order_follows_table() {
        let chart = GroupedBarChart::from_table(
            &table(&[("Zeta", 1.0, 1.0, 1.0), ("Alpha", 1.0, 1.0, 1.0), ("Mu", 1.0, 1.0, 1.0)]),
            &ChartConfig::default(),
        )
        .unwrap();

        assert_eq!(chart.label_at(0.0), Some("Zeta"));
        assert_eq!(chart.label_at(1.0), Some("Alpha"));
        assert_eq!(chart.label_at(2.0), Some("Mu"));
        assert_eq!(chart.label_at(0.5), None);
        assert_eq!(chart.label_at(3.0), None);
        assert_eq!(chart.label_at(-1.0), None);
    }

    #[test]
    fn test_series_colors_are_distinct() {
        let colors: Vec<RGBColor> = Series::ALL.iter().map(|s| s.color()).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_non_finite_value_is_render_error() {
        let err = GroupedBarChart::from_table(
            &table(&[("A", 1.0, f64::NAN, 3.0)]),
            &ChartConfig::default(),
        )
        .unwrap_err();
        match err {
            Error::Render { message } => assert!(message.contains("SIGN(ms)")),
            other => panic!("unexpected: {:?}", other),
        }

        assert!(GroupedBarChart::from_table(
            &table(&[("A", f64::INFINITY, 1.0, 3.0)]),
            &ChartConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_empty_table_is_render_error() {
        let err = GroupedBarChart::from_table(&BenchmarkTable::default(), &ChartConfig::default())
            .unwrap_err();
        assert_eq!(err.category(), "render");
    }

    #[test]
    fn test_y_range_covers_data() {
        let chart = GroupedBarChart::from_table(
            &table(&[("A", 0.5, 12.0, 3.0)]),
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(chart.y_range.0, 0.0);
        assert!(chart.y_range.1 > 12.0);
        assert_eq!(chart.y_ticks.first(), Some(&0.0));
        assert!(chart.y_ticks.iter().all(|t| *t <= chart.y_range.1));

        let all_zero =
            GroupedBarChart::from_table(&table(&[("A", 0.0, 0.0, 0.0)]), &ChartConfig::default())
                .unwrap();
        assert!(all_zero.y_range.1 > all_zero.y_range.0);

        let negative = GroupedBarChart::from_table(
            &table(&[("A", -2.0, 1.0, 1.0)]),
            &ChartConfig::default(),
        )
        .unwrap();
        assert!(negative.y_range.0 < -2.0);
    }

    #[test]
    fn test_huge_values_keep_a_finite_range() {
        let chart = GroupedBarChart::from_table(
            &table(&[("A", 1.75e308, 1.0, 1.0)]),
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(chart.y_range, (0.0, f64::MAX));
        assert!(!chart.y_ticks.is_empty());
        assert!(chart.y_ticks.iter().all(|t| t.is_finite()));

        let negative = GroupedBarChart::from_table(
            &table(&[("A", -1.75e308, -1.0, -1.0)]),
            &ChartConfig::default(),
        )
        .unwrap();
        assert_eq!(negative.y_range, (f64::MIN, 0.0));
    }

    #[test]
    fn test_range_wider_than_f64_is_render_error() {
        let err = GroupedBarChart::from_table(
            &table(&[("A", -1e308, 1e308, 1.0)]),
            &ChartConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let t = table(&[("A", 1.0, 2.0, 3.0), ("B", 4.0, 5.0, 6.0)]);
        let style = ChartConfig::default();
        assert_eq!(
            GroupedBarChart::from_table(&t, &style).unwrap(),
            GroupedBarChart::from_table(&t, &style).unwrap()
        );
    }

    proptest! {
        #[test]
        fn prop_three_bars_per_category(
            values in prop::collection::vec((0.0f64..1e4, 0.0f64..1e4, 0.0f64..1e4), 1..40),
            w in 0.01f64..=(1.0 / 3.0),
        ) {
            let t: BenchmarkTable = values
                .iter()
                .enumerate()
                .map(|(i, &(k, s, v))| BenchmarkRecord::new(format!("S{}", i), k, s, v))
                .collect();
            let style = ChartConfig { bar_width: w, ..ChartConfig::default() };
            let chart = GroupedBarChart::from_table(&t, &style).unwrap();

            prop_assert_eq!(chart.categories.len(), values.len());
            prop_assert_eq!(chart.bar_count(), 3 * values.len());

            for (i, &(k, s, v)) in values.iter().enumerate() {
                let bars = chart.bars_for(i);
                prop_assert_eq!(bars.len(), 3);
                prop_assert_eq!(bars[0].height, k);
                prop_assert_eq!(bars[1].height, s);
                prop_assert_eq!(bars[2].height, v);
                prop_assert!((bars[0].center - (i as f64 - w)).abs() < 1e-9);
                prop_assert!((bars[1].center - i as f64).abs() < 1e-9);
                prop_assert!((bars[2].center - (i as f64 + w)).abs() < 1e-9);

                if i + 1 < values.len() {
                    let next = chart.bars_for(i + 1);
                    prop_assert!(bars[2].right <= next[0].left + 1e-9);
                }
            }

            for bar in chart.bars() {
                prop_assert!(bar.left >= chart.x_range.0);
                prop_assert!(bar.right <= chart.x_range.1);
                prop_assert!(bar.height <= chart.y_range.1);
            }
        }
    }
}
