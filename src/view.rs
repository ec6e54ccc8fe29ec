// Pure projection of a summary payload into display-ready structures. No
// state, no mutation of the input.

use egui::Color32;

use crate::api::Summary;

pub(crate) const PALETTE_INDIGO: Color32 = Color32::from_rgb(67, 56, 202);
pub(crate) const PALETTE_BLUE: Color32 = Color32::from_rgb(59, 130, 246);
pub(crate) const PALETTE_GREEN: Color32 = Color32::from_rgb(16, 185, 129);
pub(crate) const PALETTE_AMBER: Color32 = Color32::from_rgb(245, 158, 11);
pub(crate) const PALETTE_RED: Color32 = Color32::from_rgb(239, 68, 68);

/// Fixed chart palette; slices past the end wrap around to the start.
pub const CHART_PALETTE: [Color32; 5] = [
    PALETTE_INDIGO,
    PALETTE_BLUE,
    PALETTE_GREEN,
    PALETTE_AMBER,
    PALETTE_RED,
];

/// The raw-data preview shows the first rows only, in server order.
pub const TABLE_PREVIEW_ROWS: usize = 10;

/// Display-ready projection of one summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub dataset_name: String,
    pub stats: StatCards,
    pub chart: Vec<ChartSlice>,
    pub table: Vec<TableRow>,
}

/// Pre-formatted stat card values.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCards {
    pub total_units: String,
    pub avg_temperature: String,
    pub avg_pressure: String,
}

/// One slice of the distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

/// One row of the raw-data preview table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub eq_type: String,
    pub temperature: String,
}

/// Derive the view model for a summary. Pure: the same summary always
/// projects to the same view model, and the input is only borrowed.
pub fn project(summary: &Summary) -> ViewModel {
    let stats = StatCards {
        total_units: summary.total_count.to_string(),
        avg_temperature: format!("{:.2} °C", summary.averages.avg_temp),
        avg_pressure: format!("{:.2} Pa", summary.averages.avg_press),
    };

    let chart = summary
        .distribution
        .iter()
        .enumerate()
        .map(|(index, entry)| ChartSlice {
            label: entry.eq_type.clone(),
            value: f64::from(entry.count),
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect();

    let table = summary
        .raw_data
        .iter()
        .take(TABLE_PREVIEW_ROWS)
        .map(|row| TableRow {
            name: row.name.clone(),
            eq_type: row.eq_type.clone(),
            temperature: format!("{:.1} °C", row.temperature),
        })
        .collect();

    ViewModel {
        dataset_name: summary.dataset.clone(),
        stats,
        chart,
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Averages, EquipmentRow, TypeCount};
    use proptest::prelude::*;

    fn sample_summary() -> Summary {
        Summary {
            dataset: "plant.csv".to_string(),
            total_count: 3,
            averages: Averages {
                avg_flow: 12.0,
                avg_press: 101.2,
                avg_temp: 25.456,
            },
            distribution: vec![
                TypeCount {
                    eq_type: "Pump".to_string(),
                    count: 2,
                },
                TypeCount {
                    eq_type: "Valve".to_string(),
                    count: 1,
                },
            ],
            raw_data: vec![
                EquipmentRow {
                    name: "Pump-1".to_string(),
                    eq_type: "Pump".to_string(),
                    flowrate: 10.0,
                    pressure: 100.0,
                    temperature: 24.5,
                },
                EquipmentRow {
                    name: "Valve-1".to_string(),
                    eq_type: "Valve".to_string(),
                    flowrate: 14.0,
                    pressure: 102.4,
                    temperature: 26.4,
                },
            ],
        }
    }

    #[test]
    fn stat_cards_round_averages_to_two_decimals() {
        let view = project(&sample_summary());
        assert_eq!(view.stats.total_units, "3");
        assert_eq!(view.stats.avg_temperature, "25.46 °C");
        assert_eq!(view.stats.avg_pressure, "101.20 Pa");
    }

    #[test]
    fn chart_has_one_slice_per_distribution_entry() {
        let view = project(&sample_summary());
        assert_eq!(view.chart.len(), 2);
        assert_eq!(view.chart[0].label, "Pump");
        assert_eq!(view.chart[0].value, 2.0);
        assert_eq!(view.chart[0].color, CHART_PALETTE[0]);
        assert_eq!(view.chart[1].color, CHART_PALETTE[1]);
    }

    #[test]
    fn palette_wraps_past_its_length() {
        let mut summary = sample_summary();
        summary.distribution = (0..7)
            .map(|i| TypeCount {
                eq_type: format!("Type-{i}"),
                count: 1,
            })
            .collect();
        let view = project(&summary);
        assert_eq!(view.chart[5].color, CHART_PALETTE[0]);
        assert_eq!(view.chart[6].color, CHART_PALETTE[1]);
    }

    #[test]
    fn empty_distribution_and_raw_data_project_to_empty_output() {
        let mut summary = sample_summary();
        summary.distribution.clear();
        summary.raw_data.clear();
        let view = project(&summary);
        assert!(view.chart.is_empty());
        assert!(view.table.is_empty());
    }

    #[test]
    fn table_preview_keeps_the_first_ten_rows_in_order() {
        let mut summary = sample_summary();
        summary.raw_data = (0..25)
            .map(|i| EquipmentRow {
                name: format!("Unit-{i}"),
                eq_type: "Pump".to_string(),
                flowrate: 10.0,
                pressure: 100.0,
                temperature: 20.0,
            })
            .collect();
        let view = project(&summary);
        assert_eq!(view.table.len(), TABLE_PREVIEW_ROWS);
        assert_eq!(view.table[0].name, "Unit-0");
        assert_eq!(view.table[9].name, "Unit-9");
    }

    proptest! {
        #[test]
        fn projection_is_deterministic_and_leaves_the_input_alone(
            total in 0u32..10_000,
            temp in -50.0f64..500.0,
            press in 0.0f64..10_000.0,
            entries in proptest::collection::vec(("[A-Za-z]{1,12}", 0u32..1_000), 0..12),
        ) {
            let summary = Summary {
                dataset: "prop.csv".to_string(),
                total_count: total,
                averages: Averages { avg_flow: 0.0, avg_press: press, avg_temp: temp },
                distribution: entries
                    .iter()
                    .map(|(eq_type, count)| TypeCount { eq_type: eq_type.clone(), count: *count })
                    .collect(),
                raw_data: Vec::new(),
            };
            let before = summary.clone();

            let first = project(&summary);
            let second = project(&summary);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&summary, &before);
            prop_assert_eq!(first.chart.len(), summary.distribution.len());
            for (index, slice) in first.chart.iter().enumerate() {
                prop_assert_eq!(slice.color, CHART_PALETTE[index % CHART_PALETTE.len()]);
            }
        }
    }
}
