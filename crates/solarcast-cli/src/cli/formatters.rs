// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.

//! Output formatters for prediction results and session history.

use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_FULL};
use solarcast_core::{
    RadiationBand, RadiationReading, RequestState, SessionHistory, format_power,
};

/// Formatter for pretty ASCII tables
#[derive(Debug)]
pub struct TableFormatter;

fn band_color(band: RadiationBand) -> Color {
    match band {
        RadiationBand::Low => Color::Blue,
        RadiationBand::Moderate => Color::Yellow,
        RadiationBand::High => Color::Red,
    }
}

impl TableFormatter {
    /// Format the session history as a table, oldest submission first
    pub fn format_history(history: &SessionHistory) -> String {
        if history.is_empty() {
            return "No predictions yet\n".to_string();
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Radiation\n(W/m²)").add_attribute(Attribute::Bold),
            Cell::new("Level").add_attribute(Attribute::Bold),
            Cell::new("Power Output\n(kW)").add_attribute(Attribute::Bold),
        ]);

        for (idx, entry) in history.entries().iter().enumerate() {
            let band = entry.radiation.band();
            table.add_row(vec![
                Cell::new(idx + 1),
                Cell::new(entry.radiation.watts_per_m2()),
                Cell::new(band.display_name()).fg(band_color(band)),
                Cell::new(format_power(entry.power_output.kilowatts())),
            ]);
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!("{} prediction(s) this session\n", history.len()));
        output
    }
}

/// One-line summary of a submission outcome
///
/// `reading` is the validated value behind a successful prediction; the raw
/// input is only echoed back when there is none.
pub fn format_outcome(
    raw: &str,
    reading: Option<RadiationReading>,
    state: &RequestState,
) -> String {
    let input = raw.trim();
    match (state, reading) {
        (RequestState::Succeeded(result), Some(reading)) => format!(
            "{} W/m² ({}) → ⚡ {} kW",
            reading.watts_per_m2(),
            reading.band(),
            format_power(result.kilowatts())
        ),
        (RequestState::Succeeded(result), None) => {
            format!("{input} W/m² → ⚡ {} kW", format_power(result.kilowatts()))
        }
        (RequestState::Failed(message), _) => format!("{input} W/m² → ⚠️ {message}"),
        (RequestState::Pending | RequestState::Idle, _) => format!("{input} W/m² → {state}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarcast_core::{HistoryEntry, PredictionResult, RadiationReading};

    #[test]
    fn test_empty_history() {
        assert_eq!(
            TableFormatter::format_history(&SessionHistory::new()),
            "No predictions yet\n"
        );
    }

    #[test]
    fn test_history_table_lists_entries_in_order() {
        let mut history = SessionHistory::new();
        for (x, y) in [(500.0, 120.0), (900.0, 300.0)] {
            history.append(HistoryEntry::new(
                RadiationReading::new(x).unwrap(),
                PredictionResult::new(y),
            ));
        }

        let output = TableFormatter::format_history(&history);
        let first = output.find("120.00").unwrap();
        let second = output.find("300.00").unwrap();
        assert!(first < second);
        assert!(output.contains("moderate"));
        assert!(output.contains("2 prediction(s) this session"));
    }

    #[test]
    fn test_format_outcome() {
        let ok = RequestState::Succeeded(PredictionResult::new(245.5));
        let reading = RadiationReading::new(850.0).ok();
        assert_eq!(
            format_outcome("850", reading, &ok),
            "850 W/m² (moderate) → ⚡ 245.50 kW"
        );

        let failed = RequestState::Failed("Unable to predict at the moment".to_string());
        assert_eq!(
            format_outcome(" abc ", None, &failed),
            "abc W/m² → ⚠️ Unable to predict at the moment"
        );
    }

    #[test]
    fn test_format_outcome_uses_validated_reading() {
        let ok = RequestState::Succeeded(PredictionResult::new(245.5));
        let reading = RadiationReading::parse(" 8.5e2 ").ok();
        assert_eq!(
            format_outcome(" 8.5e2 ", reading, &ok),
            "850 W/m² (moderate) → ⚡ 245.50 kW"
        );

        let high = RadiationReading::parse("1.2e3").ok();
        assert_eq!(
            format_outcome("1.2e3", high, &ok),
            "1200 W/m² (high) → ⚡ 245.50 kW"
        );
    }
}
