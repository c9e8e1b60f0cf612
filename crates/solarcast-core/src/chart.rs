// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use crate::history::SessionHistory;
use plotters::prelude::*;
use std::ops::Range;

const AMBER: RGBColor = RGBColor(245, 158, 11);

/// Axis range covering `values` with 10% padding on both ends
///
/// A degenerate span (single point, identical values) is widened so the
/// chart still has a usable scale, and the padding never shrinks below a
/// millionth of the largest magnitude so ticks stay distinguishable. Bounds
/// are clamped to finite values; if the padded width still overflows the
/// bare `min..max` is used. `None` when the values themselves span more
/// than an `f64` can hold (or there are no values).
fn padded_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let span = max - min;
    if !span.is_finite() {
        return None;
    }

    let magnitude = min.abs().max(max.abs());
    let pad = if span > 0.0 {
        span * 0.1
    } else {
        (magnitude * 0.1).max(1.0)
    };
    let pad = pad.max(magnitude * 1e-6);

    let lo = (min - pad).max(f64::MIN);
    let hi = (max + pad).min(f64::MAX);

    if (hi - lo).is_finite() {
        Some(lo..hi)
    } else {
        Some(min..max)
    }
}

/// Generate an SVG line chart of the session history
///
/// Points are joined in insertion order: x is the radiation (W/m²), y the
/// predicted power output (kW). An empty history yields an empty string.
///
/// # Errors
/// Returns error if chart generation fails or the values spread wider than
/// an `f64` axis can represent
pub fn render_history_svg(
    history: &SessionHistory,
    width: u32,
    height: u32,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut svg_data = String::new();

    if history.is_empty() {
        return Ok(svg_data);
    }

    let series = history.series();
    let x_range = padded_range(series.iter().map(|(x, _)| *x))
        .ok_or("radiation values span too wide a range to chart")?;
    let y_range = padded_range(series.iter().map(|(_, y)| *y))
        .ok_or("power output values span too wide a range to chart")?;

    {
        let root = SVGBackend::with_string(&mut svg_data, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let caption = format!("Predicted Power Output ({} submissions)", series.len());
        let mut chart = ChartBuilder::on(&root)
            .caption(&caption, ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("Radiation (W/m²)")
            .y_desc("Power Output (kW)")
            .x_labels(10)
            .y_labels(10)
            .label_style(("sans-serif", 12))
            .draw()?;

        chart.draw_series(LineSeries::new(
            series.iter().copied(),
            AMBER.stroke_width(3),
        ))?;
        chart.draw_series(
            series
                .iter()
                .map(|&point| Circle::new(point, 4, AMBER.filled())),
        )?;

        root.present()?;
    } // root is dropped here, releasing the borrow on svg_data

    Ok(svg_data)
}
