//! PNG charts via Plotters' bitmap backend.
//!
//! Curves are buffered until `finish_chart`, because axis ranges depend on all
//! of them. Day-indexed x axes are labelled with calendar dates when the
//! dataset's start date is known.

use chrono::{Duration, NaiveDate};
use log::{debug, info};
use plotters::coord::CoordTranslate;
use plotters::prelude::*;

use crate::domain::{AxisScale, ChartSpec, Curve};
use crate::error::AppError;
use crate::plot::ChartSink;

const SIZE: (u32, u32) = (1280, 720);

const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

struct OpenChart {
    spec: ChartSpec,
    curves: Vec<(String, Vec<(f64, f64)>)>,
}

/// Writes one PNG per finished chart.
#[derive(Default)]
pub struct PngChartSink {
    open: Option<OpenChart>,
}

impl PngChartSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChartSink for PngChartSink {
    fn begin_chart(&mut self, spec: &ChartSpec) -> Result<(), AppError> {
        if let Some(prev) = &self.open {
            return Err(AppError::render(format!(
                "Chart '{}' is still open; finish it before starting another.",
                prev.spec.path.display()
            )));
        }
        self.open = Some(OpenChart {
            spec: spec.clone(),
            curves: Vec::new(),
        });
        Ok(())
    }

    fn add_curve(&mut self, label: &str, curve: &Curve) -> Result<(), AppError> {
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| AppError::render("No open chart: begin_chart was not called."))?;
        let points: Vec<(f64, f64)> = curve.points().filter(|(x, y)| x.is_finite() && y.is_finite()).collect();
        if points.is_empty() {
            debug!("'{label}' has no points on {}", open.spec.kind.file_name());
        }
        open.curves.push((label.to_string(), points));
        Ok(())
    }

    fn finish_chart(&mut self) -> Result<(), AppError> {
        let open = self
            .open
            .take()
            .ok_or_else(|| AppError::render("No open chart: begin_chart was not called."))?;
        render(&open).map_err(|e| {
            AppError::render(format!("Failed to render chart '{}': {e}", open.spec.path.display()))
        })?;
        info!("Wrote {} ({} curves)", open.spec.path.display(), open.curves.len());
        Ok(())
    }
}

fn render(chart: &OpenChart) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(&chart.spec.path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    match chart.spec.kind.scale() {
        AxisScale::Linear => draw_linear(&root, chart)?,
        AxisScale::LogLog => draw_loglog(&root, chart)?,
    }

    root.present()?;
    Ok(())
}

fn draw_linear<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &OpenChart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let kind = chart.spec.kind;
    let ((x0, x1), (y0, y1)) = bounds(&chart.curves, |_| true).unwrap_or(((0.0, 1.0), (0.0, 1.0)));
    let (x0, x1) = pad(x0, x1, 0.0);
    let (y0, y1) = pad(y0, y1, 0.05);

    let mut ctx = ChartBuilder::on(root)
        .caption(kind.title(), ("sans-serif", 32))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let start_date = chart.spec.start_date.filter(|_| kind.x_is_day());
    ctx.configure_mesh()
        .x_desc(kind.x_desc())
        .y_desc(kind.y_desc())
        .x_labels(10)
        .x_label_formatter(&|v| format_day(start_date, *v))
        .y_label_formatter(&|v| format_value(*v))
        .draw()?;

    draw_curves(&mut ctx, &chart.curves)
}

fn draw_loglog<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    chart: &OpenChart,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let kind = chart.spec.kind;
    let positive = |&(x, y): &(f64, f64)| x > 0.0 && y > 0.0;
    let ((x0, x1), (y0, y1)) = bounds(&chart.curves, positive).unwrap_or(((1.0, 10.0), (0.01, 1.0)));
    let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 / 2.0, x1 * 2.0) };
    let (y0, y1) = if y1 > y0 { (y0, y1) } else { (y0 / 2.0, y1 * 2.0) };

    let mut ctx = ChartBuilder::on(root)
        .caption(kind.title(), ("sans-serif", 32))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d((x0..x1 * 1.1).log_scale(), (y0..y1 * 1.1).log_scale())?;

    ctx.configure_mesh()
        .x_desc(kind.x_desc())
        .y_desc(kind.y_desc())
        .x_label_formatter(&|v| format_value(*v))
        .y_label_formatter(&|v| format_value(*v))
        .draw()?;

    // Log axes cannot show non-positive values.
    let curves: Vec<(String, Vec<(f64, f64)>)> = chart
        .curves
        .iter()
        .map(|(label, pts)| (label.clone(), pts.iter().copied().filter(positive).collect()))
        .collect();
    draw_curves(&mut ctx, &curves)
}

fn draw_curves<'a, DB, CT>(
    ctx: &mut ChartContext<'a, DB, CT>,
    curves: &[(String, Vec<(f64, f64)>)],
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let mut drawn = 0usize;
    for (idx, (label, points)) in curves.iter().enumerate() {
        if points.is_empty() {
            continue;
        }
        let color = PALETTE[idx % PALETTE.len()];
        ctx.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        drawn += 1;
    }

    if drawn > 0 {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// Min/max over all points accepted by `keep`; `None` if there are none.
fn bounds(
    curves: &[(String, Vec<(f64, f64)>)],
    keep: impl Fn(&(f64, f64)) -> bool,
) -> Option<((f64, f64), (f64, f64))> {
    let mut pts = curves.iter().flat_map(|(_, p)| p.iter()).filter(|p| keep(*p));
    let &(fx, fy) = pts.next()?;
    let init = ((fx, fx), (fy, fy));
    Some(pts.fold(init, |((x0, x1), (y0, y1)), &(x, y)| {
        ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y)))
    }))
}

/// Widen a range by `frac` of its span on both sides; a degenerate range gets ±1.
fn pad(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * frac, hi + span * frac)
}

fn format_day(start: Option<NaiveDate>, day: f64) -> String {
    match start {
        Some(start) if day.is_finite() => start
            .checked_add_signed(Duration::days(day.round() as i64))
            .map(|d| d.format("%m/%d").to_string())
            .unwrap_or_default(),
        _ => format!("{day:.0}"),
    }
}

fn format_value(v: f64) -> String {
    let a = v.abs();
    if a >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if a >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else if a >= 1.0 || a == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_curves() {
        let curves = vec![
            ("a".to_string(), vec![(1.0, 5.0), (2.0, -1.0)]),
            ("b".to_string(), vec![]),
            ("c".to_string(), vec![(0.0, 3.0)]),
        ];
        assert_eq!(bounds(&curves, |_| true), Some(((0.0, 2.0), (-1.0, 5.0))));
        assert_eq!(
            bounds(&curves, |&(x, y)| x > 0.0 && y > 0.0),
            Some(((1.0, 1.0), (5.0, 5.0)))
        );
        assert_eq!(bounds(&[], |_| true), None);
    }

    #[test]
    fn day_ticks_use_calendar_dates_when_known() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 22);
        assert_eq!(format_day(start, 10.0), "02/01");
        assert_eq!(format_day(None, 10.0), "10");
    }

    #[test]
    fn value_ticks_are_compact() {
        assert_eq!(format_value(2_500_000.0), "2.5M");
        assert_eq!(format_value(1_500.0), "1.5k");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(0.125), "0.125");
    }

    #[test]
    fn degenerate_range_is_widened() {
        assert_eq!(pad(3.0, 3.0, 0.05), (2.0, 4.0));
        assert_eq!(pad(0.0, 10.0, 0.1), (-1.0, 11.0));
    }

    #[test]
    fn finish_without_begin_is_an_error() {
        let mut sink = PngChartSink::new();
        assert!(sink.finish_chart().is_err());
    }
}
