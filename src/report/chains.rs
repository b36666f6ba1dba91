//! Per-chart transform chains: cumulative series -> plottable curve.
//!
//! Every chain ends by keeping the `recent` most recent points. Day-indexed
//! curves use the day index (0 = first date column) as x so curves from
//! different regions line up.

use crate::domain::{ChartKind, Curve, ReportSettings, Smoothing};
use crate::math::DaySeries;

/// Build the curve for one chart kind from a cumulative series.
pub fn build_curve(kind: ChartKind, cumulative: &[f64], settings: &ReportSettings) -> Curve {
    let cases = DaySeries::from_slice(cumulative);
    match kind {
        ChartKind::AbsoluteGrowth => day_curve(&smooth(&cases.absolute_growth(), settings), settings),
        ChartKind::GrowthRate => day_curve(&smooth(&cases, settings).growth_rate(), settings),
        ChartKind::SecondOrderGrowthRate => {
            day_curve(&smooth(&cases.absolute_growth(), settings).growth_rate(), settings)
        }
        ChartKind::RateVsCases => rate_vs_cases(&cases, settings),
    }
}

fn smooth(series: &DaySeries, settings: &ReportSettings) -> DaySeries {
    match settings.smoothing {
        Smoothing::Trailing => series.moving_average(settings.window),
        Smoothing::Centered => series.centered_moving_average(settings.window),
    }
}

fn day_curve(series: &DaySeries, settings: &ReportSettings) -> Curve {
    let recent = series.tail(settings.recent);
    Curve::new(recent.days().map(|d| d as f64).collect(), recent.values)
}

/// Smoothed growth rate against smoothed cumulative cases, from the first day
/// the smoothed count exceeds the threshold. Points a log axis cannot show
/// (non-positive on either axis) are dropped after the recent-window cut.
fn rate_vs_cases(cases: &DaySeries, settings: &ReportSettings) -> Curve {
    let smoothed = smooth(cases, settings);
    let above = smoothed.threshold_trim(settings.threshold);
    let rate = smoothed.growth_rate().from_day(above.start_day).tail(settings.recent);

    let (x, y) = rate
        .days()
        .zip(rate.values.iter().copied())
        .filter_map(|(day, r)| smoothed.at_day(day).map(|c| (c, r)))
        .filter(|&(c, r)| c > 0.0 && r > 0.0)
        .unzip();
    Curve::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings(window: usize, recent: usize, threshold: f64) -> ReportSettings {
        ReportSettings {
            window,
            recent,
            threshold,
            ..ReportSettings::default()
        }
    }

    #[test]
    fn absolute_growth_curve_is_smoothed_new_cases() {
        // New cases: 1, 2, 3, 4, 5 (days 1..=5); 3-wide trailing mean -> days 3..=5.
        let cumulative = [0.0, 1.0, 3.0, 6.0, 10.0, 15.0];
        let curve = build_curve(ChartKind::AbsoluteGrowth, &cumulative, &settings(3, 45, 100.0));
        assert_eq!(curve.x, vec![3.0, 4.0, 5.0]);
        assert_eq!(curve.y, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn growth_rate_curve_uses_smoothed_cumulative() {
        let cumulative = [10.0, 20.0, 40.0];
        let curve = build_curve(ChartKind::GrowthRate, &cumulative, &settings(1, 45, 100.0));
        assert_eq!(curve.x, vec![1.0, 2.0]);
        assert_relative_eq!(curve.y[0], 1.0);
        assert_relative_eq!(curve.y[1], 1.0);
    }

    #[test]
    fn second_order_rate_is_rate_of_new_cases() {
        // New cases 10, 20, 30: rates 1.0 and 0.5 on days 2 and 3.
        let cumulative = [0.0, 10.0, 30.0, 60.0];
        let curve = build_curve(ChartKind::SecondOrderGrowthRate, &cumulative, &settings(1, 45, 100.0));
        assert_eq!(curve.x, vec![2.0, 3.0]);
        assert_relative_eq!(curve.y[0], 1.0);
        assert_relative_eq!(curve.y[1], 0.5);
    }

    #[test]
    fn curves_keep_only_recent_points() {
        let cumulative: Vec<f64> = (0..100).map(|d| (d * d) as f64).collect();
        let curve = build_curve(ChartKind::AbsoluteGrowth, &cumulative, &settings(7, 45, 100.0));
        assert_eq!(curve.len(), 45);
        assert_eq!(curve.x.last().copied(), Some(99.0));
    }

    #[test]
    fn rate_vs_cases_starts_above_threshold() {
        let cumulative = [10.0, 50.0, 150.0, 300.0, 600.0];
        let curve = build_curve(ChartKind::RateVsCases, &cumulative, &settings(1, 45, 100.0));
        // Smoothed cases first exceed 100 on day 2; rate on day 2 is (150-50)/50.
        assert_eq!(curve.x, vec![150.0, 300.0, 600.0]);
        assert_relative_eq!(curve.y[0], 2.0);
        assert_relative_eq!(curve.y[1], 1.0);
        assert_relative_eq!(curve.y[2], 1.0);
    }

    #[test]
    fn rate_vs_cases_drops_points_a_log_axis_cannot_show() {
        // Flat stretch gives a zero rate on day 3.
        let cumulative = [200.0, 400.0, 800.0, 800.0, 1600.0];
        let curve = build_curve(ChartKind::RateVsCases, &cumulative, &settings(1, 45, 100.0));
        assert_eq!(curve.x, vec![400.0, 800.0, 1600.0]);
        assert!(curve.y.iter().all(|&r| r > 0.0));
    }

    #[test]
    fn never_exceeding_threshold_gives_empty_curve() {
        let curve = build_curve(ChartKind::RateVsCases, &[1.0, 2.0, 3.0], &settings(1, 45, 100.0));
        assert!(curve.is_empty());
    }

    #[test]
    fn series_shorter_than_window_gives_empty_curves() {
        for kind in ChartKind::ALL {
            let curve = build_curve(kind, &[1.0, 2.0, 3.0], &settings(7, 45, 0.0));
            assert!(curve.is_empty(), "{kind:?} should be empty");
        }
    }

    #[test]
    fn centered_smoothing_keeps_all_days() {
        let s = ReportSettings {
            smoothing: Smoothing::Centered,
            ..settings(3, 45, 100.0)
        };
        let cumulative = [0.0, 1.0, 3.0, 6.0, 10.0, 15.0];
        let curve = build_curve(ChartKind::AbsoluteGrowth, &cumulative, &s);
        assert_eq!(curve.x, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(curve.y[0], 4.0 / 3.0);
    }
}
