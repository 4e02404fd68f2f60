//! Scatter-plot geometry for a timing record
//!
//! Pure data: the viewer binary turns this into pixels. Y is elapsed time on
//! a log10 axis, X is the trial index.

use crate::timing::TimingRecord;

/// Decade-aligned log10 axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
    lo_exp: i32,
    hi_exp: i32,
}

impl LogScale {
    /// Smallest decade range covering every positive value
    ///
    /// Non-positive values cannot sit on a log axis and are ignored. With no
    /// positive values at all the scale is `[1, 10]`.
    pub fn fit<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| *v > 0.0 && v.is_finite()) {
            let l = v.log10();
            lo = lo.min(l);
            hi = hi.max(l);
        }

        if !lo.is_finite() {
            return LogScale { lo_exp: 0, hi_exp: 1 };
        }

        let lo_exp = lo.floor() as i32;
        let mut hi_exp = hi.ceil() as i32;
        if hi_exp <= lo_exp {
            hi_exp = lo_exp + 1;
        }
        LogScale { lo_exp, hi_exp }
    }

    pub fn min(&self) -> f64 {
        10f64.powi(self.lo_exp)
    }

    pub fn max(&self) -> f64 {
        10f64.powi(self.hi_exp)
    }

    /// Position of `v` on the axis in `0..=1`, `None` if `v <= 0`
    pub fn unit(&self, v: f64) -> Option<f64> {
        if v <= 0.0 || !v.is_finite() {
            return None;
        }
        let span = (self.hi_exp - self.lo_exp) as f64;
        Some(((v.log10() - self.lo_exp as f64) / span).clamp(0.0, 1.0))
    }

    /// Tick exponents, one per decade boundary
    pub fn decades(&self) -> impl Iterator<Item = i32> {
        self.lo_exp..=self.hi_exp
    }
}

/// One strategy's points: `(trial index, elapsed ns)`
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPlot {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<Series>,
    pub y_scale: LogScale,
    /// Largest trial index plotted (at least 1 so the axis has width)
    pub x_max: f64,
}

impl ScatterPlot {
    pub fn from_record(record: &TimingRecord) -> Self {
        let mut series = Vec::with_capacity(record.len());

        for s in record.iter() {
            let mut points = Vec::with_capacity(s.trials.len());
            for (i, &ns) in s.trials.iter().enumerate() {
                if ns == 0 {
                    log::debug!("Skipping zero sample {} for {} on log axis", i, s.strategy);
                    continue;
                }
                points.push((i as f64, ns as f64));
            }
            series.push(Series {
                name: s.strategy.clone(),
                points,
            });
        }

        let y_scale = LogScale::fit(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)));
        let x_max = record.max_trials().saturating_sub(1).max(1) as f64;

        ScatterPlot {
            title: format!("Time taken to produce {} element buffer", record.elements()),
            x_label: "Trial number",
            y_label: "Time taken (ns) [log scale]",
            series,
            y_scale,
            x_max,
        }
    }

    /// Map a data point to `0..=1` plot coordinates, y pointing up
    pub fn project(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let v = self.y_scale.unit(y)?;
        Some(((x / self.x_max).clamp(0.0, 1.0), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_decades() {
        let s = LogScale::fit([150.0, 2_000_000.0]);
        assert_eq!(s.min(), 100.0);
        assert_eq!(s.max(), 10_000_000.0);
        assert_eq!(s.decades().count(), 6);
    }

    #[test]
    fn test_fit_single_power_of_ten_has_width() {
        let s = LogScale::fit([1000.0]);
        assert_eq!(s.min(), 1000.0);
        assert_eq!(s.max(), 10_000.0);
    }

    #[test]
    fn test_fit_ignores_non_positive() {
        let s = LogScale::fit([0.0, -5.0]);
        assert_eq!((s.min(), s.max()), (1.0, 10.0));
        assert_eq!(s.unit(0.0), None);
    }

    #[test]
    fn test_unit_midpoint() {
        let s = LogScale::fit([10.0, 1000.0]);
        let u = s.unit(100.0).unwrap();
        assert!((u - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_record() {
        let mut r = TimingRecord::new(10_000_000);
        for t in [100, 1_000, 10_000] {
            r.push("column_stack", t);
        }
        r.push("fused_loop", 0);

        let plot = ScatterPlot::from_record(&r);
        assert_eq!(plot.title, "Time taken to produce 10000000 element buffer");
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[0].points.len(), 3);
        assert!(plot.series[1].points.is_empty());
        assert_eq!(plot.x_max, 2.0);

        let (x, y) = plot.project(2.0, 10_000.0).unwrap();
        assert_eq!(x, 1.0);
        assert!((y - 1.0).abs() < 1e-12);
    }
}
