/// Linear interpolation of `value` from `[domain_min, domain_max]` onto
/// `[range_min, range_max]`.
///
/// The domain must not be degenerate; use [`ChartScale`] when it might be.
/// Both domain endpoints land exactly on their range endpoints.
pub fn scale(value: f64, domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> f64 {
    let t = (value - domain_min) / (domain_max - domain_min);
    range_min * (1.0 - t) + range_max * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl ChartScale {
    /// A zero-width domain is widened by half a unit on each side so that its
    /// single value maps to the middle of the range.
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        Self {
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = scale(
            value,
            self.domain.0,
            self.domain.1,
            self.range.0 as f64,
            self.range.1 as f64,
        ) as f32;
        if res.is_nan() || res.is_infinite() {
            self.range.0
        } else {
            res
        }
    }
}
