#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Midpoint of the interval.
    pub fn midpoint(&self) -> f64 {
        self.min + self.size() / 2.0
    }

    /// Parametric interval where a ray component enters and leaves the slab
    /// `[slab.min, slab.max]` along one axis.
    ///
    /// A near-zero `direction` yields +/- infinity, so a ray parallel to the
    /// slab is either always or never inside it.
    pub fn slab(origin: f64, direction: f64, slab: Interval) -> Interval {
        let tmin_numerator = slab.min - origin;
        let tmax_numerator = slab.max - origin;

        let (tmin, tmax) = if direction.abs() >= crate::EPSILON {
            (tmin_numerator / direction, tmax_numerator / direction)
        } else {
            (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
        };

        if tmin > tmax {
            Interval::new(tmax, tmin)
        } else {
            Interval::new(tmin, tmax)
        }
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

}
