use super::HitTier;

pub struct HitWindow {
    pub great: f64,
    pub good: f64,
    pub meh: f64,
}

impl HitWindow {
    pub fn from_od(od: f64) -> Self {
        HitWindow {
            great: 80.0 - 6.0 * od,
            good: 140.0 - 8.0 * od,
            meh: 200.0 - 10.0 * od,
        }
    }

    /// Tier for a click `hit_error` milliseconds away from the object
    ///
    /// `None` means the click is outside of every window and
    /// should be ignored
    pub fn judge(&self, hit_error: f64) -> Option<HitTier> {
        let hit_error = hit_error.abs();

        if hit_error <= self.great {
            return Some(HitTier::Great);
        }

        if hit_error <= self.good {
            return Some(HitTier::Good);
        }

        if hit_error <= self.meh {
            return Some(HitTier::Meh);
        }

        None
    }

    /// Object was never clicked and its last window has passed
    #[inline]
    pub fn is_missed(&self, object_time: f64, time: f64) -> bool {
        time - object_time > self.meh
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::from_od(5.0)
    }
}
