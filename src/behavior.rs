use crate::appearance::Behavior;

/// Progress values this close to 0 or 1 count as the bound itself.
///
/// Sub-pixel for any bar narrower than a thousand pixels, and wide enough to
/// absorb floating point noise left over by an animated transition.
pub const VISIBILITY_EPSILON: f64 = 1e-3;

/// Decides whether the stripes are drawn for the given progress.
///
/// Recomputed on every draw; holds no state.
pub fn stripes_visible(progress: f64, behavior: Behavior, hide_stripes: bool) -> bool {
    if hide_stripes {
        return false;
    }
    match behavior {
        Behavior::Default => true,
        Behavior::Indeterminate => progress.abs() <= VISIBILITY_EPSILON,
        Behavior::Waiting => (1.0 - progress).abs() <= VISIBILITY_EPSILON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_follows_hide_flag() {
        assert!(stripes_visible(0.0, Behavior::Default, false));
        assert!(stripes_visible(0.5, Behavior::Default, false));
        assert!(stripes_visible(1.0, Behavior::Default, false));
        assert!(!stripes_visible(0.5, Behavior::Default, true));
    }

    #[test]
    fn test_indeterminate_only_near_zero() {
        assert!(stripes_visible(0.0, Behavior::Indeterminate, false));
        assert!(stripes_visible(0.0005, Behavior::Indeterminate, false));
        assert!(!stripes_visible(0.5, Behavior::Indeterminate, false));
        assert!(!stripes_visible(1.0, Behavior::Indeterminate, false));
        assert!(!stripes_visible(0.0, Behavior::Indeterminate, true));
    }

    #[test]
    fn test_waiting_only_near_one() {
        assert!(stripes_visible(1.0, Behavior::Waiting, false));
        assert!(stripes_visible(0.9995, Behavior::Waiting, false));
        assert!(!stripes_visible(0.0, Behavior::Waiting, false));
        assert!(!stripes_visible(0.5, Behavior::Waiting, false));
        assert!(!stripes_visible(1.0, Behavior::Waiting, true));
    }
}
