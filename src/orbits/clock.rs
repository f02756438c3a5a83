use crate::math::{TAU, is_periodic, wrap_phase};
use crate::{OrreryError, OrreryResult};

/// Per-body phase accumulators, both kept in [0, 2π)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    pub rotation_phase: f64,
    pub revolution_phase: f64,
}

impl SimulationClock {
    /// Clock after `days` of simulated time. Periods that are zero or
    /// infinite leave their phase untouched. Fails without side effects if
    /// a phase increment is not finite.
    pub fn stepped(
        &self,
        days: f64,
        rotation_period: f64,
        revolution_period: f64,
    ) -> OrreryResult<Self> {
        let mut next = *self;
        if is_periodic(rotation_period) {
            next.rotation_phase =
                wrap_phase(self.rotation_phase + phase_increment(days, rotation_period)?);
        }
        if is_periodic(revolution_period) {
            next.revolution_phase =
                wrap_phase(self.revolution_phase + phase_increment(days, revolution_period)?);
        }
        Ok(next)
    }

    pub fn advance(
        &mut self,
        days: f64,
        rotation_period: f64,
        revolution_period: f64,
    ) -> OrreryResult<()> {
        *self = self.stepped(days, rotation_period, revolution_period)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn phase_increment(days: f64, period: f64) -> OrreryResult<f64> {
    let delta = TAU * days / period;
    if delta.is_finite() {
        Ok(delta)
    } else {
        Err(OrreryError::InvalidParameter(format!(
            "phase step of {days} days over a {period}-day period is not finite"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{PI, phase_distance};

    #[test]
    fn test_quarter_period() {
        let mut clock = SimulationClock::default();
        clock.advance(91.25, 1.0, 365.0).unwrap();
        assert!((clock.revolution_phase - PI / 2.0).abs() < 1e-12);
        // 91.25 whole-ish days of spin: a quarter turn left over
        assert!(phase_distance(clock.rotation_phase, PI / 2.0) < 1e-9);
    }

    #[test]
    fn test_retrograde_wraps_positive() {
        let mut clock = SimulationClock::default();
        clock.advance(0.25, -1.0, 0.0).unwrap();
        assert!((clock.rotation_phase - 1.5 * PI).abs() < 1e-12);
        assert_eq!(clock.revolution_phase, 0.0);
    }

    #[test]
    fn test_static_periods_do_not_move() {
        let mut clock = SimulationClock::default();
        clock.advance(10.0, 0.0, f64::INFINITY).unwrap();
        assert_eq!(clock, SimulationClock::default());
    }

    #[test]
    fn test_full_period_returns_to_start() {
        let mut clock = SimulationClock::default();
        clock.advance(0.3, 2.7, 11.0).unwrap();
        let start = clock;

        for _ in 0..27 {
            clock.advance(0.1, 2.7, 11.0).unwrap();
        }
        assert!(phase_distance(clock.rotation_phase, start.rotation_phase) < 1e-9);

        clock.reset();
        assert_eq!(clock, SimulationClock::default());
    }

    #[test]
    fn test_overflowing_step_leaves_clock_untouched() {
        let mut clock = SimulationClock::default();
        clock.advance(0.5, 3.0, 7.0).unwrap();
        let before = clock;

        // Subnormal period turns one day into an infinite angle
        assert!(matches!(
            clock.advance(1.0, 3.0, 1e-310),
            Err(OrreryError::InvalidParameter(_))
        ));
        assert!(clock.advance(f64::INFINITY, 3.0, 7.0).is_err());
        assert_eq!(clock, before);
        assert!(clock.rotation_phase.is_finite());
    }
}
