//! Club inference from shot metrics
//!
//! Pure deterministic classifier over (ball speed, launch angle, spin
//! rate). Evaluates an ordered rule table; the first matching rule wins;
//! no match yields "Unknown". All comparisons are strict.

use crate::types::ShotMetrics;

/// One threshold rule. A metric must clear every bound the rule sets.
struct ClubRule {
    speed_over: Option<f64>,
    speed_under: Option<f64>,
    angle_under: Option<f64>,
    spin_under: Option<f64>,
    spin_over: Option<f64>,
    club: &'static str,
}

impl ClubRule {
    fn matches(&self, speed: f64, angle: f64, spin: f64) -> bool {
        self.speed_over.map_or(true, |t| speed > t)
            && self.speed_under.map_or(true, |t| speed < t)
            && self.angle_under.map_or(true, |t| angle < t)
            && self.spin_under.map_or(true, |t| spin < t)
            && self.spin_over.map_or(true, |t| spin > t)
    }
}

/// Fully open rule; table entries override the bounds they set.
const OPEN: ClubRule = ClubRule {
    speed_over: None,
    speed_under: None,
    angle_under: None,
    spin_under: None,
    spin_over: None,
    club: "Unknown",
};

/// Ordered rule table: woods by descending speed, then hybrids and irons,
/// then wedges by spin. Order is load-bearing - the first match wins.
#[rustfmt::skip]
const CLUB_RULES: &[ClubRule] = &[
    ClubRule { speed_over: Some(165.0), angle_under: Some(15.0), spin_under: Some(3000.0), club: "Driver", ..OPEN },
    ClubRule { speed_over: Some(155.0), angle_under: Some(18.0), spin_under: Some(3500.0), club: "3 Wood", ..OPEN },
    ClubRule { speed_over: Some(145.0), angle_under: Some(20.0), spin_under: Some(4500.0), club: "5 Wood", ..OPEN },
    ClubRule { speed_over: Some(140.0), angle_under: Some(19.0), club: "3 Hybrid", ..OPEN },
    ClubRule { speed_over: Some(135.0), angle_under: Some(21.0), club: "4 Hybrid", ..OPEN },
    ClubRule { speed_over: Some(130.0), angle_under: Some(20.0), club: "3 Iron", ..OPEN },
    ClubRule { speed_over: Some(125.0), angle_under: Some(22.0), club: "4 Iron", ..OPEN },
    ClubRule { speed_over: Some(120.0), angle_under: Some(24.0), club: "5 Iron", ..OPEN },
    ClubRule { speed_over: Some(115.0), angle_under: Some(26.0), club: "6 Iron", ..OPEN },
    ClubRule { speed_over: Some(105.0), angle_under: Some(28.0), club: "7 Iron", ..OPEN },
    ClubRule { speed_over: Some(95.0), angle_under: Some(30.0), club: "8 Iron", ..OPEN },
    ClubRule { speed_over: Some(85.0), angle_under: Some(32.0), club: "9 Iron", ..OPEN },
    ClubRule { speed_over: Some(75.0), spin_over: Some(8000.0), club: "PW", ..OPEN },
    ClubRule { speed_over: Some(65.0), spin_over: Some(9500.0), club: "GW", ..OPEN },
    ClubRule { speed_under: Some(75.0), spin_over: Some(10000.0), club: "SW", ..OPEN },
    ClubRule { speed_under: Some(65.0), spin_over: Some(11000.0), club: "LW", ..OPEN },
];

/// Infer the club label for a set of metrics.
pub fn infer_club(metrics: &ShotMetrics) -> &'static str {
    let (speed, angle, spin) = (metrics.ball_speed, metrics.launch_angle, metrics.spin_rate);

    CLUB_RULES
        .iter()
        .find(|rule| rule.matches(speed, angle, spin))
        .map(|rule| rule.club)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(speed: f64, angle: f64, spin: f64) -> ShotMetrics {
        ShotMetrics {
            ball_speed: speed,
            launch_angle: angle,
            spin_rate: spin,
            carry: 0.0,
            total: 0.0,
            club: String::new(),
            confidence: 0.0,
        }
    }

    #[test]
    fn test_driver() {
        assert_eq!(infer_club(&metrics(170.0, 12.0, 2500.0)), "Driver");
    }

    #[test]
    fn test_woods_by_descending_speed() {
        assert_eq!(infer_club(&metrics(160.0, 16.0, 3200.0)), "3 Wood");
        assert_eq!(infer_club(&metrics(150.0, 18.0, 4000.0)), "5 Wood");
    }

    #[test]
    fn test_driver_speed_with_high_spin_falls_through() {
        // Too much spin for any wood; angle rules catch it as a hybrid
        assert_eq!(infer_club(&metrics(170.0, 14.0, 5000.0)), "3 Hybrid");
    }

    #[test]
    fn test_mid_irons() {
        assert_eq!(infer_club(&metrics(128.0, 20.0, 5500.0)), "4 Iron");
        assert_eq!(infer_club(&metrics(110.0, 26.0, 6500.0)), "7 Iron");
        assert_eq!(infer_club(&metrics(90.0, 30.0, 7500.0)), "9 Iron");
    }

    #[test]
    fn test_wedges_by_spin() {
        assert_eq!(infer_club(&metrics(85.0, 25.0, 9500.0)), "PW");
        assert_eq!(infer_club(&metrics(70.0, 35.0, 9800.0)), "GW");
        assert_eq!(infer_club(&metrics(60.0, 40.0, 10500.0)), "SW");
    }

    #[test]
    fn test_order_is_load_bearing() {
        // 150.2 / 12.5 / 2850 fails "3 Wood" (needs speed > 155) and lands
        // on "5 Wood" as the first satisfied rule.
        assert_eq!(infer_club(&metrics(150.2, 12.5, 2850.0)), "5 Wood");

        // Any shot satisfying LW (speed < 65, spin > 11000) also satisfies
        // SW, which sits earlier in the table; LW never wins.
        assert_eq!(infer_club(&metrics(60.0, 45.0, 11500.0)), "SW");
    }

    #[test]
    fn test_strict_comparisons() {
        // Exactly at the bound does not match (strict >)
        assert_eq!(infer_club(&metrics(165.0, 12.0, 2500.0)), "3 Wood");
    }

    #[test]
    fn test_unmatched_metrics_are_unknown() {
        assert_eq!(infer_club(&metrics(0.0, 0.0, 0.0)), "Unknown");
        assert_eq!(infer_club(&metrics(50.0, 20.0, 3000.0)), "Unknown");
    }
}
