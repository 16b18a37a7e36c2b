use crate::ellipse::rads;
use std::f64::consts::TAU;

/// Per-session juggling configuration. Static once a session starts.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    /// Total balls introduced into play.
    pub ball_count: usize,
    /// Seconds between ball spawns.
    pub release_interval: f64,
    /// Angular travel from motion start at which a held ball is let go (radians).
    pub release_angle: f64,
    /// Ellipse semi-major axis length.
    pub major_axis: f64,
    /// Ellipse semi-minor axis length.
    pub minor_axis: f64,
    /// Rotation of the ellipse major axis from the x-axis, ccw positive (radians).
    pub tilt: f64,
    /// When set, the scheduler discards its very first due spawn opportunity,
    /// delaying the first ball by one interval. Observed in one variant of the
    /// original pattern timing; off by default.
    #[serde(default)]
    pub skip_first_spawn_opportunity: bool,
}

impl SessionConfig {
    /// 3 ball cascade
    pub fn cascade_3() -> Self {
        Self {
            ball_count: 3,
            release_interval: 1.1,
            release_angle: rads(220.0),
            major_axis: 3.0,
            minor_axis: 1.0,
            tilt: rads(60.0),
            skip_first_spawn_opportunity: false,
        }
    }

    /// 5 ball cascade
    pub fn cascade_5() -> Self {
        Self {
            ball_count: 5,
            release_interval: 0.68,
            ..Self::cascade_3()
        }
    }

    /// 4 ball fountain
    pub fn fountain_4() -> Self {
        Self {
            ball_count: 4,
            release_interval: 0.83,
            release_angle: rads(120.0),
            major_axis: 3.0,
            minor_axis: 1.2,
            tilt: rads(120.0),
            skip_first_spawn_opportunity: false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ball_count == 0 {
            return Err("ball_count must be >= 1".to_string());
        }
        if !self.release_interval.is_finite() || self.release_interval <= 0.0 {
            return Err("release_interval must be finite and > 0".to_string());
        }
        if !self.release_angle.is_finite() || self.release_angle <= 0.0 {
            return Err("release_angle must be finite and > 0".to_string());
        }
        // The release must happen strictly before the hand completes its
        // full turn, or a held ball would never be let go mid-swing.
        if self.release_angle >= TAU {
            return Err("release_angle must be < 360 degrees".to_string());
        }
        if !self.major_axis.is_finite() || self.major_axis <= 0.0 {
            return Err("major_axis must be finite and > 0".to_string());
        }
        if !self.minor_axis.is_finite() || self.minor_axis <= 0.0 {
            return Err("minor_axis must be finite and > 0".to_string());
        }
        if !self.tilt.is_finite() {
            return Err("tilt must be finite".to_string());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::cascade_3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert!(SessionConfig::cascade_3().validate().is_ok());
        assert!(SessionConfig::cascade_5().validate().is_ok());
        assert!(SessionConfig::fountain_4().validate().is_ok());
    }

    #[test]
    fn default_is_three_ball_cascade() {
        assert_eq!(SessionConfig::default(), SessionConfig::cascade_3());
    }

    #[test]
    fn zero_ball_count_invalid() {
        let mut config = SessionConfig::default();
        config.ball_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_release_interval_invalid() {
        let mut config = SessionConfig::default();
        config.release_interval = 0.0;
        assert!(config.validate().is_err());
        config.release_interval = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn release_angle_full_turn_or_more_invalid() {
        let mut config = SessionConfig::default();
        config.release_angle = TAU;
        assert!(config.validate().is_err());
        config.release_angle = rads(400.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn release_angle_just_under_full_turn_valid() {
        let mut config = SessionConfig::default();
        config.release_angle = rads(359.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_axes_invalid() {
        let mut config = SessionConfig::default();
        config.major_axis = 0.0;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.minor_axis = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_fields_invalid() {
        let mut config = SessionConfig::default();
        config.tilt = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.release_interval = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&SessionConfig::cascade_3()).unwrap();
        assert!(json.contains("\"ballCount\":3"));
        assert!(json.contains("\"releaseInterval\":1.1"));

        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SessionConfig::cascade_3());
    }
}
