use crate::ball::BallId;
use crate::config::SessionConfig;
use crate::ellipse::ellipse_offset;
use crate::vec3::{vec3, Vec3};
use std::f64::consts::TAU;

/// Angular speed of a swinging hand in rad/s (300 degrees per second).
/// Pre-computed since float arithmetic is not const fn.
pub const SWING_RATE: f64 = 5.235987755982989;

/// Horizontal distance between the two hands' rotation centers.
pub const HAND_SPACING: f64 = 4.0;

/// Rest offset of a held ball above the palm.
pub const GRIP_OFFSET: Vec3 = Vec3 {
    x: 0.0,
    y: 0.4,
    z: 0.0,
};

/// Ellipse angle a hand rests at, and snaps back to after a full swing.
const REST_ANGLE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn other(self) -> HandSide {
        match self {
            HandSide::Left => HandSide::Right,
            HandSide::Right => HandSide::Left,
        }
    }

    /// Swing direction: left hand counter-clockwise, right hand clockwise,
    /// producing the mirrored cascade/fountain pattern.
    pub fn spin(self) -> f64 {
        match self {
            HandSide::Left => 1.0,
            HandSide::Right => -1.0,
        }
    }

    /// Fixed point the hand's elliptical path is centered on.
    pub fn rotation_center(self) -> Vec3 {
        match self {
            HandSide::Left => vec3(-HAND_SPACING / 2.0, 0.0, 0.0),
            HandSide::Right => vec3(HAND_SPACING / 2.0, 0.0, 0.0),
        }
    }
}

/// Outcome of one frame of [`Hand::step_swing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingStep {
    /// Still travelling the ellipse.
    Swinging,
    /// Crossed the release threshold this frame; the ball is now loose.
    Released(BallId),
    /// Completed a full turn and snapped back to rest.
    Completed,
}

#[derive(Debug, Clone)]
pub struct Hand {
    pub side: HandSide,
    pub is_moving: bool,
    pub move_start_time: f64,
    pub held_ball: Option<BallId>,
    pub pos: Vec3,
}

impl Hand {
    pub fn new(side: HandSide, config: &SessionConfig) -> Self {
        let mut hand = Self {
            side,
            is_moving: false,
            move_start_time: 0.0,
            held_ball: None,
            pos: vec3(0.0, 0.0, 0.0),
        };
        hand.pos = hand.rest_position(config);
        hand
    }

    /// Signed angular rate: opposite directions for left and right hand.
    pub fn angular_rate(&self) -> f64 {
        SWING_RATE * self.side.spin()
    }

    pub fn rest_position(&self, config: &SessionConfig) -> Vec3 {
        Self::position_at(self.side, REST_ANGLE, config)
    }

    fn position_at(side: HandSide, angle: f64, config: &SessionConfig) -> Vec3 {
        let center = side.rotation_center();
        let (dx, dy) = ellipse_offset(angle, config.tilt, config.major_axis, config.minor_axis);
        vec3(center.x + dx, center.y + dy, center.z)
    }

    /// Begin (or restart) a swing from a contact event. `time` must be the
    /// event's timestamp so the first frame's elapsed time is near zero.
    pub fn catch(&mut self, ball: BallId, time: f64) {
        self.is_moving = true;
        self.move_start_time = time;
        self.held_ball = Some(ball);
    }

    /// Advance one frame of a swing. Only meaningful while `is_moving`.
    pub fn step_swing(&mut self, now: f64, config: &SessionConfig) -> SwingStep {
        let delta_angle = (now - self.move_start_time) * self.angular_rate();
        // The release check runs first: a single laggy frame may jump past
        // both the release threshold and the full turn, and the throw must
        // not be swallowed. Completion then lands on the next frame.
        if delta_angle.abs() > config.release_angle {
            if let Some(ball) = self.held_ball.take() {
                self.pos = Self::position_at(self.side, REST_ANGLE + delta_angle, config);
                return SwingStep::Released(ball);
            }
        }
        if delta_angle.abs() > TAU {
            self.is_moving = false;
            self.move_start_time = now;
            self.pos = self.rest_position(config);
            return SwingStep::Completed;
        }
        self.pos = Self::position_at(self.side, REST_ANGLE + delta_angle, config);
        SwingStep::Swinging
    }

    /// Idle hands keep their reference time fresh so a resumed swing
    /// measures elapsed time from the moment it starts.
    pub fn refresh_idle(&mut self, now: f64) {
        self.move_start_time = now;
    }
}
