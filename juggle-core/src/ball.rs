use crate::hand::HandSide;
use crate::vec3::Vec3;

/// Stable index into the session's ball arena. Balls are never removed
/// mid-session, so an id stays valid for the session's lifetime.
pub type BallId = usize;

/// Where a ball currently is. This field is the single source of truth;
/// physics integration is active if and only if the ball is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BallLocation {
    LeftHand,
    RightHand,
    InFlight,
}

impl BallLocation {
    pub fn in_hand(side: HandSide) -> Self {
        match side {
            HandSide::Left => BallLocation::LeftHand,
            HandSide::Right => BallLocation::RightHand,
        }
    }

    /// The hand currently holding this ball, if any.
    pub fn held_by(self) -> Option<HandSide> {
        match self {
            BallLocation::LeftHand => Some(HandSide::Left),
            BallLocation::RightHand => Some(HandSide::Right),
            BallLocation::InFlight => None,
        }
    }

    pub fn is_in_flight(self) -> bool {
        self == BallLocation::InFlight
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ball {
    pub id: BallId,
    pub location: BallLocation,
    pub pos: Vec3,
}
