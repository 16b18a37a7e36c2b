//! Minimal physics host: semi-implicit Euler gravity for active bodies and
//! edge-triggered hand/ball contact detection.

use juggle_core::ball::BallId;
use juggle_core::hand::HandSide;
use juggle_core::session::{ContactNode, HostCommand};
use juggle_core::vec3::{add, distance, scale, sub, vec3, Vec3};
use std::collections::{HashMap, HashSet};

/// Downward gravity (m/s^2).
const GRAVITY: f64 = -9.81;

/// Ball contact radius.
const BALL_RADIUS: f64 = 0.25;

/// Reach of the palm around the hand center. A contact begins when a ball
/// center comes within `BALL_RADIUS + PALM_REACH` of a hand center.
const PALM_REACH: f64 = 0.4;

#[derive(Debug, Clone)]
struct BallBody {
    pos: Vec3,
    vel: Vec3,
    /// Whether free-flight integration is enabled. Suspended bodies still
    /// take part in contact detection.
    active: bool,
}

/// A render/physics host good enough to close the juggling loop without a
/// scene graph. Built for a fixed timestep: kinematic velocity estimation
/// for suspended bodies divides by the tick length, so a released ball
/// carries the hand's launch velocity into flight.
pub struct HeadlessHost {
    tick_dt: f64,
    bodies: HashMap<BallId, BallBody>,
    hand_pos: [Vec3; 2],
    touching: HashSet<(HandSide, BallId)>,
}

fn hand_index(side: HandSide) -> usize {
    match side {
        HandSide::Left => 0,
        HandSide::Right => 1,
    }
}

impl HeadlessHost {
    pub fn new(tick_dt: f64) -> Self {
        Self {
            tick_dt,
            bodies: HashMap::new(),
            hand_pos: [vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 0.0)],
            touching: HashSet::new(),
        }
    }

    /// Apply one frame's worth of session commands.
    pub fn apply(&mut self, commands: &[HostCommand]) {
        for command in commands {
            match command {
                HostCommand::SpawnBall { id, pos } => {
                    self.bodies.insert(
                        *id,
                        BallBody {
                            pos: *pos,
                            vel: vec3(0.0, 0.0, 0.0),
                            active: false,
                        },
                    );
                }
                HostCommand::SetBallActive { id, active } => {
                    if let Some(body) = self.bodies.get_mut(id) {
                        body.active = *active;
                    }
                }
                HostCommand::SetBallPosition { id, pos } => {
                    if let Some(body) = self.bodies.get_mut(id) {
                        // Kinematic move; remember the implied velocity so a
                        // release hands it off to free flight.
                        body.vel = scale(sub(*pos, body.pos), 1.0 / self.tick_dt);
                        body.pos = *pos;
                    }
                }
                HostCommand::SetHandPosition { side, pos } => {
                    self.hand_pos[hand_index(*side)] = *pos;
                }
            }
        }
    }

    /// Integrate gravity for all active bodies.
    pub fn integrate(&mut self, dt: f64) {
        for body in self.bodies.values_mut() {
            if body.active {
                body.vel.y += GRAVITY * dt;
                body.pos = add(body.pos, scale(body.vel, dt));
            }
        }
    }

    /// Positions of all bodies currently in free flight.
    pub fn active_balls(&self) -> Vec<(BallId, Vec3)> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.active)
            .map(|(id, body)| (*id, body.pos))
            .collect()
    }

    pub fn ball_position(&self, id: BallId) -> Option<Vec3> {
        self.bodies.get(&id).map(|body| body.pos)
    }

    pub fn ball_velocity(&self, id: BallId) -> Option<Vec3> {
        self.bodies.get(&id).map(|body| body.vel)
    }

    /// Hand/ball pairs that began touching since the previous call.
    pub fn contact_begins(&mut self) -> Vec<(ContactNode, ContactNode)> {
        let mut begins = Vec::new();
        for (id, body) in &self.bodies {
            for side in [HandSide::Left, HandSide::Right] {
                let reach = BALL_RADIUS + PALM_REACH;
                if distance(body.pos, self.hand_pos[hand_index(side)]) <= reach {
                    if self.touching.insert((side, *id)) {
                        begins.push((ContactNode::Hand(side), ContactNode::Ball(*id)));
                    }
                } else {
                    self.touching.remove(&(side, *id));
                }
            }
        }
        begins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn spawn(host: &mut HeadlessHost, id: BallId, pos: Vec3) {
        host.apply(&[HostCommand::SpawnBall { id, pos }]);
    }

    #[test]
    fn suspended_body_does_not_fall() {
        let mut host = HeadlessHost::new(DT);
        spawn(&mut host, 0, vec3(0.0, 2.0, 0.0));
        for _ in 0..60 {
            host.integrate(DT);
        }
        assert_eq!(host.ball_position(0), Some(vec3(0.0, 2.0, 0.0)));
    }

    #[test]
    fn active_body_falls_under_gravity() {
        let mut host = HeadlessHost::new(DT);
        spawn(&mut host, 0, vec3(0.0, 2.0, 0.0));
        host.apply(&[HostCommand::SetBallActive { id: 0, active: true }]);
        for _ in 0..60 {
            host.integrate(DT);
        }
        let pos = host.ball_position(0).unwrap();
        assert!(pos.y < 2.0 - 4.0, "fell only to {}", pos.y);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn kinematic_moves_imply_launch_velocity() {
        let mut host = HeadlessHost::new(DT);
        spawn(&mut host, 0, vec3(0.0, 0.0, 0.0));
        // Move right at 3 m/s for a few frames, then release.
        for i in 1..=5 {
            host.apply(&[HostCommand::SetBallPosition {
                id: 0,
                pos: vec3(3.0 * DT * i as f64, 0.0, 0.0),
            }]);
        }
        let vel = host.ball_velocity(0).unwrap();
        assert!((vel.x - 3.0).abs() < 1e-9);

        host.apply(&[HostCommand::SetBallActive { id: 0, active: true }]);
        host.integrate(DT);
        assert!(host.ball_position(0).unwrap().x > 3.0 * DT * 5.0);
    }

    #[test]
    fn contact_begin_fires_once_per_touch_episode() {
        let mut host = HeadlessHost::new(DT);
        host.apply(&[
            HostCommand::SetHandPosition {
                side: HandSide::Left,
                pos: vec3(0.0, 0.0, 0.0),
            },
            HostCommand::SetHandPosition {
                side: HandSide::Right,
                pos: vec3(10.0, 0.0, 0.0),
            },
        ]);
        spawn(&mut host, 0, vec3(0.0, 0.4, 0.0));

        let first = host.contact_begins();
        assert_eq!(
            first,
            vec![(
                ContactNode::Hand(HandSide::Left),
                ContactNode::Ball(0)
            )]
        );
        // Still overlapping: no repeat event.
        assert!(host.contact_begins().is_empty());

        // Separate, then touch again: a new begin event.
        host.apply(&[HostCommand::SetBallPosition {
            id: 0,
            pos: vec3(5.0, 0.0, 0.0),
        }]);
        assert!(host.contact_begins().is_empty());
        host.apply(&[HostCommand::SetBallPosition {
            id: 0,
            pos: vec3(0.0, 0.4, 0.0),
        }]);
        assert_eq!(host.contact_begins().len(), 1);
    }

    #[test]
    fn distant_hand_produces_no_contact() {
        let mut host = HeadlessHost::new(DT);
        host.apply(&[HostCommand::SetHandPosition {
            side: HandSide::Right,
            pos: vec3(2.0, 0.0, 0.0),
        }]);
        spawn(&mut host, 0, vec3(-2.0, 0.0, 0.0));
        assert!(host.contact_begins().is_empty());
    }
}
