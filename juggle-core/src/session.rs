use crate::ball::{Ball, BallId, BallLocation};
use crate::config::SessionConfig;
use crate::hand::{Hand, HandSide, SwingStep, GRIP_OFFSET};
use crate::scheduler::SpawnScheduler;
use crate::vec3::{add, Vec3};

/// Physics-node identity at the contact boundary. The host reports contacts
/// in terms of these tags instead of raw node handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactNode {
    Hand(HandSide),
    Ball(BallId),
}

/// Instruction to the render/physics host, emitted by [`Session::advance`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostCommand {
    /// Instantiate a renderable/physical ball at `pos`.
    SpawnBall { id: BallId, pos: Vec3 },
    /// Enable or suspend free-flight integration for a ball. Contact
    /// detection is unaffected.
    SetBallActive { id: BallId, active: bool },
    SetBallPosition { id: BallId, pos: Vec3 },
    SetHandPosition { side: HandSide, pos: Vec3 },
}

/// A juggling session: both hands, the ball arena and the spawn scheduler,
/// advanced synchronously by the host's per-frame callback.
pub struct Session {
    pub config: SessionConfig,
    now: f64,
    hands: [Hand; 2],
    balls: Vec<Ball>,
    scheduler: SpawnScheduler,
    command_buffer: Vec<HostCommand>,
    /// Balls released into flight since session start.
    balls_thrown: u64,
    /// Contact events that resulted in a catch.
    balls_caught: u64,
}

fn hand_index(side: HandSide) -> usize {
    match side {
        HandSide::Left => 0,
        HandSide::Right => 1,
    }
}

impl Session {
    /// Build a session, rejecting invalid configuration up front.
    pub fn new(config: SessionConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            hands: [
                Hand::new(HandSide::Left, &config),
                Hand::new(HandSide::Right, &config),
            ],
            balls: Vec::with_capacity(config.ball_count),
            scheduler: SpawnScheduler::new(
                config.ball_count,
                config.release_interval,
                config.skip_first_spawn_opportunity,
            ),
            now: 0.0,
            command_buffer: Vec::new(),
            balls_thrown: 0,
            balls_caught: 0,
            config,
        })
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn hand(&self, side: HandSide) -> &Hand {
        &self.hands[hand_index(side)]
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(id)
    }

    pub fn balls_thrown(&self) -> u64 {
        self.balls_thrown
    }

    pub fn balls_caught(&self) -> u64 {
        self.balls_caught
    }

    /// Advance the simulation one frame. Phases run in a fixed order so a
    /// ball spawned this tick is repositioned this tick, and a ball released
    /// this tick is activated this tick.
    pub fn advance(&mut self, dt: f64) -> Vec<HostCommand> {
        self.now += dt;
        // Take buffer out of self to avoid borrow conflicts
        let mut commands = std::mem::take(&mut self.command_buffer);
        commands.clear();

        // 1. Spawn scheduling.
        if let Some(side) = self.scheduler.poll(self.now) {
            let id = self.balls.len();
            let hand = &mut self.hands[hand_index(side)];
            let pos = add(hand.pos, GRIP_OFFSET);
            // The new ball takes the grip. If the hand was still holding
            // one, that ball goes loose, keeping the hold-at-most-one rule
            // and the location/held agreement intact.
            if let Some(evicted) = hand.held_ball.replace(id) {
                self.balls[evicted].location = BallLocation::InFlight;
            }
            self.balls.push(Ball {
                id,
                location: BallLocation::in_hand(side),
                pos,
            });
            commands.push(HostCommand::SpawnBall { id, pos });
        }

        // 2. Hand motion, then idle reference-time refresh.
        for i in 0..self.hands.len() {
            let hand = &mut self.hands[i];
            if hand.is_moving {
                if let SwingStep::Released(id) = hand.step_swing(self.now, &self.config) {
                    self.balls[id].location = BallLocation::InFlight;
                    self.balls_thrown += 1;
                }
            } else {
                hand.refresh_idle(self.now);
            }
            commands.push(HostCommand::SetHandPosition {
                side: hand.side,
                pos: hand.pos,
            });
        }

        // 3. Ball repositioning and body activation.
        for ball in &mut self.balls {
            match ball.location.held_by() {
                Some(side) => {
                    ball.pos = add(self.hands[hand_index(side)].pos, GRIP_OFFSET);
                    commands.push(HostCommand::SetBallActive {
                        id: ball.id,
                        active: false,
                    });
                    commands.push(HostCommand::SetBallPosition {
                        id: ball.id,
                        pos: ball.pos,
                    });
                }
                None => {
                    commands.push(HostCommand::SetBallActive {
                        id: ball.id,
                        active: true,
                    });
                }
            }
        }

        // Return buffer for reuse next tick
        let result = commands.clone();
        self.command_buffer = commands;
        result
    }

    /// Contact-begin event from the host. Only `{Hand, Ball}` pairs act;
    /// every other category combination is ignored harmlessly. `time` is the
    /// event's simulation timestamp and becomes the swing's reference time.
    /// Returns whether the contact resulted in a catch.
    pub fn contact_began(&mut self, a: ContactNode, b: ContactNode, time: f64) -> bool {
        let (side, ball_id) = match (a, b) {
            (ContactNode::Hand(hand), ContactNode::Ball(ball))
            | (ContactNode::Ball(ball), ContactNode::Hand(hand)) => (hand, ball),
            _ => return false,
        };
        let ball_location = match self.balls.get(ball_id) {
            Some(ball) => ball.location,
            None => return false,
        };
        // A ball possessed by the other hand cannot be caught.
        if let Some(owner) = ball_location.held_by() {
            if owner != side {
                return false;
            }
        }
        let hand = &mut self.hands[hand_index(side)];
        // Repeat contact for a pair already mid-swing: no double-attachment.
        if hand.is_moving && hand.held_ball == Some(ball_id) {
            return false;
        }
        // A hand holds at most one ball.
        if hand.held_ball.is_some() && hand.held_ball != Some(ball_id) {
            return false;
        }
        hand.catch(ball_id, time);
        self.balls[ball_id].location = BallLocation::in_hand(side);
        self.balls_caught += 1;
        true
    }

    /// Write-back for a free-flight ball position integrated by the host.
    /// Ignored for held balls, whose placement the session owns.
    pub fn set_flight_position(&mut self, id: BallId, pos: Vec3) {
        if let Some(ball) = self.balls.get_mut(id) {
            if ball.location.is_in_flight() {
                ball.pos = pos;
            }
        }
    }
}
