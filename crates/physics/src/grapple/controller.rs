use bevy::prelude::*;

use super::{launch::launch_velocity, GrappleConfig, GrappleConfigErr, ScanResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GrapplePhase {
    #[default]
    Idle,
    //the anchor is fixed for the whole episode
    Attached { attach_point: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrappleState {
    phase: GrapplePhase,
    //in [pull_acceleration, pull_acceleration_cap] while attached
    current_pull_acceleration: f32,
    //sampled every fixed tick while attached, consumed by the launch
    last_observed_velocity: Vec3,
    //advisory only, drives the crosshair
    can_attach_now: bool,
}

impl GrappleState {
    pub fn phase(&self) -> GrapplePhase {
        self.phase
    }
    pub fn current_pull_acceleration(&self) -> f32 {
        self.current_pull_acceleration
    }
    pub fn last_observed_velocity(&self) -> Vec3 {
        self.last_observed_velocity
    }
    pub fn can_attach_now(&self) -> bool {
        self.can_attach_now
    }
}

//button edges seen this frame, cleared once the controller has consumed them
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrappleInput {
    pub pressed: bool,
    pub released: bool,
}

impl GrappleInput {
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseReason {
    Input,
    //got within attach_radius_threshold of the anchor
    Arrived,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrappleTransition {
    Attached {
        point: Vec3,
        surface: Entity,
    },
    Launched {
        velocity: Vec3,
        attach_point: Vec3,
        reason: ReleaseReason,
    },
}

//what the crosshair should show. suppressed while attached, so it keeps its last look
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttachIndicator {
    pub can_attach: bool,
    pub suppressed: bool,
}

#[derive(Component, Clone, Debug)]
#[require(GrappleInput, AttachIndicator, super::GrappleScan)]
pub struct GrappleController {
    config: GrappleConfig,
    state: GrappleState,
}

impl GrappleController {
    pub fn new(config: GrappleConfig) -> Result<Self, GrappleConfigErr> {
        config.validate()?;
        Ok(Self::new_unchecked(config))
    }

    pub fn new_or_default(config: GrappleConfig) -> Self {
        match Self::new(config) {
            Ok(controller) => controller,
            Err(e) => {
                warn!("invalid grapple config, falling back to defaults: {}", e);
                Self::new_unchecked(GrappleConfig::default())
            }
        }
    }

    fn new_unchecked(config: GrappleConfig) -> Self {
        Self {
            state: GrappleState {
                phase: GrapplePhase::Idle,
                current_pull_acceleration: config.pull_acceleration,
                last_observed_velocity: Vec3::ZERO,
                can_attach_now: false,
            },
            config,
        }
    }

    pub fn config(&self) -> &GrappleConfig {
        &self.config
    }
    pub fn state(&self) -> &GrappleState {
        &self.state
    }
    pub fn is_attached(&self) -> bool {
        matches!(self.state.phase, GrapplePhase::Attached { .. })
    }
    pub fn attach_point(&self) -> Option<Vec3> {
        match self.state.phase {
            GrapplePhase::Attached { attach_point } => Some(attach_point),
            GrapplePhase::Idle => None,
        }
    }
    pub fn attach_indicator(&self) -> AttachIndicator {
        AttachIndicator {
            can_attach: self.state.can_attach_now,
            suppressed: self.is_attached(),
        }
    }

    //once per rendered frame, after this frame's scan
    //press is handled before release, so a tap inside one frame attaches and launches
    pub fn advance_frame(
        &mut self,
        input: GrappleInput,
        scan: ScanResult,
        position: Vec3,
        velocity: &mut Vec3,
    ) -> Vec<GrappleTransition> {
        self.state.can_attach_now = scan.is_hit();
        let mut transitions = Vec::new();
        if input.pressed {
            transitions.extend(self.try_attach(scan, *velocity));
        }
        if input.released {
            transitions.extend(self.release(ReleaseReason::Input, position, velocity));
        }
        transitions
    }

    //once per fixed tick. position is the body's position at the start of the tick
    pub fn integrate_physics(
        &mut self,
        dt: f32,
        position: Vec3,
        velocity: &mut Vec3,
    ) -> Option<GrappleTransition> {
        let GrapplePhase::Attached { attach_point } = self.state.phase else {
            return None;
        };
        let to_anchor = attach_point - position;
        //zero when sitting exactly on the anchor, the distance check below releases us
        let direction = to_anchor.normalize_or_zero();

        self.state.current_pull_acceleration = (self.state.current_pull_acceleration
            + self.config.pull_acceleration * 0.5 * dt)
            .min(self.config.pull_acceleration_cap);

        //acceleration, not force: mass doesn't matter
        *velocity += direction * self.state.current_pull_acceleration * dt;
        self.state.last_observed_velocity = *velocity;

        //checked after the pull is applied, so a fast pull releases a tick late
        if to_anchor.length() < self.config.attach_radius_threshold {
            return self.release(ReleaseReason::Arrived, position, velocity);
        }
        None
    }

    fn try_attach(&mut self, scan: ScanResult, velocity: Vec3) -> Option<GrappleTransition> {
        if self.is_attached() {
            return None;
        }
        let ScanResult::Hit { point, surface } = scan else {
            return None;
        };
        self.state.phase = GrapplePhase::Attached {
            attach_point: point,
        };
        self.state.current_pull_acceleration = self.config.pull_acceleration;
        //releasing before the first fixed tick must not launch off a previous episode's velocity
        self.state.last_observed_velocity = velocity;
        Some(GrappleTransition::Attached {
            point,
            surface,
        })
    }

    fn release(
        &mut self,
        reason: ReleaseReason,
        position: Vec3,
        velocity: &mut Vec3,
    ) -> Option<GrappleTransition> {
        let GrapplePhase::Attached { attach_point } = self.state.phase else {
            return None;
        };
        let launch = launch_velocity(
            self.state.last_observed_velocity,
            attach_point,
            position,
            &self.config,
        );
        *velocity = launch;
        self.state.phase = GrapplePhase::Idle;
        self.state.current_pull_acceleration = self.config.pull_acceleration;
        Some(GrappleTransition::Launched {
            velocity: launch,
            attach_point,
            reason,
        })
    }
}
