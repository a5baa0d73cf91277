//! Fluent builder for a single [`Agent`].
//!
//! # Usage
//!
//! ```rust
//! use city_agent::{AgentBuilder, AgentStatus};
//! use city_core::{AgentKind, Position};
//!
//! let car = AgentBuilder::new(AgentKind::Car, 0)
//!     .at(Position::new(0.0, 0.0))
//!     .heading_to(Position::new(0.0, 9.0))
//!     .speed(1.0)
//!     .build();
//!
//! assert_eq!(car.id.to_string(), "car-0");
//! assert_eq!(car.status, AgentStatus::Moving);
//! assert_eq!(car.color, "#00D9FF");
//! ```

use city_core::{AgentId, AgentKind, Position};

use crate::{Agent, AgentStatus, KindProfile};

pub struct AgentBuilder {
    id:          AgentId,
    position:    Position,
    destination: Option<Position>,
    status:      Option<AgentStatus>,
    base_speed:  f32,
    color:       Option<String>,
}

impl AgentBuilder {
    /// Start building the `seq`-th agent of `kind`.
    ///
    /// Defaults: origin position, no destination, base speed 1.0, palette
    /// color for `seq`.
    pub fn new(kind: AgentKind, seq: u32) -> Self {
        Self {
            id:          AgentId::new(kind, seq),
            position:    Position::default(),
            destination: None,
            status:      None,
            base_speed:  1.0,
            color:       None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn heading_to(mut self, destination: Position) -> Self {
        self.destination = Some(destination);
        self
    }

    pub fn speed(mut self, base_speed: f32) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Override the initial status.  Without this, an agent with a
    /// destination starts `moving` and one without starts `idle`.
    pub fn status(mut self, status: AgentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Agent {
        let kind = self.id.kind;
        let status = self.status.unwrap_or(if self.destination.is_some() {
            AgentStatus::Moving
        } else {
            AgentStatus::Idle
        });
        let color = self
            .color
            .unwrap_or_else(|| KindProfile::for_kind(kind).color(self.id.seq).to_owned());

        Agent {
            id: self.id,
            kind,
            position: self.position,
            destination: self.destination,
            status,
            base_speed: self.base_speed,
            speed_multiplier: 1.0,
            color,
            path: Vec::new(),
            current_instruction: None,
        }
    }
}
