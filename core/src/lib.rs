#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pursuit Maze simulation.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure systems, and the adapters. Drivers submit [`Command`] values, the
//! world executes them through its `apply` entry point and broadcasts
//! [`Event`] values describing what happened. Coordinates, identifiers, and
//! error kinds live here so every crate agrees on them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod route;

pub use route::Route;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Advances the simulation by exactly one discrete tick.
    Tick,
    /// Requests placement of a new entity at the provided cell.
    ///
    /// Pursuers placed this way carry an empty route and stay idle until a
    /// driver steers them by other means.
    PlaceEntity {
        /// Variant of entity to create.
        kind: EntityKind,
        /// Cell the entity should occupy.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// One-based index of the tick that just started.
        tick: u64,
    },
    /// Confirms that an entity was placed into the world.
    EntityPlaced {
        /// Identifier allocated to the entity.
        entity: EntityId,
        /// Variant of the placed entity.
        kind: EntityKind,
        /// Cell the entity occupies.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Variant of entity requested for placement.
        kind: EntityKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a mobile entity moved between two cells.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Cell the entity occupied before moving.
        from: CellCoord,
        /// Cell the entity occupies after the move.
        to: CellCoord,
    },
    /// Reports that a scheduled step was absorbed without movement.
    MoveRejected {
        /// Identifier of the entity whose step was blocked.
        entity: EntityId,
        /// Cell the entity attempted to enter.
        to: CellCoord,
        /// Reason the destination could not be entered.
        reason: MoveRejection,
    },
    /// Announces that a pursuer stepped onto the cell holding a target.
    TargetReached {
        /// Identifier of the pursuer.
        pursuer: EntityId,
        /// Identifier of the target sharing the cell.
        target: EntityId,
        /// Cell where the two met.
        cell: CellCoord,
    },
    /// Announces that a pursuer exhausted its route and became idle.
    PursuerIdle {
        /// Identifier of the pursuer.
        entity: EntityId,
        /// Cell the pursuer rests on.
        cell: CellCoord,
    },
}

/// Cardinal movement directions available on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing `y`.
    North,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward increasing `y`.
    South,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// All directions in the fixed order used for neighbour expansion.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as `x` (column) and `y` (row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighbouring coordinate in the provided direction.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant;
    /// upper bounds are the grid's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::East => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
            Direction::South => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Direction::West => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
        }
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unique identifier assigned to an entity by the registry that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Closed set of entity variants that can inhabit the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Immobile wall block that forbids mobile entities from entering its cell.
    Obstacle,
    /// Immobile marker the pursuer heads toward; never blocks movement.
    Target,
    /// Mobile entity that follows a precomputed route.
    Pursuer,
}

impl EntityKind {
    /// Reports whether entities of this kind are advanced by the scheduler.
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Pursuer)
    }

    /// Reports whether entities of this kind forbid mobile entities from
    /// sharing their cell.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        matches!(self, Self::Obstacle)
    }
}

/// Immutable representation of a single entity used for queries and rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Variant of the entity.
    pub kind: EntityKind,
    /// Grid cell currently occupied by the entity.
    pub cell: CellCoord,
}

/// Lifecycle of a mobile entity under the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PursuerState {
    /// The entity still has route cells to consume.
    Moving,
    /// The route is exhausted; this state is terminal.
    Idle,
}

/// Policy that decides the order mobile entities act in within a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationOrder {
    /// Entities act in the order they were registered.
    #[default]
    Registration,
    /// Entities act in an order reshuffled every tick from a seeded generator.
    Shuffled {
        /// Seed for the deterministic shuffle.
        seed: u64,
    },
}

/// Reasons a placement request may be rejected by the registry.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// An obstacle already occupies the requested cell.
    #[error("cell is occupied by an obstacle")]
    CellOccupiedByObstacle,
    /// Obstacles may not be dropped onto a cell another entity already holds.
    #[error("cell is occupied by another entity")]
    CellOccupied,
    /// Mobile entities and targets may only sit on walkable cells.
    #[error("cell is not walkable")]
    NotWalkable,
}

/// Reasons a destination cell refused a mobile entity.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The destination lies outside the grid.
    #[error("destination lies outside the grid")]
    OutOfBounds,
    /// The destination is a wall cell.
    #[error("destination is not walkable")]
    NotWalkable,
    /// An obstacle occupies the destination.
    #[error("destination is occupied by an obstacle")]
    OccupiedByObstacle,
}

/// Failures raised when asking the registry to move an entity.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// No entity with the provided identifier exists.
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),
    /// The entity is of a kind that never moves.
    #[error("entity {0} is immobile")]
    Immobile(EntityId),
    /// The destination cell is blocked.
    #[error("entity {entity} cannot enter {to}: {reason}")]
    IllegalMove {
        /// Entity that attempted the move.
        entity: EntityId,
        /// Cell the entity attempted to enter.
        to: CellCoord,
        /// Why the destination refused the entity.
        reason: MoveRejection,
    },
}

/// Failures that abort building or seeding a simulation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// The maze description is empty, ragged, or contains values other than 0 and 1.
    #[error("malformed maze: {reason}")]
    MalformedMaze {
        /// Human-readable description of the defect.
        reason: String,
    },
    /// A coordinate fell outside the grid.
    #[error("cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Grid width in cells.
        width: u32,
        /// Grid height in cells.
        height: u32,
    },
    /// No walkable route connects the endpoints, or an endpoint is a wall.
    #[error("no path from {start} to {end}")]
    PathNotFound {
        /// Requested start cell.
        start: CellCoord,
        /// Requested end cell.
        end: CellCoord,
    },
    /// Seeding the registry failed.
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn step_refuses_negative_coordinates() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::North), None);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::East), Some(CellCoord::new(1, 0)));
        assert_eq!(corner.step(Direction::South), Some(CellCoord::new(0, 1)));
    }

    #[test]
    fn only_pursuers_are_mobile_and_only_obstacles_block() {
        assert!(EntityKind::Pursuer.is_mobile());
        assert!(!EntityKind::Target.is_mobile());
        assert!(!EntityKind::Obstacle.is_mobile());

        assert!(EntityKind::Obstacle.blocks_movement());
        assert!(!EntityKind::Target.blocks_movement());
        assert!(!EntityKind::Pursuer.blocks_movement());
    }

    #[test]
    fn activation_order_defaults_to_registration() {
        assert_eq!(ActivationOrder::default(), ActivationOrder::Registration);
    }

    #[test]
    fn errors_render_coordinates() {
        let error = SimulationError::PathNotFound {
            start: CellCoord::new(1, 1),
            end: CellCoord::new(9, 6),
        };
        assert_eq!(error.to_string(), "no path from (1, 1) to (9, 6)");

        let placement: SimulationError = PlacementError::CellOccupiedByObstacle.into();
        assert_eq!(
            placement.to_string(),
            "placement failed: cell is occupied by an obstacle"
        );
    }
}
