#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Pursuit Maze simulation.
//!
//! The [`World`] aggregate owns the immutable [`GridWorld`], the
//! [`EntityRegistry`] holding every placed entity, and the [`TurnScheduler`]
//! that advances mobile entities. Drivers mutate it exclusively through
//! [`apply`] (or the [`World::tick`] shorthand) and read it through [`query`].

mod grid;
mod registry;
mod scheduler;

use pursuit_maze_core::{
    ActivationOrder, CellCoord, Command, EntityId, EntityKind, Event, PlacementError, Route,
};
use tracing::trace;

pub use grid::{GridWorld, FLOOR, WALL};
pub use registry::EntityRegistry;
pub use scheduler::TurnScheduler;

/// Represents the authoritative simulation state.
#[derive(Clone, Debug)]
pub struct World {
    grid: GridWorld,
    registry: EntityRegistry,
    scheduler: TurnScheduler,
}

impl World {
    /// Creates an unpopulated world over the provided maze geometry.
    #[must_use]
    pub fn new(grid: GridWorld, activation: ActivationOrder) -> Self {
        let registry = EntityRegistry::new(&grid);
        Self {
            grid,
            registry,
            scheduler: TurnScheduler::new(activation),
        }
    }

    /// Places an entity, registering pursuers with the scheduler.
    ///
    /// Pursuers placed here receive an empty route and start idle; use
    /// [`World::spawn_pursuer`] to seed one with a planned route.
    pub fn place(&mut self, kind: EntityKind, cell: CellCoord) -> Result<EntityId, PlacementError> {
        let id = self.registry.place(kind, cell, &self.grid)?;
        if kind.is_mobile() {
            self.scheduler.register(id, Route::default());
        }
        trace!(%id, ?kind, %cell, "entity placed");
        Ok(id)
    }

    /// Places a pursuer that will follow `route` once ticking starts.
    pub fn spawn_pursuer(
        &mut self,
        cell: CellCoord,
        route: Route,
    ) -> Result<EntityId, PlacementError> {
        let id = self
            .registry
            .place(EntityKind::Pursuer, cell, &self.grid)?;
        trace!(%id, %cell, steps = route.len(), "pursuer spawned");
        self.scheduler.register(id, route);
        Ok(id)
    }

    /// Advances the simulation by one tick, discarding the produced events.
    pub fn tick(&mut self) {
        let mut events = Vec::new();
        apply(self, Command::Tick, &mut events);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world
                .scheduler
                .tick(&mut world.registry, &world.grid, out_events);
        }
        Command::PlaceEntity { kind, cell } => match world.place(kind, cell) {
            Ok(entity) => out_events.push(Event::EntityPlaced { entity, kind, cell }),
            Err(reason) => out_events.push(Event::PlacementRejected { kind, cell, reason }),
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use pursuit_maze_core::{
        ActivationOrder, CellCoord, EntityId, EntityKind, EntitySnapshot, PursuerState, Route,
    };

    use super::{GridWorld, World};

    /// Provides read-only access to the maze geometry.
    #[must_use]
    pub fn grid(world: &World) -> &GridWorld {
        &world.grid
    }

    /// Every placed entity in identifier order; each call restarts the pass.
    pub fn entities(world: &World) -> impl Iterator<Item = EntitySnapshot> + '_ {
        world.registry.entities()
    }

    /// Snapshot of a single entity.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.registry.entity(id)
    }

    /// Current cell of a single entity.
    #[must_use]
    pub fn position(world: &World, id: EntityId) -> Option<CellCoord> {
        world.registry.position(id)
    }

    /// Obstacle occupying the cell, if any.
    #[must_use]
    pub fn obstacle_at(world: &World, cell: CellCoord) -> Option<EntityId> {
        world.registry.obstacle_at(cell)
    }

    /// Entities of the provided kind in identifier order.
    pub fn entities_of_kind(
        world: &World,
        kind: EntityKind,
    ) -> impl Iterator<Item = EntitySnapshot> + '_ {
        world
            .registry
            .entities()
            .filter(move |entity| entity.kind == kind)
    }

    /// Lifecycle state of a mobile entity.
    #[must_use]
    pub fn pursuer_state(world: &World, id: EntityId) -> Option<PursuerState> {
        world.scheduler.state(id)
    }

    /// Route owned by a mobile entity, including its consumption cursor.
    #[must_use]
    pub fn route(world: &World, id: EntityId) -> Option<&Route> {
        world.scheduler.route(id)
    }

    /// Mobile entities in registration order.
    pub fn pursuers(world: &World) -> impl Iterator<Item = EntityId> + '_ {
        world.scheduler.entities()
    }

    /// Number of ticks executed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.scheduler.tick_index()
    }

    /// Activation policy the scheduler was configured with.
    #[must_use]
    pub fn activation_order(world: &World) -> ActivationOrder {
        world.scheduler.order()
    }

    /// Reports whether every mobile entity has gone idle.
    #[must_use]
    pub fn is_settled(world: &World) -> bool {
        world.scheduler.is_settled()
    }
}
