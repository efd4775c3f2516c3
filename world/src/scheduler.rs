//! Turn scheduler that advances mobile entities one route cell per tick.

use pursuit_maze_core::{
    ActivationOrder, CellCoord, EntityId, EntityKind, Event, MoveError, PursuerState, Route,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::{EntityRegistry, GridWorld};

/// Drives every registered mobile entity through its route.
///
/// Each tick, every entity still in [`PursuerState::Moving`] consumes the
/// head of its route and asks the registry to move there. A refused move is
/// absorbed: the route head is spent and the entity stays put.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    order: ActivationOrder,
    shuffler: Option<ChaCha8Rng>,
    activations: Vec<Activation>,
    tick_index: u64,
}

#[derive(Clone, Debug)]
struct Activation {
    entity: EntityId,
    route: Route,
    state: PursuerState,
}

impl TurnScheduler {
    /// Creates a scheduler that activates entities under the provided policy.
    #[must_use]
    pub fn new(order: ActivationOrder) -> Self {
        let shuffler = match order {
            ActivationOrder::Registration => None,
            ActivationOrder::Shuffled { seed } => Some(ChaCha8Rng::seed_from_u64(seed)),
        };

        Self {
            order,
            shuffler,
            activations: Vec::new(),
            tick_index: 0,
        }
    }

    /// Registers a mobile entity together with the route it will follow.
    ///
    /// Entities registered with an exhausted route start out idle.
    pub fn register(&mut self, entity: EntityId, route: Route) {
        let state = if route.is_exhausted() {
            PursuerState::Idle
        } else {
            PursuerState::Moving
        };
        self.activations.push(Activation {
            entity,
            route,
            state,
        });
    }

    /// Activation policy in force.
    #[must_use]
    pub const fn order(&self) -> ActivationOrder {
        self.order
    }

    /// Number of ticks executed so far.
    #[must_use]
    pub const fn tick_index(&self) -> u64 {
        self.tick_index
    }

    /// Lifecycle state of a registered entity.
    #[must_use]
    pub fn state(&self, entity: EntityId) -> Option<PursuerState> {
        self.activation(entity).map(|activation| activation.state)
    }

    /// Route owned by a registered entity.
    #[must_use]
    pub fn route(&self, entity: EntityId) -> Option<&Route> {
        self.activation(entity).map(|activation| &activation.route)
    }

    /// Registered entities in registration order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.activations.iter().map(|activation| activation.entity)
    }

    /// Reports whether every registered entity has gone idle.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.activations
            .iter()
            .all(|activation| activation.state == PursuerState::Idle)
    }

    /// Executes one tick, reporting its outcome through `out_events`.
    pub fn tick(
        &mut self,
        registry: &mut EntityRegistry,
        grid: &GridWorld,
        out_events: &mut Vec<Event>,
    ) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        for slot in self.activation_sequence() {
            let Some(activation) = self.activations.get_mut(slot) else {
                continue;
            };

            if activation.state == PursuerState::Idle {
                continue;
            }

            if let Some(next_cell) = activation.route.advance() {
                match registry.move_entity(activation.entity, next_cell, grid) {
                    Ok(from) => {
                        out_events.push(Event::EntityMoved {
                            entity: activation.entity,
                            from,
                            to: next_cell,
                        });
                        report_targets(registry, activation.entity, next_cell, out_events);
                    }
                    Err(MoveError::IllegalMove { entity, to, reason }) => {
                        debug!(%entity, %to, %reason, "step absorbed without movement");
                        out_events.push(Event::MoveRejected { entity, to, reason });
                    }
                    Err(error) => {
                        warn!(%error, "scheduled entity cannot act");
                    }
                }
            }

            if activation.route.is_exhausted() {
                activation.state = PursuerState::Idle;
                if let Some(cell) = registry.position(activation.entity) {
                    out_events.push(Event::PursuerIdle {
                        entity: activation.entity,
                        cell,
                    });
                }
            }
        }
    }

    fn activation(&self, entity: EntityId) -> Option<&Activation> {
        self.activations
            .iter()
            .find(|activation| activation.entity == entity)
    }

    fn activation_sequence(&mut self) -> Vec<usize> {
        let mut sequence: Vec<usize> = (0..self.activations.len()).collect();
        if let Some(shuffler) = self.shuffler.as_mut() {
            sequence.shuffle(shuffler);
        }
        sequence
    }
}

fn report_targets(
    registry: &EntityRegistry,
    pursuer: EntityId,
    cell: CellCoord,
    out_events: &mut Vec<Event>,
) {
    for occupant in registry.occupants(cell) {
        let Some(entity) = registry.entity(*occupant) else {
            continue;
        };
        if entity.kind == EntityKind::Target {
            out_events.push(Event::TargetReached {
                pursuer,
                target: entity.id,
                cell,
            });
        }
    }
}
