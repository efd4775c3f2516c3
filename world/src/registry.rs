//! Ownership and occupancy bookkeeping for every placed entity.

use pursuit_maze_core::{
    CellCoord, EntityId, EntityKind, EntitySnapshot, MoveError, MoveRejection, PlacementError,
};

use crate::{grid::dense_index, GridWorld};

/// Owns all entities and the per-cell occupancy index derived from them.
///
/// Identifiers come from a monotonic counter and are never reused. Obstacles
/// are tracked in a dense slot per cell so movement checks stay O(1);
/// non-blocking occupants are listed per cell alongside them.
#[derive(Clone, Debug)]
pub struct EntityRegistry {
    columns: u32,
    rows: u32,
    entities: Vec<EntitySnapshot>,
    obstacles: Vec<Option<EntityId>>,
    occupants: Vec<Vec<EntityId>>,
    next_id: u32,
}

impl EntityRegistry {
    /// Creates an empty registry sized for the provided grid.
    #[must_use]
    pub fn new(grid: &GridWorld) -> Self {
        let cell_count = grid.cell_count();
        Self {
            columns: grid.width(),
            rows: grid.height(),
            entities: Vec::new(),
            obstacles: vec![None; cell_count],
            occupants: vec![Vec::new(); cell_count],
            next_id: 0,
        }
    }

    /// Places a new entity and returns the identifier allocated to it.
    ///
    /// No entity may share a cell with an obstacle, whichever arrives first.
    /// Targets and pursuers must additionally stand on walkable cells.
    pub fn place(
        &mut self,
        kind: EntityKind,
        cell: CellCoord,
        grid: &GridWorld,
    ) -> Result<EntityId, PlacementError> {
        let index = grid.index_of(cell).ok_or(PlacementError::OutOfBounds)?;

        if self.obstacles.get(index).copied().flatten().is_some() {
            return Err(PlacementError::CellOccupiedByObstacle);
        }

        let occupied = self
            .occupants
            .get(index)
            .is_some_and(|list| !list.is_empty());
        if kind.blocks_movement() && occupied {
            return Err(PlacementError::CellOccupied);
        }

        if !kind.blocks_movement() && !grid.is_walkable(cell) {
            return Err(PlacementError::NotWalkable);
        }

        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entities.push(EntitySnapshot { id, kind, cell });

        if kind.blocks_movement() {
            if let Some(slot) = self.obstacles.get_mut(index) {
                *slot = Some(id);
            }
        } else if let Some(list) = self.occupants.get_mut(index) {
            list.push(id);
        }

        Ok(id)
    }

    /// Moves a mobile entity onto `to`, returning the cell it left.
    pub fn move_entity(
        &mut self,
        id: EntityId,
        to: CellCoord,
        grid: &GridWorld,
    ) -> Result<CellCoord, MoveError> {
        let entity = self.entity(id).ok_or(MoveError::UnknownEntity(id))?;
        if !entity.kind.is_mobile() {
            return Err(MoveError::Immobile(id));
        }

        let illegal = |reason| MoveError::IllegalMove {
            entity: id,
            to,
            reason,
        };

        let to_index = grid
            .index_of(to)
            .ok_or_else(|| illegal(MoveRejection::OutOfBounds))?;
        if !grid.is_walkable(to) {
            return Err(illegal(MoveRejection::NotWalkable));
        }
        if self.obstacles.get(to_index).copied().flatten().is_some() {
            return Err(illegal(MoveRejection::OccupiedByObstacle));
        }

        let from = entity.cell;
        if let Some(list) = grid
            .index_of(from)
            .and_then(|index| self.occupants.get_mut(index))
        {
            list.retain(|occupant| *occupant != id);
        }
        if let Some(list) = self.occupants.get_mut(to_index) {
            list.push(id);
        }
        if let Some(record) = self.record_mut(id) {
            record.cell = to;
        }

        Ok(from)
    }

    /// Every entity in identifier order.
    ///
    /// Each call starts a fresh pass.
    pub fn entities(&self) -> impl Iterator<Item = EntitySnapshot> + '_ {
        self.entities.iter().copied()
    }

    /// Snapshot of the entity with the provided identifier.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<EntitySnapshot> {
        let index = usize::try_from(id.get()).ok()?;
        self.entities.get(index).copied()
    }

    /// Current cell of the entity with the provided identifier.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<CellCoord> {
        self.entity(id).map(|entity| entity.cell)
    }

    /// Obstacle occupying the cell, if any.
    #[must_use]
    pub fn obstacle_at(&self, cell: CellCoord) -> Option<EntityId> {
        self.index(cell)
            .and_then(|index| self.obstacles.get(index).copied().flatten())
    }

    /// Non-blocking entities currently sharing the cell, in arrival order.
    #[must_use]
    pub fn occupants(&self, cell: CellCoord) -> &[EntityId] {
        self.index(cell)
            .and_then(|index| self.occupants.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of entities placed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Reports whether no entity has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut EntitySnapshot> {
        let index = usize::try_from(id.get()).ok()?;
        self.entities.get_mut(index)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        dense_index(self.columns, self.rows, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room() -> GridWorld {
        let rows: [[u8; 3]; 3] = [[1, 1, 1], [1, 1, 1], [0, 1, 1]];
        GridWorld::build(&rows).expect("valid maze")
    }

    #[test]
    fn place_allocates_monotonic_identifiers() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);

        let first = registry
            .place(EntityKind::Target, CellCoord::new(1, 1), &grid)
            .expect("target placed");
        let second = registry
            .place(EntityKind::Pursuer, CellCoord::new(0, 0), &grid)
            .expect("pursuer placed");
        let third = registry
            .place(EntityKind::Obstacle, CellCoord::new(0, 2), &grid)
            .expect("obstacle placed");

        assert_eq!(first, EntityId::new(0));
        assert_eq!(second, EntityId::new(1));
        assert_eq!(third, EntityId::new(2));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn place_rejects_out_of_bounds_cells() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);

        assert_eq!(
            registry.place(EntityKind::Pursuer, CellCoord::new(3, 0), &grid),
            Err(PlacementError::OutOfBounds)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn place_rejects_any_entity_on_obstacle() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let cell = CellCoord::new(2, 2);
        let _ = registry
            .place(EntityKind::Obstacle, cell, &grid)
            .expect("obstacle placed");

        for kind in [EntityKind::Pursuer, EntityKind::Target, EntityKind::Obstacle] {
            assert_eq!(
                registry.place(kind, cell, &grid),
                Err(PlacementError::CellOccupiedByObstacle)
            );
        }
    }

    #[test]
    fn obstacle_cannot_land_on_an_occupied_cell() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let pursuer_cell = CellCoord::new(1, 0);
        let target_cell = CellCoord::new(2, 1);
        let pursuer = registry
            .place(EntityKind::Pursuer, pursuer_cell, &grid)
            .expect("pursuer placed");
        let _ = registry
            .place(EntityKind::Target, target_cell, &grid)
            .expect("target placed");

        for cell in [pursuer_cell, target_cell] {
            assert_eq!(
                registry.place(EntityKind::Obstacle, cell, &grid),
                Err(PlacementError::CellOccupied)
            );
            assert_eq!(registry.obstacle_at(cell), None);
        }
        assert_eq!(registry.len(), 2);

        let _ = registry
            .move_entity(pursuer, CellCoord::new(0, 0), &grid)
            .expect("pursuer moved away");
        assert!(registry
            .place(EntityKind::Obstacle, pursuer_cell, &grid)
            .is_ok());
    }

    #[test]
    fn place_requires_walkable_cells_for_non_obstacles() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let wall = CellCoord::new(0, 2);

        assert_eq!(
            registry.place(EntityKind::Pursuer, wall, &grid),
            Err(PlacementError::NotWalkable)
        );
        assert_eq!(
            registry.place(EntityKind::Target, wall, &grid),
            Err(PlacementError::NotWalkable)
        );
        assert!(registry.place(EntityKind::Obstacle, wall, &grid).is_ok());
    }

    #[test]
    fn move_updates_position_and_occupancy() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let pursuer = registry
            .place(EntityKind::Pursuer, CellCoord::new(0, 0), &grid)
            .expect("pursuer placed");

        let from = registry
            .move_entity(pursuer, CellCoord::new(1, 0), &grid)
            .expect("move succeeds");

        assert_eq!(from, CellCoord::new(0, 0));
        assert_eq!(registry.position(pursuer), Some(CellCoord::new(1, 0)));
        assert!(registry.occupants(CellCoord::new(0, 0)).is_empty());
        assert_eq!(registry.occupants(CellCoord::new(1, 0)), &[pursuer]);
    }

    #[test]
    fn move_rejects_blocked_destinations() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let pursuer = registry
            .place(EntityKind::Pursuer, CellCoord::new(1, 1), &grid)
            .expect("pursuer placed");
        let obstacle_cell = CellCoord::new(2, 1);
        let obstacle = registry
            .place(EntityKind::Obstacle, obstacle_cell, &grid)
            .expect("obstacle placed");

        assert_eq!(
            registry.move_entity(pursuer, obstacle_cell, &grid),
            Err(MoveError::IllegalMove {
                entity: pursuer,
                to: obstacle_cell,
                reason: MoveRejection::OccupiedByObstacle,
            })
        );
        assert_eq!(
            registry.move_entity(pursuer, CellCoord::new(0, 2), &grid),
            Err(MoveError::IllegalMove {
                entity: pursuer,
                to: CellCoord::new(0, 2),
                reason: MoveRejection::NotWalkable,
            })
        );
        assert_eq!(
            registry.move_entity(pursuer, CellCoord::new(5, 5), &grid),
            Err(MoveError::IllegalMove {
                entity: pursuer,
                to: CellCoord::new(5, 5),
                reason: MoveRejection::OutOfBounds,
            })
        );
        assert_eq!(
            registry.move_entity(obstacle, CellCoord::new(0, 0), &grid),
            Err(MoveError::Immobile(obstacle))
        );
        assert_eq!(
            registry.move_entity(EntityId::new(99), CellCoord::new(0, 0), &grid),
            Err(MoveError::UnknownEntity(EntityId::new(99)))
        );
        assert_eq!(registry.position(pursuer), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn pursuer_may_share_cell_with_target() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        let target = registry
            .place(EntityKind::Target, CellCoord::new(1, 0), &grid)
            .expect("target placed");
        let pursuer = registry
            .place(EntityKind::Pursuer, CellCoord::new(0, 0), &grid)
            .expect("pursuer placed");

        assert!(registry
            .move_entity(pursuer, CellCoord::new(1, 0), &grid)
            .is_ok());
        assert_eq!(registry.occupants(CellCoord::new(1, 0)), &[target, pursuer]);
    }

    #[test]
    fn entities_iterate_in_identifier_order() {
        let grid = open_room();
        let mut registry = EntityRegistry::new(&grid);
        for x in 0..3 {
            let _ = registry
                .place(EntityKind::Obstacle, CellCoord::new(x, 0), &grid)
                .expect("obstacle placed");
        }

        let ids: Vec<_> = registry.entities().map(|entity| entity.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(registry.entities().count(), 3);
        assert_eq!(registry.obstacle_at(CellCoord::new(1, 0)), Some(EntityId::new(1)));
    }
}
