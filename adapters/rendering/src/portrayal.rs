//! Visual descriptions of entity variants.

use pursuit_maze_core::{EntityKind, EntitySnapshot};

use crate::Color;

/// Geometry used to draw an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Image asset drawn over the entity's cell.
    Sprite(&'static str),
    /// Axis-aligned rectangle measured in cells.
    Rect {
        /// Width in cells.
        width: f32,
        /// Height in cells.
        height: f32,
        /// Whether the rectangle is filled or outlined.
        filled: bool,
    },
}

/// Description of how a single entity variant is presented.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portrayal {
    /// Geometry drawn for the entity.
    pub shape: Shape,
    /// Fill or tint color.
    pub color: Color,
    /// Draw layer; higher layers are drawn later.
    pub layer: u8,
    /// Character used by text presenters.
    pub glyph: char,
}

/// Explicit dispatch table mapping every entity variant to its portrayal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortrayalTable {
    obstacle: Portrayal,
    target: Portrayal,
    pursuer: Portrayal,
}

impl PortrayalTable {
    /// Table used by the default renderer.
    pub const CLASSIC: Self = Self {
        obstacle: Portrayal {
            shape: Shape::Rect {
                width: 1.0,
                height: 1.0,
                filled: true,
            },
            color: Color::from_rgb_u8(128, 128, 128),
            layer: 1,
            glyph: '#',
        },
        target: Portrayal {
            shape: Shape::Sprite("pacman.png"),
            color: Color::WHITE,
            layer: 0,
            glyph: 'P',
        },
        pursuer: Portrayal {
            shape: Shape::Sprite("ghost2.png"),
            color: Color::WHITE,
            layer: 0,
            glyph: 'G',
        },
    };

    /// Creates a table from one portrayal per variant.
    #[must_use]
    pub const fn new(obstacle: Portrayal, target: Portrayal, pursuer: Portrayal) -> Self {
        Self {
            obstacle,
            target,
            pursuer,
        }
    }

    /// Looks up the portrayal registered for the variant.
    #[must_use]
    pub const fn get(&self, kind: EntityKind) -> &Portrayal {
        match kind {
            EntityKind::Obstacle => &self.obstacle,
            EntityKind::Target => &self.target,
            EntityKind::Pursuer => &self.pursuer,
        }
    }

    /// Portrays an entity using this table.
    #[must_use]
    pub const fn portray(&self, entity: &EntitySnapshot) -> Portrayal {
        *self.get(entity.kind)
    }
}

impl Default for PortrayalTable {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Portrays an entity with the classic table.
#[must_use]
pub const fn portray(entity: &EntitySnapshot) -> Portrayal {
    PortrayalTable::CLASSIC.portray(entity)
}

#[cfg(test)]
mod tests {
    use pursuit_maze_core::{CellCoord, EntityId};

    use super::*;

    fn snapshot(kind: EntityKind) -> EntitySnapshot {
        EntitySnapshot {
            id: EntityId::new(7),
            kind,
            cell: CellCoord::new(2, 3),
        }
    }

    #[test]
    fn pursuer_is_drawn_as_ghost_sprite() {
        let portrayal = portray(&snapshot(EntityKind::Pursuer));

        assert_eq!(portrayal.shape, Shape::Sprite("ghost2.png"));
        assert_eq!(portrayal.layer, 0);
        assert_eq!(portrayal.glyph, 'G');
    }

    #[test]
    fn target_is_drawn_as_pacman_sprite() {
        let portrayal = portray(&snapshot(EntityKind::Target));

        assert_eq!(portrayal.shape, Shape::Sprite("pacman.png"));
        assert_eq!(portrayal.layer, 0);
        assert_eq!(portrayal.glyph, 'P');
    }

    #[test]
    fn obstacle_is_a_filled_gray_cell() {
        let portrayal = portray(&snapshot(EntityKind::Obstacle));

        assert_eq!(
            portrayal.shape,
            Shape::Rect {
                width: 1.0,
                height: 1.0,
                filled: true,
            }
        );
        assert_eq!(portrayal.color, Color::from_rgb_u8(128, 128, 128));
        assert_eq!(portrayal.layer, 1);
    }

    #[test]
    fn custom_tables_override_single_variants() {
        let outlined = Portrayal {
            shape: Shape::Rect {
                width: 1.0,
                height: 1.0,
                filled: false,
            },
            color: Color::from_rgb_u8(255, 0, 0),
            layer: 2,
            glyph: 'X',
        };
        let classic = PortrayalTable::default();
        let table = PortrayalTable::new(
            outlined,
            *classic.get(EntityKind::Target),
            *classic.get(EntityKind::Pursuer),
        );

        assert_eq!(table.portray(&snapshot(EntityKind::Obstacle)), outlined);
        assert_eq!(
            table.portray(&snapshot(EntityKind::Pursuer)),
            portray(&snapshot(EntityKind::Pursuer))
        );
    }
}
