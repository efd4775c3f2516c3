#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Pursuit Maze adapters.

mod portrayal;
mod text;

use std::{error::Error, fmt};

use anyhow::Result as AnyResult;
use glam::Vec2;
use pursuit_maze_core::{CellCoord, EntityId, EntityKind};
use pursuit_maze_world::{query, World};

pub use portrayal::{portray, Portrayal, PortrayalTable, Shape};
pub use text::TextPresenter;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, which leaves sprite textures untinted.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// A single entity positioned in render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneItem {
    /// Identifier of the portrayed entity.
    pub entity: EntityId,
    /// Variant of the portrayed entity.
    pub kind: EntityKind,
    /// Grid cell the entity occupies.
    pub cell: CellCoord,
    /// Centre of the cell in render units.
    pub center: Vec2,
    /// Visual description resolved from the portrayal table.
    pub portrayal: Portrayal,
}

/// Frame description captured from the world between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Number of columns in the maze.
    pub columns: u32,
    /// Number of rows in the maze.
    pub rows: u32,
    /// Side length of one cell in render units.
    pub cell_length: f32,
    /// Number of ticks executed when the frame was captured.
    pub tick: u64,
    /// Non-walkable cells of the maze in row-major order.
    pub walls: Vec<CellCoord>,
    /// Entities ordered by draw layer, then identifier.
    pub items: Vec<SceneItem>,
}

impl Scene {
    /// Captures the world with the classic portrayal table.
    pub fn capture(world: &World, cell_length: f32) -> Result<Self, RenderingError> {
        Self::capture_with(world, cell_length, &PortrayalTable::CLASSIC)
    }

    /// Captures the world, portraying entities through the provided table.
    pub fn capture_with(
        world: &World,
        cell_length: f32,
        table: &PortrayalTable,
    ) -> Result<Self, RenderingError> {
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        let grid = query::grid(world);
        let (columns, rows) = grid.dimensions();
        let mut items: Vec<SceneItem> = query::entities(world)
            .map(|entity| SceneItem {
                entity: entity.id,
                kind: entity.kind,
                cell: entity.cell,
                center: cell_center(entity.cell, cell_length),
                portrayal: table.portray(&entity),
            })
            .collect();
        items.sort_by_key(|item| (item.portrayal.layer, item.entity));

        Ok(Self {
            columns,
            rows,
            cell_length,
            tick: query::tick_index(world),
            walls: grid.wall_cells().collect(),
            items,
        })
    }

    /// Width of the frame in render units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Height of the frame in render units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Item describing the provided entity, if it is part of the frame.
    #[must_use]
    pub fn item(&self, entity: EntityId) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.entity == entity)
    }

    /// Renders the frame as rows of glyphs.
    ///
    /// Walls draw as `#` and open floor as `.`; entities overwrite their
    /// cell in draw order so the last drawn glyph wins.
    #[must_use]
    pub fn render_text(&self) -> String {
        let columns = self.columns as usize;
        let mut canvas = vec![FLOOR_GLYPH; columns * self.rows as usize];

        let cells = self
            .walls
            .iter()
            .map(|&cell| (cell, WALL_GLYPH))
            .chain(self.items.iter().map(|item| (item.cell, item.portrayal.glyph)));
        for (cell, glyph) in cells {
            let index = cell.y() as usize * columns + cell.x() as usize;
            if let Some(slot) = canvas.get_mut(index) {
                *slot = glyph;
            }
        }

        let mut text = String::with_capacity(canvas.len() + self.rows as usize);
        for row in canvas.chunks(columns.max(1)) {
            text.extend(row);
            text.push('\n');
        }
        text
    }
}

const WALL_GLYPH: char = '#';
const FLOOR_GLYPH: char = '.';

fn cell_center(cell: CellCoord, cell_length: f32) -> Vec2 {
    (Vec2::new(cell.x() as f32, cell.y() as f32) + Vec2::splat(0.5)) * cell_length
}

/// Presentation descriptor consumed by presenters.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above each frame.
    pub title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            clear_color,
            scene,
        }
    }
}

/// Output surface capable of presenting captured frames.
///
/// Drivers own the tick loop and call [`Presenter::present`] whenever they
/// want a frame shown.
pub trait Presenter {
    /// Displays a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cell length must be positive and finite to produce a visible frame.
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(
                    f,
                    "cell_length must be positive and finite (received {cell_length})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
