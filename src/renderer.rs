//! Conversion of maze walls into drawable segments

use crate::{MazeConfig, MazeError, Walls};

/// What a wall segment belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallKind {
    /// Outer edge of the drawing area
    Border,
    /// Wall below a cell
    Horizontal,
    /// Wall right of a cell
    Vertical,
}

/// Axis-aligned rectangle, positioned by its centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: WallKind,
}

/// Lays out the closed walls of a maze over a drawing area
///
/// Cells share the area evenly, so a maze with more columns gets narrower
/// cells.
#[derive(Clone, Debug)]
pub struct WallRenderer {
    width: f32,
    height: f32,
    wall_thickness: f32,
    border_thickness: f32,
}

impl WallRenderer {
    pub fn new(config: &MazeConfig) -> Result<Self, MazeError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            wall_thickness: config.wall_thickness,
            border_thickness: config.border_thickness,
        })
    }

    /// Segments for the border and for every wall that was not carved
    pub fn segments(&self, walls: &Walls) -> Vec<WallSegment> {
        let unit_x = self.width / walls.columns() as f32;
        let unit_y = self.height / walls.rows() as f32;

        let mut segments = self.border();

        for (row, line) in walls.horizontal_open().iter().enumerate() {
            for (column, _) in line.iter().enumerate().filter(|&(_, &open)| !open) {
                segments.push(WallSegment {
                    x: column as f32 * unit_x + unit_x / 2.0,
                    y: row as f32 * unit_y + unit_y,
                    width: unit_x,
                    height: self.wall_thickness,
                    kind: WallKind::Horizontal,
                });
            }
        }

        for (row, line) in walls.vertical_open().iter().enumerate() {
            for (column, _) in line.iter().enumerate().filter(|&(_, &open)| !open) {
                segments.push(WallSegment {
                    x: column as f32 * unit_x + unit_x,
                    y: row as f32 * unit_y + unit_y / 2.0,
                    width: self.wall_thickness,
                    height: unit_y,
                    kind: WallKind::Vertical,
                });
            }
        }

        segments
    }

    /// Top, bottom, left and right edges
    fn border(&self) -> Vec<WallSegment> {
        let (w, h, t) = (self.width, self.height, self.border_thickness);
        [
            (w / 2.0, 0.0, w, t),
            (w / 2.0, h, w, t),
            (0.0, h / 2.0, t, h),
            (w, h / 2.0, t, h),
        ]
        .into_iter()
        .map(|(x, y, width, height)| WallSegment {
            x,
            y,
            width,
            height,
            kind: WallKind::Border,
        })
        .collect()
    }
}
