use serde::Serialize;

use crate::config::FloorPlanConfig;
use crate::geometry::{Rect, Size};
use crate::layout::{Direction, LayoutError, LayoutNode, LayoutTree};

/// A room placed inside the square footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomPlacement {
    pub name: String,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `total_area * share`. Uses the room's share of the whole building
    /// while `width` uses its share of the row, so `area` and
    /// `width * height` generally disagree.
    pub area: f64,
    pub label: String,
}

impl RoomPlacement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Box-packed floor plan of a square footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlanLayout {
    pub total_area: f64,
    pub side: f64,
    pub rows: usize,
    pub rooms: Vec<RoomPlacement>,
}

impl FloorPlanLayout {
    pub fn size(&self) -> Size {
        Size::square(self.side)
    }

    pub fn rooms_in_row(&self, row: usize) -> impl Iterator<Item = &RoomPlacement> {
        self.rooms.iter().filter(move |room| room.row == row)
    }
}

/// Pack the configured rooms into a `sqrt(total_area)` square.
///
/// Rows share the height equally. Within a row each room's width is its
/// share divided by the row's share sum.
pub fn generate_layout(
    total_area: f64,
    config: &FloorPlanConfig,
) -> Result<FloorPlanLayout, LayoutError> {
    let side = total_area.sqrt();
    let tree = LayoutTree::new(build_tree(config));
    let rects = tree.solve(Size::square(side))?;

    let mut rooms = Vec::new();
    for (row_index, row) in config.rows.iter().enumerate() {
        for (room_index, room) in row.rooms.iter().enumerate() {
            let id = room_id(row_index, room_index);
            let rect = rects.get(&id).copied().ok_or(LayoutError::EmptyLayout)?;
            rooms.push(RoomPlacement {
                name: room.name.clone(),
                row: row_index,
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                area: total_area * room.share,
                label: room_label(&room.name, &rect),
            });
        }
    }

    Ok(FloorPlanLayout {
        total_area,
        side,
        rows: config.rows.len(),
        rooms,
    })
}

fn build_tree(config: &FloorPlanConfig) -> LayoutNode {
    let rows = config
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let rooms = row
                .rooms
                .iter()
                .enumerate()
                .map(|(room_index, room)| LayoutNode::leaf(room_id(row_index, room_index), room.share))
                .collect();
            LayoutNode::container(format!("row-{row_index}"), Direction::Row, rooms)
        })
        .collect();
    LayoutNode::container("footprint", Direction::Column, rows)
}

fn room_id(row: usize, room: usize) -> String {
    format!("row-{row}/room-{room}")
}

fn room_label(name: &str, rect: &Rect) -> String {
    format!("{name}\n{:.1} x {:.1}", rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EPSILON;

    fn layout(total_area: f64) -> FloorPlanLayout {
        generate_layout(total_area, &FloorPlanConfig::default()).unwrap()
    }

    #[test]
    fn rows_tile_the_square() {
        let plan = layout(2000.0);
        assert!((plan.side - 2000f64.sqrt()).abs() < EPSILON);
        assert_eq!(plan.rows, 2);
        assert_eq!(plan.rooms.len(), 5);

        for row in 0..plan.rows {
            let width: f64 = plan.rooms_in_row(row).map(|room| room.width).sum();
            assert!((width - plan.side).abs() < EPSILON, "row {row}");
            for room in plan.rooms_in_row(row) {
                assert!((room.height - plan.side / 2.0).abs() < EPSILON);
            }
        }

        let heights: f64 = (0..plan.rows)
            .map(|row| plan.rooms_in_row(row).next().unwrap().height)
            .sum();
        assert!((heights - plan.side).abs() < EPSILON);
    }

    #[test]
    fn rooms_pack_without_gaps_or_overlap() {
        let plan = layout(900.0);
        for row in 0..plan.rows {
            let rooms: Vec<_> = plan.rooms_in_row(row).collect();
            assert!(rooms[0].x.abs() < EPSILON);
            for pair in rooms.windows(2) {
                assert!((pair[1].x - pair[0].rect().right()).abs() < EPSILON);
                assert!(!pair[0].rect().overlaps(&pair[1].rect()));
            }
        }
        let second_row = plan.rooms_in_row(1).next().unwrap();
        assert!((second_row.y - 15.0).abs() < EPSILON);
    }

    #[test]
    fn widths_are_row_relative_and_areas_are_global() {
        let plan = layout(900.0);
        let living = &plan.rooms[0];
        // 30 * 0.30 / 0.55
        assert!((living.width - 30.0 * 0.30 / 0.55).abs() < EPSILON);
        assert!((living.area - 270.0).abs() < EPSILON);
        assert!((living.area - living.rect().area()).abs() > 1.0);

        let kitchen = plan.rooms.iter().find(|room| room.name == "Kitchen").unwrap();
        assert!((kitchen.width - 30.0 * 0.20 / 0.45).abs() < EPSILON);
        assert!((kitchen.area - 180.0).abs() < EPSILON);
    }

    #[test]
    fn labels_carry_name_and_dimensions() {
        let plan = layout(900.0);
        assert_eq!(plan.rooms[0].label, "Living Room\n16.4 x 15.0");
        assert_eq!(plan.rooms[3].label, "Bathroom\n6.7 x 15.0");
    }
}
