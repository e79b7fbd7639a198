//! Floor-plan box packing on top of the generic layout tree.

mod core;

pub use self::core::{FloorPlanLayout, RoomPlacement, generate_layout};
