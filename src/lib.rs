//! Construction resource estimator.
//!
//! Turns four inputs (built-up area, floor spec such as `G+2`, daily wage and
//! material cost per unit area) into a workforce, schedule, cost and material
//! estimate together with a box-packed floor plan. The modules follow the
//! orchestrator pattern: each `mod.rs` re-exports the public surface while
//! the implementation lives in private submodules.

pub mod artifact;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod floorplan;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod render;

pub use artifact::{ArtifactError, ArtifactStore, request_key};
pub use config::EstimatorConfig;
pub use driver::{CliDriver, CliDriverError, OutputFormat, SocketDriver, SocketDriverError};
pub use engine::{
    CostBreakdown, EstimateBundle, Estimator, Material, MaterialEstimate, PlanVariant, Role,
    WorkforcePlan, estimate,
};
pub use error::{EstimateError, InputField, InvalidInputError, Result};
pub use floorplan::{FloorPlanLayout, RoomPlacement, generate_layout};
pub use geometry::{Rect, Size};
pub use input::{ProjectInput, parse_floor_spec};
pub use layout::{Direction, LayoutError, LayoutNode, LayoutTree};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{EstimatorMetrics, MetricSnapshot};
pub use render::{AnsiRenderer, PreviewSettings, SvgRenderer, SvgSettings, display_width};
