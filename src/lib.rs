//! bp_centiles: pediatric blood pressure centile charts for GPUI

pub mod axis_labels;
pub mod chart_view;
pub mod data_types;
pub mod layout;
pub mod legend;
pub mod plot;
pub mod rendering;
pub mod scales;
pub mod surface;
pub mod theme;
pub mod tooltip;
pub mod transition;
pub mod utils;
pub mod view_registry;
pub mod zones;

pub use chart_view::BpChartView;
pub use data_types::{ChartSettings, Encounter, Patient, Sex, ViewSettings};
pub use layout::{ViewConfig, ViewMode};
pub use scales::{scale, ChartScale};
pub use surface::{DrawingSurface, Role};
pub use view_registry::{ViewOrchestrator, ViewRegistry, ViewSlot};
pub use zones::{ColorClass, Zone, ZoneDefinition};
