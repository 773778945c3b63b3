//! Zone information schema, transition finder, processor, and registry
//! (spec §4.2-§4.5).
pub mod manager;
pub mod processor;
pub mod registry;
pub mod schema;
pub mod transition;

pub use manager::ZoneManager;
pub use processor::{Match, OffsetInfo, ZoneProcessor};
pub use registry::{zone_id, ZoneEntry, ZoneRegistry};
pub use schema::{ZoneContext, ZoneEra, ZoneInfo, ZonePolicy, ZoneRule};
