//! In-memory model of a bot in NLUServer terms.

pub mod bot;
pub mod context;
pub mod entity;
pub mod intent;
pub mod prediction;

pub use bot::{BotData, BotDataBuilder};
pub use context::{IntentReference, NluContext};
pub use entity::{CustomEntityTypeEntry, EntityType};
pub use intent::{EntityParameter, EntityRef, Intent};
pub use prediction::{Classification, MatchedParam, Prediction};
