//! Domain model types shared across the workspace.

mod action;
mod date_key;
mod details;
mod event;
mod persona_id;
mod stats;
mod stream;

pub use action::{PostAction, StreamAction, WarmupAction};
pub use date_key::DateKey;
pub use details::{PostDetails, WarmupDetails};
pub use event::{Event, PostEvent, WarmupEvent};
pub use persona_id::PersonaId;
pub use stats::{CounterRecord, PostStats, WarmupStats};
pub use stream::Stream;
