pub mod filter;
pub mod selection;
pub mod source;
pub mod store;
pub mod verse;

pub use filter::{filter_verses, FilterAxis, Filters};
pub use selection::{daily_verse, pick_random, today_day_of_month};
pub use source::{spawn_load, LoadEvent, LoadedVerses, VerseSource};
pub use store::VerseStore;
pub use verse::Verse;
