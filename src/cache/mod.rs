// Caption cache module

pub mod models;
pub mod store;

pub use models::CaptionRecord;
pub use store::CaptionCache;
