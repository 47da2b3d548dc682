pub mod normalize;
pub mod store;
pub mod types;

pub use normalize::*;
pub use store::SuggestionStore;
pub use types::*;
