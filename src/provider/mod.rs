pub mod dispatcher;
pub mod error;
pub mod events;
pub mod state;

pub use dispatcher::MockProvider;
pub use error::ProviderError;
