pub mod decode;
pub mod endpoint;
pub mod probe;
pub mod router;

pub use endpoint::{EndpointClient, PromptService};
pub use router::EndpointRouter;
