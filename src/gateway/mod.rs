pub mod http;
pub mod request;
pub mod types;

pub use http::HttpGateway;
pub use request::{GatewayError, RequestGateway};
pub use types::{HealthStatus, RemoteAnswer};
