pub mod cors;
pub mod error_handler;
pub mod request_id;

pub use cors::{cors_layer_with_config, CorsConfig};
pub use error_handler::{error_handler_middleware, handle_not_found};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
