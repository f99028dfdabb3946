//! PayPal Orders v2: payload construction, the authorized executor and the
//! four order operations exposed to the route layer.
pub mod api;
pub mod executor;
pub mod payload;
