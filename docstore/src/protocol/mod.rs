//! JSON request/response commands over a [Store](crate::store::Store).
//!
//! The module only encodes, decodes and dispatches; it owns no sockets.
//! A transport hands each received request to [Store::execute_json] (or a
//! decoded [Request] to [Store::execute]) and writes back the response.
//!
//! [Store::execute_json]: crate::store::Store::execute_json
//! [Store::execute]: crate::store::Store::execute
mod command;
mod dispatcher;

pub use command::*;
