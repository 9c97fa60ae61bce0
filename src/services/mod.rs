pub mod dispatcher;
pub mod order_resolver;
