pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod payment;
pub mod provider;
pub mod registry;
