pub mod bindings;
pub mod docker;
pub mod identity;
pub mod interrupt;
pub mod lifecycle;
pub mod registry;
pub mod retry;
pub mod source;
