#[allow(clippy::module_inception)]
pub mod bot;
pub mod bot_types;
pub mod form;
