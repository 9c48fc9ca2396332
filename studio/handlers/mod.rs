pub mod draw;
pub mod events;
pub mod export;
pub mod page;
