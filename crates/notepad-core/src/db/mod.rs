//! Database layer for Notepad

mod connection;
mod migrations;
mod slot_repository;

pub use connection::Database;
pub use slot_repository::{LibSqlSlotRepository, MemorySlotRepository, SlotRepository};

#[cfg(test)]
pub(crate) use slot_repository::FailingSlotRepository;
