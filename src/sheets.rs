pub(crate) mod auth;
pub(crate) mod google;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod store;
pub(crate) mod table;

pub(crate) use store::RecordStore;
pub(crate) use table::{Cell, Row, Table};
