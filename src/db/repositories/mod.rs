//! Repositories take their work context explicitly: either the pool or an
//! open transaction, so the same query code runs inside and outside of a
//! provisioning transaction.

pub mod holiday;
pub mod store;
pub mod timelog;
pub mod user;
pub mod worker;
