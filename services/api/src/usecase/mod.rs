pub mod account;
pub mod analytics;
pub mod entry;
pub mod link;
pub mod pairing;
pub mod practice;
pub mod sync;
