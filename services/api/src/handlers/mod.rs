pub mod analytics;
pub mod doctor;
pub mod docs;
pub mod dto;
pub mod entry;
pub mod json;
pub mod link;
pub mod pairing_code;
pub mod patient;
pub mod practice;
pub mod query;
pub mod system;
