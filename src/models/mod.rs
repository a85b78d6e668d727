pub mod conversation;
pub mod dto;
