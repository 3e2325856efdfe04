pub mod front_matter;
pub mod get_client_ip;
pub mod markdown;
pub mod slug;
pub mod valid_uuid;
