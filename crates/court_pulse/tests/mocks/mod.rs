pub mod chat_model;
pub mod player_directory;
pub mod roster_store;
pub mod transcript_source;
