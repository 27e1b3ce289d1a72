pub mod document_store;
pub mod es_client;
