pub mod es_schema;
