pub mod json_writer;
pub mod summary;
pub mod table;
pub mod tsv_writer;
