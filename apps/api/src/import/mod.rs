pub mod csv;
pub mod handlers;
pub mod importer;
