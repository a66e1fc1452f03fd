pub mod constraint_properties;
pub mod migration_files;
