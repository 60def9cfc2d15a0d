pub mod table_harness;
