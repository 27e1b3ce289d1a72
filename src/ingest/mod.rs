pub mod file_scanner;
