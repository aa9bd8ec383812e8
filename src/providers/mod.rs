pub mod bitpanda;
pub mod export_file;
pub mod yahoo_finance;
