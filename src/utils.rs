pub mod date_formatter;
