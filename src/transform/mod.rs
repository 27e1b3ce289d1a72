pub mod hit_formatter;
