pub mod history_pe;
