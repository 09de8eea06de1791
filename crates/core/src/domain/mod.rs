pub mod returns;
pub mod scan;
