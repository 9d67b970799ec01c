pub mod rotator;
pub mod scan;
pub mod scanner;
