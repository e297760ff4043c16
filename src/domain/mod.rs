pub mod inputs;
pub mod kind;
pub mod plan;
pub mod records;
