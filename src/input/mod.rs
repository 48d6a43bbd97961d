pub mod coordinates;
pub mod scroll;
