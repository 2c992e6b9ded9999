pub mod ring;
pub mod tree;
