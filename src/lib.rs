pub mod icon;
pub mod sprites;
