pub mod capture;
pub mod classify;
pub mod consts;
pub mod detector;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod particle;
pub mod quantify;
pub mod segment;
pub mod sources;
pub mod texture;
