pub mod metadata;
pub mod normalize;
