pub mod favorites;
pub mod sites;
pub mod theme;
