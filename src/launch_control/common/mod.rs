pub(crate) mod vec2d;
#[cfg(test)]
mod tests;

pub use vec2d::Vec2D;
