pub mod descent;
pub mod monte_carlo;
pub mod parachute;
pub mod sizing;
