pub mod config;
pub mod genres;
pub mod profile;
pub mod recommend;

pub use genres::rank_genres;
pub use profile::show_profile;
pub use recommend::run_recommend;
