pub mod playlist;
pub mod profile;
pub mod signal;
pub mod similarity;
pub mod track;

pub use playlist::{ExplicitFilter, PlaylistOptions};
pub use profile::{ColorProfile, MusicProfile};
pub use signal::{ImageSignal, Rgb};
pub use similarity::SimilarityResult;
pub use track::{Track, TrackView};
