pub mod prelude;

pub mod admin;
pub mod admin_history;
pub mod collaboration;
pub mod contract;
pub mod country;
pub mod episode;
pub mod feedback;
pub mod genre_type;
pub mod phouse;
pub mod producer;
pub mod series;
pub mod series_dubbing;
pub mod series_release_country;
pub mod series_subtitle;
pub mod series_type;
pub mod viewer;
