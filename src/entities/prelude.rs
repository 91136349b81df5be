pub use super::admin::Entity as Admin;
pub use super::admin_history::Entity as AdminHistory;
pub use super::collaboration::Entity as Collaboration;
pub use super::contract::Entity as Contract;
pub use super::country::Entity as Country;
pub use super::episode::Entity as Episode;
pub use super::feedback::Entity as Feedback;
pub use super::genre_type::Entity as GenreType;
pub use super::phouse::Entity as Phouse;
pub use super::producer::Entity as Producer;
pub use super::series::Entity as Series;
pub use super::series_dubbing::Entity as SeriesDubbing;
pub use super::series_release_country::Entity as SeriesReleaseCountry;
pub use super::series_subtitle::Entity as SeriesSubtitle;
pub use super::series_type::Entity as SeriesType;
pub use super::viewer::Entity as Viewer;
