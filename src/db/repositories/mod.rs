pub mod accounts;
pub mod contracts;
pub mod episodes;
pub mod feedback;
pub mod history;
pub mod producers;
pub mod reports;
pub mod series;
pub mod stats;
pub mod studios;
pub mod viewers;
