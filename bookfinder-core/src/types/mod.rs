//! Core types shared by the search controller and the front ends

mod book;
mod state;

pub use book::Book;
pub use state::{
    favorites_summary, Phase, SearchState, HEADING_RECOMMENDED, HEADING_RESULTS,
    INITIAL_LOAD_MESSAGE,
};
