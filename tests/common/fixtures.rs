// Test data

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u32,
    pub name: String,
    pub genre: Option<String>,
}

fn movie(id: u32, name: &str, genre: Option<&str>) -> Movie {
    Movie {
        id,
        name: name.to_owned(),
        genre: genre.map(str::to_owned),
    }
}

/// Movies for facet tests: three `Action` (one of them "Spider Man"), two
/// `SF` (one with id 13), one `sci fi`, one `Romance` and one without genre.
pub fn movies_for_faceting() -> Vec<Movie> {
    vec![
        movie(10, "Spider Man", Some("Action")),
        movie(11, "Die Hard", Some("Action")),
        movie(12, "Interstellar", Some("SF")),
        movie(13, "Alien", Some("SF")),
        movie(14, "Blade Runner", Some("sci fi")),
        movie(15, "Top Gun", Some("Action")),
        movie(16, "Titanic", Some("Romance")),
        movie(17, "Harry Potter", None),
    ]
}
