//! The hardcoded catalogue served by default

use crate::core::entity::{Actor, Director, Movie};

pub fn actors() -> Vec<Actor> {
    vec![
        Actor::new(1, "John Cruise", "1970/01/01", "US"),
        Actor::new(2, "Brad Pity", "1976/01/01", "US"),
        Actor::new(3, "Emma Sherlock", "1988/01/01", "UK"),
    ]
}

pub fn directors() -> Vec<Director> {
    vec![
        Director::new(1, "Jack Carpenter", "1950/01/01", "BR"),
        Director::new(2, "Steven Pittsburgh", "1955/01/01", "AU"),
        Director::new(3, "Andrei Sharkovski", "1960/01/01", "RU"),
    ]
}

pub fn movies() -> Vec<Movie> {
    vec![
        Movie::new(1, "Moneymaker", 2009, 4.5, 1, vec![1, 2, 3]),
        Movie::new(2, "Apple", 2010, 1.5, 2, vec![2, 3]),
        Movie::new(3, "Banana", 2015, 4.2, 3, vec![1, 2]),
        Movie::new(4, "Loner", 2001, 3.9, 1, vec![3]),
    ]
}
