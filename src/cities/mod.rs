//! Cities resource store: a reducer-backed collection synchronized with a
//! remote REST endpoint through the [`CityGateway`] seam.

mod city;
mod gateway;
mod store;

pub use city::{City, NewCity, Position};
pub use gateway::{CityGateway, GatewayError, HttpCityGateway};
pub use store::{use_cities, CitiesState, CitiesStore};
