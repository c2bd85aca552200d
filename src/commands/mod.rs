pub mod detail;
pub mod districts;
pub mod karte;
