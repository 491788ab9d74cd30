mod credential;
mod error_location;
