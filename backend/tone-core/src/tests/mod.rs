mod config;
mod mistral_client;
mod state;
mod tones;
mod validation;
