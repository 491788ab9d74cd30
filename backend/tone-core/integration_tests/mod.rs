mod config;
mod helpers;
mod mistral_client;
mod orchestrator;
mod persistence;
