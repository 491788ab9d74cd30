mod commands;
mod helpers;
mod repl;
