mod commands;
mod logger;
mod output;
