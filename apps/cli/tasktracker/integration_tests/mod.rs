mod helpers;

mod binary;
mod commands;
