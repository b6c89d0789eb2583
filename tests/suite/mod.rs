mod config;
mod deck;
mod stack_flow;
