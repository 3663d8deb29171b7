mod environment;
mod parser;
