mod ime;
mod service;
