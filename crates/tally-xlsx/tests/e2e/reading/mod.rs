mod errors;
mod survey;
