mod parse_bad;
mod support;
mod typed;
