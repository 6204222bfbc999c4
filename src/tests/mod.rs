use super::*;

mod dom_and_selectors;
mod html_parsing;
