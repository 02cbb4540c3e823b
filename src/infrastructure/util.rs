// src/infrastructure/util.rs
use slug::slugify;

use crate::application::ports::util::SlugGenerator;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}
