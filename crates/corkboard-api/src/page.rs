use minijinja::{Environment, context};

use corkboard_types::models::MessageSummary;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Server-rendered pages. Templates are compiled in and parsed once at startup.
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, messages: &[MessageSummary]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("index.html")?
            .render(context! { messages => messages })
    }
}
