//! Prompt templates sent to the disaster agent
//!
//! Two templates are registered:
//! - `locations`: asks for the places affected by a disaster idea
//! - `news`: asks for commentary, date and source about one place, with
//!   instructions describing the JSON object the answer must contain

use crate::error::Result;
use minijinja::{Environment, context};

const LOCATIONS: &str = "locations";
const NEWS: &str = "news";

const LOCATIONS_TEMPLATE: &str = "The user is interested in finding locations affected by \
disasters. Given the prompt {{ idea }}, find the relevant affected areas of disaster (like \
specific landmarks, attractions, or sites) separated by commas.";

const NEWS_TEMPLATE: &str = r#"Answer the user's question as best as possible.
The output should be a markdown code snippet formatted in the following schema, including the leading and trailing "```json" and "```":

```json
{
	"answer": string  // news about the disaster
	"date": string  // date of the disaster
	"source": string  // source used to answer the user's question, should be a website.
}
```
The user is interested in finding disaster commentary for the location {{ location }}. Find the latest news about the disasters along with the date and the location of the disaster, along with the source (link) of the news"#;

/// Compiled prompt templates
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    /// Compile the built-in templates
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(LOCATIONS, LOCATIONS_TEMPLATE)?;
        env.add_template(NEWS, NEWS_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Prompt asking for the comma-separated places affected by `idea`
    pub fn locations_prompt(&self, idea: &str) -> Result<String> {
        Ok(self.env.get_template(LOCATIONS)?.render(context! { idea })?)
    }

    /// Prompt asking for news about a single `location`
    pub fn news_prompt(&self, location: &str) -> Result<String> {
        Ok(self.env.get_template(NEWS)?.render(context! { location })?)
    }
}
