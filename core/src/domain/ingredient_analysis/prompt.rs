use crate::domain::ingredient_analysis::schema::{
    get_analysis_output_format, get_ingredient_output_format, get_summary_output_format,
};

/// Version tag shared by every template below; bump it together with the files.
pub const PROMPT_VERSION: &str = "v1";

const ANALYSIS_TEMPLATE: &str = include_str!("../../../prompts/ingredient_reasoning.v1.txt");
const INGREDIENT_TEMPLATE: &str = include_str!("../../../prompts/ingredient_single.v1.txt");
const SUMMARY_TEMPLATE: &str = include_str!("../../../prompts/ingredient_summary.v1.txt");

pub const JSON_ONLY_SYSTEM_PROMPT: &str =
    "You are a JSON-only API. Any response not in JSON is invalid.";

pub const STRICT_JSON_SYSTEM_PROMPT: &str = "You are a JSON-only API. Your previous answer could not be parsed. Reply with exactly one JSON object: no markdown, no code fences, no comments, no trailing commas and no text before or after it.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub version: &'static str,
    pub system: &'static str,
    pub user: String,
}

impl RenderedPrompt {
    fn new(user: String) -> Self {
        Self {
            version: PROMPT_VERSION,
            system: JSON_ONLY_SYSTEM_PROMPT,
            user,
        }
    }

    /// Same prompt, re-asked with the stricter JSON-only instruction.
    pub fn strict(&self) -> Self {
        Self {
            version: self.version,
            system: STRICT_JSON_SYSTEM_PROMPT,
            user: self.user.clone(),
        }
    }
}

/// Prompt for analyzing the whole ingredient list in one completion.
pub fn build_prompt(ingredients: &str, product_context: Option<&str>) -> RenderedPrompt {
    let output_format = format!("{:#}", get_analysis_output_format());
    let context = render_context(product_context);

    RenderedPrompt::new(render(
        ANALYSIS_TEMPLATE,
        &[
            ("output_format", &output_format),
            ("product_context", &context),
            ("ingredients", ingredients.trim()),
        ],
    ))
}

/// Prompt for a single ingredient, with the full list as context.
pub fn build_ingredient_prompt(
    ingredient: &str,
    ingredients: &str,
    product_context: Option<&str>,
) -> RenderedPrompt {
    let output_format = format!("{:#}", get_ingredient_output_format());
    let context = render_context(product_context);

    RenderedPrompt::new(render(
        INGREDIENT_TEMPLATE,
        &[
            ("output_format", &output_format),
            ("product_context", &context),
            ("ingredients", ingredients.trim()),
            ("ingredient", ingredient.trim()),
        ],
    ))
}

/// Prompt for the aggregate nutrition estimate and conclusion only.
pub fn build_summary_prompt(ingredients: &str, product_context: Option<&str>) -> RenderedPrompt {
    let output_format = format!("{:#}", get_summary_output_format());
    let context = render_context(product_context);

    RenderedPrompt::new(render(
        SUMMARY_TEMPLATE,
        &[
            ("output_format", &output_format),
            ("product_context", &context),
            ("ingredients", ingredients.trim()),
        ],
    ))
}

fn render_context(product_context: Option<&str>) -> String {
    match product_context.map(str::trim) {
        Some(context) if !context.is_empty() => format!("\nPRODUCT CONTEXT:\n{context}\n"),
        _ => String::new(),
    }
}

/// Substitutes `{name}` placeholders in a single pass.
///
/// Substituted values are never scanned again, so braces inside user text are
/// copied through untouched. Unknown placeholders are left as they are.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
