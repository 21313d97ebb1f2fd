// Shared prompt fragments.
// Each feature module that calls the oracle keeps its own prompts.rs alongside it.

/// System prompt sent with every completion unless a module overrides it.
pub const DEFAULT_SYSTEM: &str = "You are a helpful AI assistant that provides accurate, \
    concise responses in the requested format.";

/// Fills `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so user text containing `{answer}` or
/// `{job_description}` reaches the oracle verbatim. Braces that do not name a known key
/// (such as the JSON examples inside templates) are copied through unchanged.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match value {
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
