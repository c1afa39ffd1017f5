//! Template helper plumbing.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};

struct StringHelper<F>(F);

impl<F> HelperDef for StringHelper<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
        out.write(&self.0(param))?;
        Ok(())
    }
}

/// Wraps a plain string-to-string function as a template helper suitable for
/// [`Context::register_helper`](crate::Context::register_helper).
///
/// Usage:
///
/// ```
/// use braze::{string_helper, Config, Context};
///
/// let mut ctx = Context::new(Config {
///     pages_dir: "./pages".to_string(),
///     output_dir: "./dist".to_string(),
///     ..Config::default()
/// })
/// .unwrap();
/// ctx.register_helper("ucase", string_helper(|s| s.to_uppercase()));
/// ```
///
/// A page can then call `{{ucase title}}`. Non-string arguments render as
/// the empty string.
pub fn string_helper<F>(f: F) -> Box<dyn HelperDef + Send + Sync>
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Box::new(StringHelper(f))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn applies_the_function_to_the_first_param() {
        let mut hb = Handlebars::new();
        hb.register_helper("ucase", string_helper(|s| s.to_uppercase()));
        let rendered = hb
            .render_template("{{ucase name}}", &serde_json::json!({"name": "braze"}))
            .unwrap();
        assert_eq!(rendered, "BRAZE");
    }

    #[test]
    fn missing_params_render_as_empty() {
        let mut hb = Handlebars::new();
        hb.register_helper("ucase", string_helper(|s| s.to_uppercase()));
        let rendered = hb
            .render_template("{{ucase missing}}", &serde_json::json!({}))
            .unwrap();
        assert_eq!(rendered, "");
    }
}
