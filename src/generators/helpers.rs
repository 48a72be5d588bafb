//! # Template helpers
//!
//! A small, swappable set of Handlebars helpers registered into every
//! `TemplateRenderer` instance (`spec.md` §4.9's "pluggable helper map").
//! Kept as a boundary concern so a caller using `TemplateRenderer::with_helpers`
//! can register additional helpers, or none.

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};

/// Registers the default helper set (`upper`, `lower`, `trim`) into
/// `handlebars`.
pub fn register_defaults(handlebars: &mut Handlebars) {
    handlebars.register_helper("upper", Box::new(upper_helper));
    handlebars.register_helper("lower", Box::new(lower_helper));
    handlebars.register_helper("trim", Box::new(trim_helper));
}

fn string_param(helper: &Helper, name: &str) -> Result<String, handlebars::RenderError> {
    helper
        .param(0)
        .map(|p| p.value().render())
        .ok_or_else(|| RenderErrorReason::ParamNotFoundForIndex(name, 0).into())
}

fn upper_helper(
    helper: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(helper, "upper")?.to_uppercase())?;
    Ok(())
}

fn lower_helper(
    helper: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(&string_param(helper, "lower")?.to_lowercase())?;
    Ok(())
}

fn trim_helper(
    helper: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    out.write(string_param(helper, "trim")?.trim())?;
    Ok(())
}
