use super::{
    DatastarError, DatastarEvent, ElementPatchMode, ExecuteScriptOptions, PatchElementsOptions,
    patch_elements,
};
use smol_str::SmolStr;

/// Create a `datastar-patch-elements` event which appends
/// a `<script>` element with the given code to the body.
///
/// Unless disabled, the script removes itself from the DOM once it ran.
pub fn execute_script(
    script: &str,
    options: ExecuteScriptOptions,
) -> Result<DatastarEvent, DatastarError> {
    let mut tag = String::from("<script");
    if let Some(attributes) = &options.attributes {
        tag.push_str(&attributes.to_string());
    }
    if options.auto_remove {
        tag.push_str(r#" data-effect="el.remove()""#);
    }
    tag.push('>');
    tag.push_str(script);
    tag.push_str("</script>");

    let options = PatchElementsOptions::new()
        .with_mode(ElementPatchMode::Append)
        .with_selector(SmolStr::new_static("body"))
        .with_event(options.event);
    patch_elements(&tag, &options)
}
