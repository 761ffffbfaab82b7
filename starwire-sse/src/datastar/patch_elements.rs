use super::{
    DatalineField, DatastarError, DatastarEvent, ElementPatchMode, EventType,
    PatchElementsOptions, TemplateRenderer,
    defaults::DatalineValue,
    event::DataLinesBuilder,
};
use serde::Serialize;
use smol_str::SmolStr;

/// Create a `datastar-patch-elements` event which patches
/// the given HTML `elements` into the DOM.
///
/// Fails when the mode is unknown, or when there is nothing to patch:
/// `elements` may only be blank when removing by selector.
pub fn patch_elements(
    elements: &str,
    options: &PatchElementsOptions,
) -> Result<DatastarEvent, DatastarError> {
    if !options.mode.is_known() {
        return Err(DatastarError::invalid_mode(&options.mode));
    }

    let selector = options.selector.as_deref().filter(|s| !s.is_empty());
    let is_remove = options.mode == ElementPatchMode::Remove;
    let remove_with_selector = is_remove && selector.is_some();
    let has_elements = !elements.trim().is_empty();

    if !remove_with_selector && !has_elements {
        if is_remove {
            return Err(DatastarError::missing_elements_for_remove_without_selector());
        }
        return Err(DatastarError::missing_required_field(
            DatalineField::Elements,
        ));
    }

    let mut lines = DataLinesBuilder::new();
    lines.option(DatalineField::Mode, DatalineValue::Mode(&options.mode));
    if let Some(selector) = selector {
        lines.option(DatalineField::Selector, DatalineValue::Str(selector));
    }
    lines.option(
        DatalineField::UseViewTransition,
        DatalineValue::Bool(options.use_view_transition),
    );
    if has_elements {
        lines.content(DatalineField::Elements, elements);
    } else {
        tracing::trace!("remove elements by selector: no elements line");
    }

    Ok(DatastarEvent::new(
        EventType::PatchElements,
        options.event.event_id.clone(),
        lines.build(),
        options.event.effective_retry(),
    ))
}

/// Render the template with the given `key` and patch the result
/// into the DOM using [`patch_elements`].
///
/// A failure to render is reported as
/// [`DatastarErrorKind::TemplateNotFound`](super::DatastarErrorKind::TemplateNotFound).
pub fn patch_elements_template<R, C>(
    renderer: &R,
    key: &str,
    context: &C,
    options: &PatchElementsOptions,
) -> Result<DatastarEvent, DatastarError>
where
    R: TemplateRenderer + ?Sized,
    C: Serialize + ?Sized,
{
    let elements = renderer
        .render(key, context)
        .map_err(|err| DatastarError::template_not_found(key, err))?;
    patch_elements(&elements, options)
}

/// Create a `datastar-patch-elements` event which removes elements from the DOM,
/// either those matching the `selector` or those with the ids of `elements`.
///
/// The mode and selector of the given options are overwritten.
pub fn remove_elements(
    selector: Option<&str>,
    elements: Option<&str>,
    options: PatchElementsOptions,
) -> Result<DatastarEvent, DatastarError> {
    let selector = selector.filter(|s| !s.is_empty());
    let elements = elements.unwrap_or_default();
    if selector.is_none() && elements.trim().is_empty() {
        return Err(DatastarError::missing_target());
    }

    let options = options
        .with_mode(ElementPatchMode::Remove)
        .maybe_with_selector(selector.map(SmolStr::new));
    patch_elements(elements, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastar::{DatastarErrorKind, EventOptions};
    use quickcheck::{TestResult, quickcheck};
    use starwire_error::BoxError;
    use std::{collections::HashMap, time::Duration};

    fn lines(event: &DatastarEvent) -> Vec<&str> {
        event.data().iter().collect()
    }

    #[test]
    fn test_default_mode_is_elided() {
        let event = patch_elements("<div id=\"foo\">hi</div>", &PatchElementsOptions::new())
            .unwrap();
        assert_eq!(event.event_type(), &EventType::PatchElements);
        assert_eq!(lines(&event), ["elements <div id=\"foo\">hi</div>"]);
        assert_eq!(event.id(), None);
        assert_eq!(event.retry(), Duration::from_millis(1000));
    }

    #[test]
    fn test_option_lines_in_order() {
        let options = PatchElementsOptions::new()
            .with_selector("#feed".into())
            .with_mode(ElementPatchMode::Append)
            .with_use_view_transition(true)
            .with_event(
                EventOptions::new()
                    .with_event_id("123".into())
                    .with_retry_duration(Duration::from_secs(2)),
            );
        let event = patch_elements("<li>a</li>", &options).unwrap();
        assert_eq!(
            lines(&event),
            [
                "mode append",
                "selector #feed",
                "useViewTransition true",
                "elements <li>a</li>",
            ]
        );
        assert_eq!(event.id(), Some("123"));
        assert_eq!(event.retry(), Duration::from_secs(2));
    }

    #[test]
    fn test_empty_selector_is_absent() {
        let options = PatchElementsOptions::new().with_selector("".into());
        let event = patch_elements("<p id=\"a\"></p>", &options).unwrap();
        assert_eq!(lines(&event), ["elements <p id=\"a\"></p>"]);
    }

    #[test]
    fn test_multiline_elements() {
        let event = patch_elements(
            "<div>\n  <span>1</span>\n</div>",
            &PatchElementsOptions::new(),
        )
        .unwrap();
        assert_eq!(
            lines(&event),
            ["elements <div>", "elements   <span>1</span>", "elements </div>"]
        );
    }

    #[test]
    fn test_carriage_returns_keep_field_prefix_on_the_wire() {
        let options = PatchElementsOptions::new()
            .with_mode(ElementPatchMode::Inner)
            .with_selector("#a,\r#b".into());
        let event = patch_elements("<p>a\rb</p>\r\r\n<p>c</p>", &options).unwrap();
        assert_eq!(
            lines(&event),
            [
                "mode inner",
                "selector #a,",
                "selector #b",
                "elements <p>a",
                "elements b</p>",
                "elements ",
                "elements <p>c</p>",
            ]
        );

        let wire = event.try_into_sse_event().unwrap().serialize().unwrap();
        let wire = std::str::from_utf8(&wire).unwrap();
        let data_lines: Vec<_> = wire
            .lines()
            .filter_map(|line| line.strip_prefix("data: "))
            .collect();
        assert_eq!(data_lines.len(), 7);
        for line in data_lines {
            assert!(
                ["mode ", "selector ", "elements "]
                    .iter()
                    .any(|prefix| line.starts_with(prefix)),
                "unprefixed data line: {line:?}"
            );
        }
    }

    #[test]
    fn test_missing_elements() {
        for elements in ["", "   ", "\n\t"] {
            let err = patch_elements(elements, &PatchElementsOptions::new()).unwrap_err();
            assert_eq!(
                err.kind(),
                &DatastarErrorKind::MissingRequiredField(DatalineField::Elements)
            );
        }
    }

    #[test]
    fn test_remove_without_selector_requires_elements() {
        let options = PatchElementsOptions::new().with_mode(ElementPatchMode::Remove);
        let err = patch_elements(" ", &options).unwrap_err();
        assert_eq!(
            err.kind(),
            &DatastarErrorKind::MissingRequiredField(DatalineField::Elements)
        );
        assert_eq!(
            err.to_string(),
            "for remove mode without selector, elements parameter with IDs is required"
        );

        let event = patch_elements("<div id=\"gone\"></div>", &options).unwrap();
        assert_eq!(
            lines(&event),
            ["mode remove", "elements <div id=\"gone\"></div>"]
        );
    }

    #[test]
    fn test_remove_with_selector_without_elements() {
        let options = PatchElementsOptions::new()
            .with_mode(ElementPatchMode::Remove)
            .with_selector("#todo-3".into());
        for elements in ["", "  \n "] {
            let event = patch_elements(elements, &options).unwrap();
            assert_eq!(lines(&event), ["mode remove", "selector #todo-3"]);
        }
    }

    #[test]
    fn test_invalid_mode() {
        let options = PatchElementsOptions::new().with_mode("morph".into());
        let err = patch_elements("<div></div>", &options).unwrap_err();
        assert_eq!(
            err.kind(),
            &DatastarErrorKind::InvalidMode("morph".into())
        );
    }

    #[test]
    fn test_mode_must_match_exactly() {
        for mode in [" REMOVE ", "Remove", "remove ", "\tappend", "OUTER"] {
            let options = PatchElementsOptions::new()
                .with_mode(ElementPatchMode::from(mode))
                .with_selector("#x".into());
            let err = patch_elements("<p id=\"x\"></p>", &options).unwrap_err();
            assert_eq!(
                err.kind(),
                &DatastarErrorKind::InvalidMode(mode.into()),
                "mode: {mode:?}"
            );
        }
    }

    #[test]
    fn test_remove_elements() {
        let event = remove_elements(Some("#a"), None, PatchElementsOptions::new()).unwrap();
        assert_eq!(lines(&event), ["mode remove", "selector #a"]);

        let event = remove_elements(
            None,
            Some("<div id=\"a\"></div>"),
            PatchElementsOptions::new().with_mode(ElementPatchMode::Inner),
        )
        .unwrap();
        assert_eq!(lines(&event), ["mode remove", "elements <div id=\"a\"></div>"]);

        for (selector, elements) in [(None, None), (Some(""), Some(" ")), (None, Some(""))] {
            let err = remove_elements(selector, elements, PatchElementsOptions::new())
                .unwrap_err();
            assert_eq!(err.kind(), &DatastarErrorKind::MissingTarget);
        }
    }

    struct MapRenderer(HashMap<&'static str, &'static str>);

    impl TemplateRenderer for MapRenderer {
        fn render<C>(&self, key: &str, _context: &C) -> Result<String, BoxError>
        where
            C: Serialize + ?Sized,
        {
            self.0
                .get(key)
                .map(|s| (*s).to_owned())
                .ok_or_else(|| format!("unknown template {key}").into())
        }
    }

    #[test]
    fn test_patch_elements_template() {
        let renderer = MapRenderer(HashMap::from([("hello", "<p id=\"hello\">hi</p>")]));
        let event = patch_elements_template(
            &renderer,
            "hello",
            &serde_json::json!({}),
            &PatchElementsOptions::new(),
        )
        .unwrap();
        assert_eq!(lines(&event), ["elements <p id=\"hello\">hi</p>"]);

        let err = patch_elements_template(
            &renderer,
            "missing",
            &(),
            &PatchElementsOptions::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &DatastarErrorKind::TemplateNotFound("missing".into())
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_quickcheck_default_options_emit_only_elements() {
        fn prop(elements: String) -> TestResult {
            if elements.trim().is_empty() {
                return TestResult::discard();
            }
            let event = patch_elements(&elements, &PatchElementsOptions::new()).unwrap();
            TestResult::from_bool(
                event
                    .fields()
                    .all(|(field, _)| field == DatalineField::Elements),
            )
        }
        quickcheck(prop as fn(String) -> TestResult);
    }

    #[test]
    fn test_quickcheck_multiline_elements_keep_order() {
        fn prop(segments: Vec<String>) -> TestResult {
            if segments
                .iter()
                .any(|s| s.contains(['\n', '\r']))
            {
                return TestResult::discard();
            }
            let elements = segments.join("\n");
            if elements.trim().is_empty() {
                return TestResult::discard();
            }
            let event = patch_elements(&elements, &PatchElementsOptions::new()).unwrap();
            let values: Vec<_> = event.fields().map(|(_, value)| value).collect();
            TestResult::from_bool(values == segments)
        }
        quickcheck(prop as fn(Vec<String>) -> TestResult);
    }

    #[test]
    fn test_quickcheck_round_trip() {
        fn prop(mode: u8, selector: Option<String>, use_view_transition: bool) -> TestResult {
            let selector = selector.filter(|s| !s.is_empty() && !s.contains(['\n', '\r']));
            let mode = ElementPatchMode::KNOWN[usize::from(mode) % ElementPatchMode::KNOWN.len()]
                .clone();
            let options = PatchElementsOptions::new()
                .with_mode(mode.clone())
                .maybe_with_selector(selector.clone().map(Into::into))
                .with_use_view_transition(use_view_transition);
            let event = patch_elements("<div id=\"x\">1</div>", &options).unwrap();

            let mut expected = Vec::new();
            if mode != ElementPatchMode::Outer {
                expected.push((DatalineField::Mode, mode.to_string()));
            }
            if let Some(selector) = selector {
                expected.push((DatalineField::Selector, selector));
            }
            if use_view_transition {
                expected.push((DatalineField::UseViewTransition, "true".to_owned()));
            }
            expected.push((DatalineField::Elements, "<div id=\"x\">1</div>".to_owned()));

            let parsed: Vec<_> = event
                .fields()
                .map(|(field, value)| (field, value.to_owned()))
                .collect();
            TestResult::from_bool(parsed == expected)
        }
        quickcheck(prop as fn(u8, Option<String>, bool) -> TestResult);
    }
}
