use super::{
    DatalineField, DatastarError, DatastarEvent, EventType, PatchSignalsOptions,
    defaults::DatalineValue, event::DataLinesBuilder,
};
use indexmap::IndexSet;
use serde_json::Value;

/// Create a `datastar-patch-signals` event which patches
/// the given JSON object into the signals of the client.
///
/// The JSON is passed as is, it is not validated.
pub fn patch_signals(
    signals: &str,
    options: &PatchSignalsOptions,
) -> Result<DatastarEvent, DatastarError> {
    if signals.trim().is_empty() {
        return Err(DatastarError::missing_required_field(
            DatalineField::Signals,
        ));
    }

    let mut lines = DataLinesBuilder::new();
    lines.option(
        DatalineField::OnlyIfMissing,
        DatalineValue::Bool(options.only_if_missing),
    );
    lines.content(DatalineField::Signals, signals);

    Ok(DatastarEvent::new(
        EventType::PatchSignals,
        options.event.event_id.clone(),
        lines.build(),
        options.event.effective_retry(),
    ))
}

/// Create a `datastar-patch-signals` event which removes the signals
/// with the given keys, by patching each of them to `null`.
///
/// Keys are written in the order given, a repeated key keeps
/// its first position.
pub fn remove_signals<I>(keys: I, options: &PatchSignalsOptions) -> Result<DatastarEvent, DatastarError>
where
    I: IntoIterator<Item: AsRef<str>>,
{
    let keys: IndexSet<String> = keys
        .into_iter()
        .map(|key| key.as_ref().to_owned())
        .collect();

    let mut patch = String::from("{");
    for (index, key) in keys.into_iter().enumerate() {
        if index > 0 {
            patch.push(',');
        }
        patch.push_str(&Value::String(key).to_string());
        patch.push_str(":null");
    }
    patch.push('}');

    patch_signals(&patch, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastar::{DatastarErrorKind, EventOptions};

    fn lines(event: &DatastarEvent) -> Vec<&str> {
        event.data().iter().collect()
    }

    #[test]
    fn test_patch_signals() {
        let event = patch_signals(r#"{"count":1}"#, &PatchSignalsOptions::new()).unwrap();
        assert_eq!(event.event_type(), &EventType::PatchSignals);
        assert_eq!(lines(&event), [r#"signals {"count":1}"#]);
    }

    #[test]
    fn test_patch_signals_only_if_missing() {
        let options = PatchSignalsOptions::new()
            .with_only_if_missing(true)
            .with_event(EventOptions::new().with_event_id("e1".into()));
        let event = patch_signals("{\n  \"a\": true\n}", &options).unwrap();
        assert_eq!(
            lines(&event),
            ["onlyIfMissing true", "signals {", r#"signals   "a": true"#, "signals }"]
        );
        assert_eq!(event.id(), Some("e1"));
    }

    #[test]
    fn test_signals_with_carriage_returns() {
        let event = patch_signals("{\"a\":1,\r\"b\":2}", &PatchSignalsOptions::new()).unwrap();
        assert_eq!(lines(&event), [r#"signals {"a":1,"#, r#"signals "b":2}"#]);

        let wire = event.try_into_sse_event().unwrap().serialize().unwrap();
        assert_eq!(
            wire,
            concat!(
                "event: datastar-patch-signals\n",
                "retry: 1000\n",
                "data: signals {\"a\":1,\n",
                "data: signals \"b\":2}\n",
                "\n",
            )
        );
    }

    #[test]
    fn test_missing_signals() {
        for signals in ["", " \n "] {
            let err = patch_signals(signals, &PatchSignalsOptions::new()).unwrap_err();
            assert_eq!(
                err.kind(),
                &DatastarErrorKind::MissingRequiredField(DatalineField::Signals)
            );
        }
    }

    #[test]
    fn test_remove_signals() {
        let event = remove_signals(["a", "b"], &PatchSignalsOptions::new()).unwrap();
        let (field, value) = event.fields().next().unwrap();
        assert_eq!(field, DatalineField::Signals);
        let value: Value = serde_json::from_str(value).unwrap();
        assert_eq!(value, serde_json::json!({"a": null, "b": null}));
    }

    #[test]
    fn test_remove_signals_keeps_key_order() {
        let event =
            remove_signals(["zeta", "alpha", "zeta", "say \"hi\""], &PatchSignalsOptions::new())
                .unwrap();
        assert_eq!(
            lines(&event),
            [r#"signals {"zeta":null,"alpha":null,"say \"hi\"":null}"#]
        );
    }

    #[test]
    fn test_remove_single_signal() {
        let event = remove_signals(Some("user.name".to_owned()), &PatchSignalsOptions::new())
            .unwrap();
        assert_eq!(lines(&event), [r#"signals {"user.name":null}"#]);
    }

    #[test]
    fn test_remove_no_signals_is_an_empty_patch() {
        let event = remove_signals(Vec::<String>::new(), &PatchSignalsOptions::new()).unwrap();
        assert_eq!(lines(&event), ["signals {}"]);
    }
}
