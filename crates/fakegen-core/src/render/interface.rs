//! Interface fakes: one recorder unit per method.

use super::recorder::{self, RecorderNames};
use crate::method_set::MethodSignature;

/// Body of an interface fake, without header or imports.
///
/// `assert_as` is the interface spelled from the destination module; when
/// present a compile-time assertion that the fake implements it closes
/// the output.
pub fn render_interface_fake(
    fake: &str,
    methods: &[MethodSignature],
    assert_as: Option<&str>,
) -> Vec<String> {
    let units = RecorderNames::for_methods(methods);

    let mut lines = vec![format!("type {} struct {{", fake)];
    for (names, method) in units.iter().zip(methods) {
        lines.extend(recorder::fields(names, method));
    }
    lines.extend(recorder::invocation_fields());
    lines.push("}".to_string());

    for (names, method) in units.iter().zip(methods) {
        lines.push(String::new());
        lines.extend(recorder::methods(fake, names, method));
    }

    lines.push(String::new());
    lines.extend(recorder::invocations(fake, &units));
    lines.push(String::new());
    lines.extend(recorder::record_invocation(fake));

    if let Some(target) = assert_as {
        lines.push(String::new());
        lines.push(format!("var _ {} = new({})", target, fake));
    }
    lines
}
