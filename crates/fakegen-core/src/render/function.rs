//! Function fakes: a single recorder unit reached through `Spy`.

use super::recorder::{self, RecorderNames};
use crate::method_set::MethodSignature;

/// `assert_as` is the function type spelled from the destination module.
pub fn render_function_fake(
    fake: &str,
    method: &MethodSignature,
    assert_as: Option<&str>,
) -> Vec<String> {
    let names = RecorderNames::for_function(&method.name);

    let mut lines = vec![format!("type {} struct {{", fake)];
    lines.extend(recorder::fields(&names, method));
    lines.extend(recorder::invocation_fields());
    lines.push("}".to_string());
    lines.push(String::new());
    lines.extend(recorder::methods(fake, &names, method));
    lines.push(String::new());
    lines.extend(recorder::invocations(fake, std::slice::from_ref(&names)));
    lines.push(String::new());
    lines.extend(recorder::record_invocation(fake));

    if let Some(target) = assert_as {
        lines.push(String::new());
        lines.push(format!("var _ {} = new({}).Spy", target, fake));
    }
    lines
}
