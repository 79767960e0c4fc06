//! Module shims.
//!
//! The synthesized interface mirrors the module's exported functions and
//! the shim struct implements it by calling through to the module. The
//! interface fake over the same interface follows in the same file.

use super::interface::render_interface_fake;
use super::signature::{forwarded_args, named_params, return_suffix};
use crate::method_set::MethodSignature;

/// `Name` interface, `NameShim` struct and its forwarding methods.
pub fn render_shim(
    interface: &str,
    module_path: &str,
    module_alias: &str,
    methods: &[MethodSignature],
) -> Vec<String> {
    let shim = format!("{}Shim", interface);
    let mut lines = vec![
        format!(
            "// {} is a generated interface representing the exported functions",
            interface
        ),
        format!("// in the {} module.", module_path),
        format!("type {} interface {{", interface),
    ];
    for m in methods {
        lines.push(format!(
            "\t{}({}){}",
            m.name,
            named_params(&m.params),
            return_suffix(&m.returns)
        ));
    }
    lines.push("}".to_string());
    lines.push(String::new());
    lines.push(format!("type {} struct{{}}", shim));

    for m in methods {
        let call = format!("{}.{}({})", module_alias, m.name, forwarded_args(&m.params));
        lines.push(String::new());
        lines.push(format!(
            "func (p *{}) {}({}){} {{",
            shim,
            m.name,
            named_params(&m.params),
            return_suffix(&m.returns)
        ));
        if m.returns.is_empty() {
            lines.push(format!("\t{}", call));
        } else {
            lines.push(format!("\treturn {}", call));
        }
        lines.push("}".to_string());
    }

    lines.push(String::new());
    lines.push(format!("var _ {} = new({})", interface, shim));
    lines
}

/// Shim followed by the fake of the synthesized interface.
pub fn render_shim_and_fake(
    interface: &str,
    fake: &str,
    module_path: &str,
    module_alias: &str,
    methods: &[MethodSignature],
) -> Vec<String> {
    let mut lines = render_shim(interface, module_path, module_alias, methods);
    lines.push(String::new());
    lines.extend(render_interface_fake(fake, methods, Some(interface)));
    lines
}
